use std::sync::Arc;

use actix_web::{
    Responder, delete, get, post, put,
    web::{self},
};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::lead::{CreateLeadRequest, LeadListQuery, UpdateLeadRequest},
    service,
};

/// Creates a lead for one of the authenticated user's customers.
///
/// # Arguments
///
/// * `claims` - The JWT claims of the authenticated user.
/// * `pool` - The database connection pool.
/// * `req` - The request containing the lead fields.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the created lead, or an
/// `AppError` (403 if the referenced customer is not owned by the caller).
#[post("")]
pub async fn post_lead(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateLeadRequest>,
) -> Res<impl Responder> {
    let lead = service::lead::create_lead(&pool, claims.user_id, req.into_inner()).await?;
    Success::created(lead)
}

/// Retrieves a paginated list of leads visible to the authenticated user,
/// newest first, optionally filtered by customer and status.
///
/// # Arguments
///
/// * `claims` - The JWT claims of the authenticated user.
/// * `pool` - The database connection pool.
/// * `query` - Optional `customer_id`, `status`, `page` and `limit` parameters.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the leads and pagination envelope.
#[get("")]
pub async fn get_leads(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<LeadListQuery>,
) -> Res<impl Responder> {
    let response = service::lead::list_leads(&pool, claims.user_id, query.into_inner()).await?;
    Success::ok(response)
}

/// Retrieves the authenticated user's lead distributions grouped by status:
/// a count per status and a summed value per status.
#[get("/stats")]
pub async fn get_lead_stats(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let stats = service::lead::lead_stats(&pool, claims.user_id).await?;
    Success::ok(stats)
}

/// Updates a lead if the caller owns its parent customer.
#[put("/{id}")]
pub async fn put_lead(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateLeadRequest>,
) -> Res<impl Responder> {
    let lead =
        service::lead::update_lead(&pool, claims.user_id, path.into_inner(), req.into_inner())
            .await?;
    Success::ok(lead)
}

/// Deletes a lead if the caller owns its parent customer.
#[delete("/{id}")]
pub async fn delete_lead(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    service::lead::delete_lead(&pool, claims.user_id, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "msg": "Lead deleted" }))
}
