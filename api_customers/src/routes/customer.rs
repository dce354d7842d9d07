use std::sync::Arc;

use actix_web::{
    Responder, delete, get, post, put,
    web::{self},
};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::customer::{CreateCustomerRequest, CustomerListQuery, UpdateCustomerRequest},
    service,
};

/// Creates a customer owned by the authenticated user.
///
/// # Arguments
///
/// * `claims` - The JWT claims of the authenticated user.
/// * `pool` - The database connection pool.
/// * `req` - The request containing the customer fields.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the created customer or an `AppError` if an error occurs.
#[post("")]
pub async fn post_customer(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateCustomerRequest>,
) -> Res<impl Responder> {
    let customer =
        service::customer::create_customer(&pool, claims.user_id, req.into_inner()).await?;
    Success::created(customer)
}

/// Retrieves a paginated, searchable list of the authenticated user's customers.
///
/// # Arguments
///
/// * `claims` - The JWT claims of the authenticated user.
/// * `pool` - The database connection pool.
/// * `query` - Optional `page`, `limit` and `search` parameters.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the customers and pagination envelope.
#[get("")]
pub async fn get_customers(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<CustomerListQuery>,
) -> Res<impl Responder> {
    let response =
        service::customer::list_customers(&pool, claims.user_id, query.into_inner()).await?;
    Success::ok(response)
}

/// Retrieves one customer and its leads.
#[get("/{id}")]
pub async fn get_customer(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let response =
        service::customer::get_customer(&pool, claims.user_id, path.into_inner()).await?;
    Success::ok(response)
}

/// Updates the given fields of an owned customer.
#[put("/{id}")]
pub async fn put_customer(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCustomerRequest>,
) -> Res<impl Responder> {
    let customer = service::customer::update_customer(
        &pool,
        claims.user_id,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Success::ok(customer)
}

/// Deletes an owned customer and, by cascade, its leads.
#[delete("/{id}")]
pub async fn delete_customer(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    service::customer::delete_customer(&pool, claims.user_id, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "msg": "Customer deleted" }))
}
