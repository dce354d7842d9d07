use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::services;

/// Retrieves the current authenticated user's profile.
///
/// # Arguments
///
/// * `claims` - The JWT claims of the authenticated user.
/// * `pool` - The database connection pool.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the user or an `AppError` if an error occurs.
#[get("/me")]
pub async fn get_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = services::user::get_user_by_id(&pool, claims.user_id).await?;
    Success::ok(user)
}
