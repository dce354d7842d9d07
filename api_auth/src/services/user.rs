use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use common::error::{AppError, Res};
use db::{
    dtos::user::UserCreateRequest,
    models::user::{AuthCredentials, User},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::auth::RegisterRequest;

pub(crate) async fn exists_user_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    db::user::exists_user_by_email(pool, email).await
}

/// Creates the user row and its argon2 credentials in one transaction, so a
/// failed credential insert never leaves a user without a password.
pub(crate) async fn create_user_with_credentials(
    pool: &PgPool,
    req: &RegisterRequest,
) -> Res<User> {
    let password_hash = hash_password(&req.password)?;

    let mut tx = pool.begin().await.map_err(AppError::from)?;
    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            name: req.name.clone(),
            email: req.email.clone(),
        },
    )
    .await?;
    db::user::insert_user_with_credentials(
        &mut *tx,
        AuthCredentials {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;
    tx.commit().await.map_err(AppError::from)?;

    Ok(user)
}

pub(crate) async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_user_by_id(pool, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub(crate) fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn hashed_password_verifies_against_the_original() {
        let hash = hash_password("hunter2").expect("password hashes");
        let parsed = PasswordHash::new(&hash).expect("hash parses");
        assert!(
            Argon2::default()
                .verify_password(b"hunter2", &parsed)
                .is_ok()
        );
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("hunter2").expect("password hashes");
        let parsed = PasswordHash::new(&hash).expect("hash parses");
        assert!(
            Argon2::default()
                .verify_password(b"hunter3", &parsed)
                .is_err()
        );
    }

    #[test]
    fn same_password_hashes_to_different_strings() {
        // per-hash random salt
        let first = hash_password("hunter2").expect("password hashes");
        let second = hash_password("hunter2").expect("password hashes");
        assert_ne!(first, second);
    }
}
