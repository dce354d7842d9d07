use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::customer::{CustomerCreate, CustomerUpdate},
    models::customer::Customer,
};

// Every query here is scoped to the owner: a customer belonging to someone
// else is indistinguishable from a missing one.

pub async fn insert_customer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CustomerCreate,
) -> Res<Customer> {
    sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (name, email, phone, company, owner_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.company)
    .bind(data.owner_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_customer_by_id_and_owner<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customer_id: &Uuid,
    owner_id: &Uuid,
) -> Res<Option<Customer>> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 AND owner_id = $2")
        .bind(customer_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_customers_page<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_id: &Uuid,
    search: &str,
    limit: i64,
    offset: i64,
) -> Res<Vec<Customer>> {
    // empty search degenerates to '%%' and matches every owned customer
    let pattern = format!("%{}%", search);
    sqlx::query_as::<_, Customer>(
        r#"
        SELECT * FROM customers
        WHERE owner_id = $1 AND (name ILIKE $2 OR email ILIKE $2)
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(owner_id)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_customers<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_id: &Uuid,
    search: &str,
) -> Res<i64> {
    let pattern = format!("%{}%", search);
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM customers
        WHERE owner_id = $1 AND (name ILIKE $2 OR email ILIKE $2)
        "#,
    )
    .bind(owner_id)
    .bind(&pattern)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_customer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customer_id: &Uuid,
    owner_id: &Uuid,
    data: CustomerUpdate,
) -> Res<Option<Customer>> {
    sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers
        SET name = COALESCE($1, name),
            email = COALESCE($2, email),
            phone = COALESCE($3, phone),
            company = COALESCE($4, company),
            updated_at = now()
        WHERE id = $5 AND owner_id = $6
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.company)
    .bind(customer_id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_customer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customer_id: &Uuid,
    owner_id: &Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND owner_id = $2")
        .bind(customer_id)
        .bind(owner_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected() > 0)
}
