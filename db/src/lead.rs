use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::lead::{LeadCreate, LeadFilter, LeadUpdate},
    models::lead::{Lead, LeadStatusCount, LeadStatusValue},
};

pub async fn insert_lead<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: LeadCreate,
) -> Res<Lead> {
    sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (customer_id, title, description, status, value)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.customer_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.status)
    .bind(data.value)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_lead_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: &Uuid,
) -> Res<Option<Lead>> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
        .bind(lead_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_leads_by_customer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    customer_id: &Uuid,
) -> Res<Vec<Lead>> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

// Leads carry no owner column; visibility always joins through the parent
// customer. The filter join is shared between the page and count queries so
// the envelope total is computed over exactly the listed set.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &LeadFilter) {
    qb.push(" JOIN customers c ON l.customer_id = c.id WHERE c.owner_id = ")
        .push_bind(filter.owner_id);

    if let Some(customer_id) = filter.customer_id {
        qb.push(" AND l.customer_id = ").push_bind(customer_id);
    }

    if let Some(status) = filter.status {
        qb.push(" AND l.status = ").push_bind(status);
    }
}

pub async fn get_leads_page<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    filter: &LeadFilter,
    limit: i64,
    offset: i64,
) -> Res<Vec<Lead>> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT l.* FROM leads l");
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY l.created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    qb.build_query_as::<Lead>()
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_leads<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    filter: &LeadFilter,
) -> Res<i64> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM leads l");
    push_filter(&mut qb, filter);

    qb.build_query_scalar::<i64>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_lead<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: &Uuid,
    data: LeadUpdate,
) -> Res<Option<Lead>> {
    sqlx::query_as::<_, Lead>(
        r#"
        UPDATE leads
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            status = COALESCE($3, status),
            value = COALESCE($4, value),
            updated_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.status)
    .bind(data.value)
    .bind(lead_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_lead<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: &Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM leads WHERE id = $1")
        .bind(lead_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected() > 0)
}

pub async fn status_counts<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_id: &Uuid,
) -> Res<Vec<LeadStatusCount>> {
    sqlx::query_as::<_, LeadStatusCount>(
        r#"
        SELECT l.status AS status, COUNT(*) AS count
        FROM leads l
        JOIN customers c ON l.customer_id = c.id
        WHERE c.owner_id = $1
        GROUP BY l.status
        "#,
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn value_sums<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    owner_id: &Uuid,
) -> Res<Vec<LeadStatusValue>> {
    // NULL lead values count as 0 toward the status total
    sqlx::query_as::<_, LeadStatusValue>(
        r#"
        SELECT l.status AS status, COALESCE(SUM(l.value), 0)::double precision AS total_value
        FROM leads l
        JOIN customers c ON l.customer_id = c.id
        WHERE c.owner_id = $1
        GROUP BY l.status
        "#,
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LeadStatus;
    use sqlx::Execute;

    fn built_sql(filter: &LeadFilter) -> String {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT l.* FROM leads l");
        push_filter(&mut qb, filter);
        qb.build().sql().to_string()
    }

    #[test]
    fn listing_always_joins_and_scopes_by_owner() {
        let sql = built_sql(&LeadFilter {
            owner_id: Uuid::new_v4(),
            customer_id: None,
            status: None,
        });

        assert!(sql.contains("JOIN customers c ON l.customer_id = c.id"));
        assert!(sql.contains("WHERE c.owner_id = $1"));
        assert!(!sql.contains("l.customer_id = $"));
        assert!(!sql.contains("l.status = $"));
    }

    #[test]
    fn customer_and_status_filters_are_additive() {
        let sql = built_sql(&LeadFilter {
            owner_id: Uuid::new_v4(),
            customer_id: Some(Uuid::new_v4()),
            status: Some(LeadStatus::Converted),
        });

        assert!(sql.contains("WHERE c.owner_id = $1"));
        assert!(sql.contains("AND l.customer_id = $2"));
        assert!(sql.contains("AND l.status = $3"));
    }

    #[test]
    fn deleting_a_customer_cascades_to_its_leads() {
        let migration = include_str!("../migrations/20250210120200_create_leads.sql");
        assert!(migration.contains("REFERENCES customers(id) ON DELETE CASCADE"));
    }
}
