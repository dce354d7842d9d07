use common::{
    error::{AppError, Res},
    pagination::{PageRequest, Pagination},
};
use db::{
    dtos::lead::{LeadCreate, LeadFilter, LeadUpdate},
    models::lead::Lead,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::lead::{
    CreateLeadRequest, LeadListQuery, LeadListResponse, LeadStatsResponse, UpdateLeadRequest,
    parse_status_filter,
};

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Fails with `Forbidden` unless `customer_id` names a customer owned by the
/// caller. Re-resolved from the store on every call; ownership is never
/// cached on the lead side.
async fn ensure_owned_customer(
    pool: &PgPool,
    customer_id: &Uuid,
    caller_id: &Uuid,
    denied_msg: &str,
) -> Res<()> {
    let customer = db::customer::get_customer_by_id_and_owner(pool, customer_id, caller_id).await?;
    if customer.is_none() {
        return Err(AppError::Forbidden(denied_msg.to_string()));
    }
    Ok(())
}

/// Creates a lead under one of the caller's customers.
///
/// # Arguments
///
/// * `pool` - A reference to the database connection pool.
/// * `caller_id` - The ID of the authenticated user.
/// * `req` - The request containing the lead fields.
///
/// # Returns
///
/// A `Result` containing the created `Lead`, or `Forbidden` if the referenced
/// customer does not exist or belongs to someone else.
pub(crate) async fn create_lead(
    pool: &PgPool,
    caller_id: Uuid,
    req: CreateLeadRequest,
) -> Res<Lead> {
    ensure_owned_customer(
        pool,
        &req.customer_id,
        &caller_id,
        "Not authorized to add lead for this customer",
    )
    .await?;

    db::lead::insert_lead(
        pool,
        LeadCreate {
            customer_id: req.customer_id,
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            value: req.value,
        },
    )
    .await
}

/// Lists leads visible to the caller, newest first, optionally narrowed to
/// one owned customer and/or one status. Results are always scoped through
/// the parent customer's owner, with or without a `customer_id` narrowing.
pub(crate) async fn list_leads(
    pool: &PgPool,
    caller_id: Uuid,
    query: LeadListQuery,
) -> Res<LeadListResponse> {
    let status = parse_status_filter(query.status.as_deref())?;

    if let Some(customer_id) = &query.customer_id {
        ensure_owned_customer(
            pool,
            customer_id,
            &caller_id,
            "Not authorized to view leads for this customer",
        )
        .await?;
    }

    let page = PageRequest::clamped(query.page, query.limit, DEFAULT_PAGE_SIZE);
    let filter = LeadFilter {
        owner_id: caller_id,
        customer_id: query.customer_id,
        status,
    };

    let (leads, total) = futures::try_join!(
        db::lead::get_leads_page(pool, &filter, page.limit, page.offset()),
        db::lead::count_leads(pool, &filter),
    )?;

    Ok(LeadListResponse {
        leads,
        pagination: Pagination::new(page, total),
    })
}

/// Updates a lead after re-checking the parent customer's ownership at
/// mutation time.
pub(crate) async fn update_lead(
    pool: &PgPool,
    caller_id: Uuid,
    lead_id: Uuid,
    req: UpdateLeadRequest,
) -> Res<Lead> {
    let lead = db::lead::get_lead_by_id(pool, &lead_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    ensure_owned_customer(
        pool,
        &lead.customer_id,
        &caller_id,
        "Not authorized to update this lead",
    )
    .await?;

    db::lead::update_lead(
        pool,
        &lead_id,
        LeadUpdate {
            title: req.title,
            description: req.description,
            status: req.status,
            value: req.value,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
}

/// Deletes a lead after re-checking the parent customer's ownership at
/// mutation time.
pub(crate) async fn delete_lead(pool: &PgPool, caller_id: Uuid, lead_id: Uuid) -> Res<()> {
    let lead = db::lead::get_lead_by_id(pool, &lead_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    ensure_owned_customer(
        pool,
        &lead.customer_id,
        &caller_id,
        "Not authorized to delete this lead",
    )
    .await?;

    let deleted = db::lead::delete_lead(pool, &lead_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Lead not found".to_string()));
    }
    Ok(())
}

/// Computes the caller's status and value distributions: leads are joined to
/// their parent customers, filtered by owner, then grouped by status for a
/// count and a value sum. Statuses with no leads do not appear.
pub(crate) async fn lead_stats(pool: &PgPool, caller_id: Uuid) -> Res<LeadStatsResponse> {
    let (status_distribution, value_distribution) = futures::try_join!(
        db::lead::status_counts(pool, &caller_id),
        db::lead::value_sums(pool, &caller_id),
    )?;

    Ok(LeadStatsResponse {
        status_distribution,
        value_distribution,
    })
}
