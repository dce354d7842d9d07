use common::{
    error::{AppError, Res},
    pagination::{PageRequest, Pagination},
};
use db::{
    dtos::customer::{CustomerCreate, CustomerUpdate},
    models::customer::Customer,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::customer::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerListQuery, CustomerListResponse,
    UpdateCustomerRequest,
};

const DEFAULT_PAGE_SIZE: i64 = 5;

/// Creates a customer owned by the caller. Any ownership information in the
/// payload is ignored by construction: the request DTO has no owner field.
pub(crate) async fn create_customer(
    pool: &PgPool,
    caller_id: Uuid,
    req: CreateCustomerRequest,
) -> Res<Customer> {
    db::customer::insert_customer(
        pool,
        CustomerCreate {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            owner_id: caller_id,
        },
    )
    .await
}

/// Lists the caller's customers, filtered by a case-insensitive substring
/// search over name or email, with the pagination envelope counted before
/// the page window is applied.
pub(crate) async fn list_customers(
    pool: &PgPool,
    caller_id: Uuid,
    query: CustomerListQuery,
) -> Res<CustomerListResponse> {
    let page = PageRequest::clamped(query.page, query.limit, DEFAULT_PAGE_SIZE);
    let search = query.search.unwrap_or_default();

    let (customers, total) = futures::try_join!(
        db::customer::get_customers_page(pool, &caller_id, &search, page.limit, page.offset()),
        db::customer::count_customers(pool, &caller_id, &search),
    )?;

    Ok(CustomerListResponse {
        customers,
        pagination: Pagination::new(page, total),
    })
}

/// Fetches one owned customer together with all of its leads.
pub(crate) async fn get_customer(
    pool: &PgPool,
    caller_id: Uuid,
    customer_id: Uuid,
) -> Res<CustomerDetailResponse> {
    let customer = db::customer::get_customer_by_id_and_owner(pool, &customer_id, &caller_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let leads = db::lead::get_leads_by_customer(pool, &customer.id).await?;

    Ok(CustomerDetailResponse { customer, leads })
}

pub(crate) async fn update_customer(
    pool: &PgPool,
    caller_id: Uuid,
    customer_id: Uuid,
    req: UpdateCustomerRequest,
) -> Res<Customer> {
    db::customer::update_customer(
        pool,
        &customer_id,
        &caller_id,
        CustomerUpdate {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
}

/// Deletes an owned customer; its leads go with it (cascade).
pub(crate) async fn delete_customer(pool: &PgPool, caller_id: Uuid, customer_id: Uuid) -> Res<()> {
    let deleted = db::customer::delete_customer(pool, &customer_id, &caller_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }
    Ok(())
}
