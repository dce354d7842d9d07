use uuid::Uuid;

use crate::models::lead::LeadStatus;

pub struct LeadCreate {
    pub customer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: LeadStatus,
    pub value: Option<f64>,
}

/// Partial update; `None` fields keep their current value.
pub struct LeadUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<LeadStatus>,
    pub value: Option<f64>,
}

/// Listing filter. `owner_id` is always present: lead visibility is derived
/// from the parent customer's owner, so every listing joins through it.
pub struct LeadFilter {
    pub owner_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub status: Option<LeadStatus>,
}
