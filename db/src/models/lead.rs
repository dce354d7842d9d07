use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lead pipeline stage. Stored as the `lead_status` Postgres enum; variant
/// names map to the database labels verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "lead_status")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Lost,
}

impl LeadStatus {
    pub fn parse(value: &str) -> Option<LeadStatus> {
        match value {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Converted" => Some(LeadStatus::Converted),
            "Lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: LeadStatus,
    pub value: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One `GROUP BY status` row of the count distribution.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct LeadStatusCount {
    pub status: LeadStatus,
    pub count: i64,
}

/// One `GROUP BY status` row of the summed-value distribution.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct LeadStatusValue {
    pub status: LeadStatus,
    pub total_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("New", Some(LeadStatus::New))]
    #[case("Contacted", Some(LeadStatus::Contacted))]
    #[case("Converted", Some(LeadStatus::Converted))]
    #[case("Lost", Some(LeadStatus::Lost))]
    #[case("new", None)]
    #[case("Won", None)]
    fn parses_exact_status_labels(#[case] raw: &str, #[case] expected: Option<LeadStatus>) {
        assert_eq!(LeadStatus::parse(raw), expected);
    }

    #[test]
    fn status_defaults_to_new() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
    }

    #[test]
    fn status_serializes_as_its_label() {
        assert_eq!(
            serde_json::to_value(LeadStatus::Contacted).expect("serializes"),
            serde_json::json!("Contacted")
        );
    }
}
