use common::{
    error::{AppError, Res},
    pagination::Pagination,
};
use db::models::lead::{Lead, LeadStatus, LeadStatusCount, LeadStatusValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    pub customer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<LeadStatus>,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<LeadStatus>,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    pub customer_id: Option<Uuid>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub leads: Vec<Lead>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct LeadStatsResponse {
    pub status_distribution: Vec<LeadStatusCount>,
    pub value_distribution: Vec<LeadStatusValue>,
}

/// Maps the raw `status` query parameter to an optional filter. The sentinel
/// `"all"` and the empty string mean "no filter"; anything else must be an
/// exact status label.
pub(crate) fn parse_status_filter(raw: Option<&str>) -> Res<Option<LeadStatus>> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => LeadStatus::parse(value)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown lead status: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("all"), None)]
    #[case(Some("New"), Some(LeadStatus::New))]
    #[case(Some("Lost"), Some(LeadStatus::Lost))]
    fn maps_sentinels_and_labels(#[case] raw: Option<&str>, #[case] expected: Option<LeadStatus>) {
        assert_eq!(parse_status_filter(raw).expect("parses"), expected);
    }

    #[rstest]
    #[case("ALL")]
    #[case("new")]
    #[case("Pending")]
    fn rejects_unknown_labels(#[case] raw: &str) {
        let error = parse_status_filter(Some(raw)).expect_err("rejected");
        assert!(matches!(error, AppError::BadRequest(_)));
    }

    #[test]
    fn empty_stats_serialize_as_two_empty_distributions() {
        let stats = LeadStatsResponse {
            status_distribution: vec![],
            value_distribution: vec![],
        };
        assert_eq!(
            serde_json::to_value(&stats).expect("serializes"),
            serde_json::json!({ "status_distribution": [], "value_distribution": [] })
        );
    }
}
