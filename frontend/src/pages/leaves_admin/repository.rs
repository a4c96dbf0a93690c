use crate::api::{
    ApiClient, ApiError, BulkActionSummary, LeaveBulkKind, LeaveDecision, LeaveRequest,
    LeaveStats, ListResponse,
};
use crate::pagination::PageQuery;
use std::rc::Rc;

#[derive(Clone)]
pub struct LeavesAdminRepository {
    client: Rc<ApiClient>,
}

impl LeavesAdminRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self, query: PageQuery) -> Result<ListResponse<LeaveRequest>, ApiError> {
        self.client.list_leaves(&query).await
    }

    pub async fn stats(&self) -> Result<LeaveStats, ApiError> {
        self.client.get_leave_stats().await
    }

    pub async fn decide(
        &self,
        id: &str,
        decision: LeaveDecision,
        comment: Option<&str>,
    ) -> Result<LeaveRequest, ApiError> {
        self.client.decide_leave(id, decision, comment).await
    }

    pub async fn bulk(
        &self,
        kind: LeaveBulkKind,
        ids: &[String],
        comment: Option<&str>,
    ) -> Result<BulkActionSummary, ApiError> {
        self.client.bulk_leave_action(kind, ids, comment).await
    }

    pub async fn export(&self, query: PageQuery) -> Result<Vec<u8>, ApiError> {
        self.client.export_leaves(&query).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn decide_and_bulk_hit_expected_endpoints() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(PUT).path("/api/hrm/leaves/l1/reject");
            then.status(200).json_body(json!({
                "id": "l1",
                "employee_id": "e1",
                "leave_type": "annual",
                "start_date": "2025-03-10",
                "end_date": "2025-03-12",
                "status": "rejected",
                "decision_comment": "繁忙期のため",
                "created_at": "2025-03-01T09:00:00Z"
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/hrm/leaves/bulk");
            then.status(200)
                .json_body(json!({"succeeded": 2, "failed": 0, "errors": []}));
        });

        let repo =
            LeavesAdminRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let leave = repo
            .decide("l1", LeaveDecision::Reject, Some("繁忙期のため"))
            .await
            .unwrap();
        assert_eq!(leave.status, "rejected");

        let summary = repo
            .bulk(LeaveBulkKind::Approve, &["l2".into(), "l3".into()], None)
            .await
            .unwrap();
        assert_eq!(summary.succeeded, 2);
        let body = server
            .last_request(POST, "/api/hrm/leaves/bulk")
            .and_then(|r| r.body)
            .unwrap();
        assert_eq!(body["action"], "approve");
        assert!(body.get("comment").is_none());
    }
}
