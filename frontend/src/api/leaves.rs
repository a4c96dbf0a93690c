use std::time::Duration;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, BulkActionSummary, LeaveBalance, LeaveBulkKind, LeaveBulkRequest,
        LeaveDecisionRequest, LeaveInput, LeaveRequest, LeaveStats, ListResponse,
    },
};
use crate::{config, pagination::PageQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    fn path(self) -> &'static str {
        match self {
            LeaveDecision::Approve => "approve",
            LeaveDecision::Reject => "reject",
        }
    }
}

fn decision_body(comment: Option<&str>) -> LeaveDecisionRequest {
    LeaveDecisionRequest {
        comment: comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    }
}

impl ApiClient {
    pub async fn list_leaves(
        &self,
        query: &PageQuery,
    ) -> Result<ListResponse<LeaveRequest>, ApiError> {
        self.get_leave_page("/hrm/leaves", query).await
    }

    pub async fn list_my_leaves(
        &self,
        query: &PageQuery,
    ) -> Result<ListResponse<LeaveRequest>, ApiError> {
        self.get_leave_page("/hrm/leaves/me", query).await
    }

    async fn get_leave_page(
        &self,
        path: &str,
        query: &PageQuery,
    ) -> Result<ListResponse<LeaveRequest>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}{}", base_url, path))
                    .query(&params))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn get_leave_stats(&self) -> Result<LeaveStats, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/leaves/stats", base_url)))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn get_leave_balance(&self) -> Result<Vec<LeaveBalance>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/leaves/balance", base_url)))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn decide_leave(
        &self,
        id: &str,
        decision: LeaveDecision,
        comment: Option<&str>,
    ) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = decision_body(comment);
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!(
                        "{}/hrm/leaves/{}/{}",
                        base_url,
                        encode_segment(id),
                        decision.path()
                    ))
                    .json(&body))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn bulk_leave_action(
        &self,
        action: LeaveBulkKind,
        ids: &[String],
        comment: Option<&str>,
    ) -> Result<BulkActionSummary, ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = LeaveBulkRequest {
            action,
            ids: ids.to_vec(),
            comment: decision_body(comment).comment,
        };
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/leaves/bulk", base_url))
                    .json(&body))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn export_leaves(&self, query: &PageQuery) -> Result<Vec<u8>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut params = query.filters.to_query();
        params.push(("format".to_string(), "pdf".to_string()));
        let timeout = Duration::from_secs(config::current().export_timeout_secs);
        let response = self
            .send_with_timeout(timeout, || {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/leaves/export", base_url))
                    .query(&params))
            })
            .await?;
        self.map_bytes_response(response).await
    }

    pub async fn create_leave(&self, input: &LeaveInput) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/leaves", base_url))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_leave(
        &self,
        id: &str,
        input: &LeaveInput,
    ) -> Result<LeaveRequest, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!("{}/hrm/leaves/{}", base_url, encode_segment(id)))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn delete_leave(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .delete(format!("{}/hrm/leaves/{}", base_url, encode_segment(id))))
            })
            .await?;
        self.map_empty_response(response).await
    }
}
