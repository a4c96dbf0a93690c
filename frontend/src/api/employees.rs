use std::time::Duration;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, BulkActionSummary, BulkIdsRequest, Employee, EmployeeInput, EmployeeStats,
        ListResponse,
    },
};
use crate::{config, pagination::PageQuery};

impl ApiClient {
    pub async fn list_employees(
        &self,
        query: &PageQuery,
    ) -> Result<ListResponse<Employee>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/employees", base_url))
                    .query(&params))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn get_employee_stats(&self) -> Result<EmployeeStats, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/employees/stats", base_url)))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn get_employee(&self, id: &str) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/employees/{}", base_url, encode_segment(id))))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/employees", base_url))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        input: &EmployeeInput,
    ) -> Result<Employee, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!("{}/hrm/employees/{}", base_url, encode_segment(id)))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .delete(format!("{}/hrm/employees/{}", base_url, encode_segment(id))))
            })
            .await?;
        self.map_empty_response(response).await
    }

    pub async fn bulk_delete_employees(
        &self,
        ids: &[String],
    ) -> Result<BulkActionSummary, ApiError> {
        let base_url = self.resolved_base_url().await;
        let body = BulkIdsRequest { ids: ids.to_vec() };
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/employees/bulk-delete", base_url))
                    .json(&body))
            })
            .await?;
        self.map_json_response(response).await
    }

    /// Downloads the filtered employee list as an Excel workbook. Unlike other
    /// calls this one is bounded by the configured export timeout.
    pub async fn export_employees(&self, query: &PageQuery) -> Result<Vec<u8>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut params = query.filters.to_query();
        params.push(("format".to_string(), "xlsx".to_string()));
        let timeout = Duration::from_secs(config::current().export_timeout_secs);
        let response = self
            .send_with_timeout(timeout, || {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/employees/export", base_url))
                    .query(&params))
            })
            .await?;
        self.map_bytes_response(response).await
    }
}
