use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, ListResponse, SalaryStructure, SalaryStructureInput},
};
use crate::pagination::PageQuery;

impl ApiClient {
    pub async fn list_salary_structures(
        &self,
        query: &PageQuery,
    ) -> Result<ListResponse<SalaryStructure>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/hrm/salary-structures", base_url))
                    .query(&params))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn create_salary_structure(
        &self,
        input: &SalaryStructureInput,
    ) -> Result<SalaryStructure, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/salary-structures", base_url))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_salary_structure(
        &self,
        id: &str,
        input: &SalaryStructureInput,
    ) -> Result<SalaryStructure, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!(
                        "{}/hrm/salary-structures/{}",
                        base_url,
                        encode_segment(id)
                    ))
                    .json(input))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn delete_salary_structure(&self, id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self.http_client().delete(format!(
                    "{}/hrm/salary-structures/{}",
                    base_url,
                    encode_segment(id)
                )))
            })
            .await?;
        self.map_empty_response(response).await
    }

    /// `month` is `YYYY-MM`.
    pub async fn download_payslip(
        &self,
        employee_id: &str,
        month: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!(
                        "{}/hrm/payslips/{}",
                        base_url,
                        encode_segment(employee_id)
                    ))
                    .query(&[("month", month)]))
            })
            .await?;
        self.map_bytes_response(response).await
    }
}
