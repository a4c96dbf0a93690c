use crate::api::{ApiClient, ApiError, ListResponse, SalaryStructure, SalaryStructureInput};
use crate::pagination::PageQuery;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SavedStructure {
    Created(SalaryStructure),
    Updated(SalaryStructure),
}

#[derive(Clone)]
pub struct SalaryRepository {
    client: Rc<ApiClient>,
}

impl SalaryRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self, query: PageQuery) -> Result<ListResponse<SalaryStructure>, ApiError> {
        self.client.list_salary_structures(&query).await
    }

    pub async fn save(
        &self,
        id: Option<String>,
        input: SalaryStructureInput,
    ) -> Result<SavedStructure, ApiError> {
        match id {
            Some(id) => self
                .client
                .update_salary_structure(&id, &input)
                .await
                .map(SavedStructure::Updated),
            None => self
                .client
                .create_salary_structure(&input)
                .await
                .map(SavedStructure::Created),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_salary_structure(id).await
    }

    pub async fn payslip(&self, employee_id: &str, month: &str) -> Result<Vec<u8>, ApiError> {
        self.client.download_payslip(employee_id, month).await
    }
}
