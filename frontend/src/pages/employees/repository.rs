use crate::api::{
    ApiClient, ApiError, BulkActionSummary, Employee, EmployeeInput, EmployeeStats, ListResponse,
};
use crate::pagination::PageQuery;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SavedEmployee {
    Created(Employee),
    Updated(Employee),
}

#[derive(Clone)]
pub struct EmployeesRepository {
    client: Rc<ApiClient>,
}

impl EmployeesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self, query: PageQuery) -> Result<ListResponse<Employee>, ApiError> {
        self.client.list_employees(&query).await
    }

    pub async fn stats(&self) -> Result<EmployeeStats, ApiError> {
        self.client.get_employee_stats().await
    }

    pub async fn save(
        &self,
        id: Option<String>,
        input: EmployeeInput,
    ) -> Result<SavedEmployee, ApiError> {
        match id {
            Some(id) => self
                .client
                .update_employee(&id, &input)
                .await
                .map(SavedEmployee::Updated),
            None => self
                .client
                .create_employee(&input)
                .await
                .map(SavedEmployee::Created),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_employee(id).await
    }

    pub async fn bulk_delete(&self, ids: &[String]) -> Result<BulkActionSummary, ApiError> {
        self.client.bulk_delete_employees(ids).await
    }

    pub async fn export(&self, query: PageQuery) -> Result<Vec<u8>, ApiError> {
        self.client.export_employees(&query).await
    }
}
