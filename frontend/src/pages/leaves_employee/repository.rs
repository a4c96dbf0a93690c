use crate::api::{ApiClient, ApiError, LeaveBalance, LeaveInput, LeaveRequest, ListResponse};
use crate::pagination::PageQuery;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SavedLeave {
    Created(LeaveRequest),
    Updated(LeaveRequest),
}

#[derive(Clone)]
pub struct MyLeavesRepository {
    client: Rc<ApiClient>,
}

impl MyLeavesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self, query: PageQuery) -> Result<ListResponse<LeaveRequest>, ApiError> {
        self.client.list_my_leaves(&query).await
    }

    pub async fn balance(&self) -> Result<Vec<LeaveBalance>, ApiError> {
        self.client.get_leave_balance().await
    }

    pub async fn save(&self, id: Option<String>, input: LeaveInput) -> Result<SavedLeave, ApiError> {
        match id {
            Some(id) => self
                .client
                .update_leave(&id, &input)
                .await
                .map(SavedLeave::Updated),
            None => self.client.create_leave(&input).await.map(SavedLeave::Created),
        }
    }

    pub async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_leave(id).await
    }
}
