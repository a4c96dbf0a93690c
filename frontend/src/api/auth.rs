use super::{client::ApiClient, types::{ApiError, UserResponse}};

impl ApiClient {
    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| Ok(self.http_client().get(format!("{}/auth/me", base_url))))
            .await?;
        self.map_json_response(response).await
    }
}
