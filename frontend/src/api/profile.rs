use super::{
    client::ApiClient,
    types::{ApiError, EmployeeProfile, OnboardingRequest, OnboardingResponse, ProfileUpdate},
};

impl ApiClient {
    pub async fn get_profile(&self) -> Result<EmployeeProfile, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| Ok(self.http_client().get(format!("{}/hrm/profile", base_url))))
            .await?;
        self.map_json_response(response).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<EmployeeProfile, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!("{}/hrm/profile", base_url))
                    .json(update))
            })
            .await?;
        self.map_json_response(response).await
    }

    pub async fn submit_onboarding(
        &self,
        request: &OnboardingRequest,
    ) -> Result<OnboardingResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/hrm/onboarding", base_url))
                    .json(request))
            })
            .await?;
        self.map_json_response(response).await
    }
}
