use crate::api::{ApiClient, ApiError, EmployeeProfile, ProfileUpdate};
use std::rc::Rc;

#[derive(Clone)]
pub struct ProfileRepository {
    client: Rc<ApiClient>,
}

impl ProfileRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn load(&self) -> Result<EmployeeProfile, ApiError> {
        self.client.get_profile().await
    }

    pub async fn update(&self, update: ProfileUpdate) -> Result<EmployeeProfile, ApiError> {
        self.client.update_profile(&update).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn update_sends_personal_fields() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(PUT).path("/api/hrm/profile");
            then.status(200).json_body(json!({
                "id": "e1",
                "employee_code": "EMP-001",
                "first_name": "花子",
                "last_name": "山田",
                "email": "hanako@example.com",
                "address": "東京都千代田区",
                "hire_date": "2020-04-01",
                "status": "active"
            }));
        });

        let repo = ProfileRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let profile = repo
            .update(ProfileUpdate {
                phone: None,
                address: Some("東京都千代田区".into()),
                emergency_contact_name: None,
                emergency_contact_phone: None,
            })
            .await
            .unwrap();
        assert_eq!(profile.address.as_deref(), Some("東京都千代田区"));
        let body = server
            .last_request(PUT, "/api/hrm/profile")
            .and_then(|r| r.body)
            .unwrap();
        assert_eq!(body["address"], "東京都千代田区");
    }
}
