use crate::{
    api::{ApiClient, ApiError, OnboardingRequest, OnboardingResponse, SalaryStructure},
    pagination::{FilterSet, PageQuery},
};
use std::rc::Rc;

/// Upper bound on structures offered in the salary step.
const SALARY_OPTION_LIMIT: usize = 100;

#[derive(Clone)]
pub struct OnboardingRepository {
    client: Rc<ApiClient>,
}

impl OnboardingRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn salary_options(&self) -> Result<Vec<SalaryStructure>, ApiError> {
        let query = PageQuery::new(1, SALARY_OPTION_LIMIT, FilterSet::new());
        Ok(self.client.list_salary_structures(&query).await?.items)
    }

    pub async fn submit(&self, request: OnboardingRequest) -> Result<OnboardingResponse, ApiError> {
        self.client.submit_onboarding(&request).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::test_support::mock::*, pages::onboarding::utils::filled_draft,
        test_support::ssr::with_runtime,
    };
    use serde_json::json;

    #[tokio::test]
    async fn submit_posts_nested_sections() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/hrm/onboarding");
            then.status(201)
                .json_body(json!({ "employee_id": "e42", "employee_code": "EMP-042" }));
        });

        let request = with_runtime(|| filled_draft().to_request()).unwrap();
        let repo = OnboardingRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let created = repo.submit(request).await.unwrap();
        assert_eq!(created.employee_code, "EMP-042");

        let body = server
            .last_request(POST, "/api/hrm/onboarding")
            .and_then(|r| r.body)
            .unwrap();
        assert_eq!(body["personal"]["email"], "hanako@example.com");
        assert_eq!(body["job"]["hire_date"], "2025-04-01");
        assert_eq!(body["salary"]["base_amount"], 280000.0);
    }

    #[tokio::test]
    async fn salary_options_request_a_single_wide_page() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/hrm/salary-structures");
            then.status(200)
                .json_body(json!({ "page": 1, "per_page": 100, "total": 0, "items": [] }));
        });

        let repo = OnboardingRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        assert!(repo.salary_options().await.unwrap().is_empty());
        let request = server
            .last_request(GET, "/api/hrm/salary-structures")
            .unwrap();
        assert!(request
            .query
            .contains(&("per_page".to_string(), "100".to_string())));
    }
}
