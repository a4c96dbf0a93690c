use crate::api::{ApiClient, ApiError, UserResponse};
use leptos::*;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Session of the signed-in user. Sign-in itself lives in the host
/// application; this crate only reads `/auth/me`.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn is_hr_admin(&self) -> bool {
        self.user.as_ref().map(UserResponse::is_hr_admin).unwrap_or(false)
    }

    pub fn employee_id(&self) -> Option<String> {
        self.user.as_ref().and_then(|user| user.employee_id.clone())
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    spawn_local(async move {
        let result = check_auth_status(&api_client).await;
        apply_auth_result(set_auth_state, result);
    });

    (auth_state, set_auth_state)
}

pub(crate) fn apply_auth_result(
    set_auth_state: WriteSignal<AuthState>,
    result: Result<UserResponse, ApiError>,
) {
    set_auth_state.update(|state| {
        state.loading = false;
        match result {
            Ok(user) => {
                state.user = Some(user);
                state.is_authenticated = true;
            }
            Err(err) => {
                log::debug!("No active session: {}", err);
                state.user = None;
                state.is_authenticated = false;
            }
        }
    });
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

async fn check_auth_status(api_client: &ApiClient) -> Result<UserResponse, ApiError> {
    api_client.get_me().await
}
