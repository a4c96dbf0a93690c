#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::UserResponse;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn admin_user(system_admin: bool) -> UserResponse {
        UserResponse {
            id: "u-admin".into(),
            username: "hr-admin".into(),
            full_name: "HR Admin".into(),
            role: "hr".into(),
            is_system_admin: system_admin,
            employee_id: Some("e-admin".into()),
        }
    }

    pub fn regular_user() -> UserResponse {
        UserResponse {
            id: "u-regular".into(),
            username: "member".into(),
            full_name: "Regular Employee".into(),
            role: "employee".into(),
            is_system_admin: false,
            employee_id: Some("e1".into()),
        }
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
