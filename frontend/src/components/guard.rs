use crate::{
    api::UserResponse, components::layout::LoadingSpinner, state::auth::use_auth,
    utils::navigation::redirect,
};
use leptos::*;

pub const LOGIN_PATH: &str = "/login";
pub const EMPLOYEE_HOME_PATH: &str = "/hrm/profile";

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if let Some(target) = redirect_target(state.is_authenticated, state.loading, true) {
            redirect(target);
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// HR pages: employees, leave administration, salary and onboarding.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let is_admin = create_memo(move |_| is_admin_user(auth.get().user.as_ref()));
    create_effect(move |_| {
        let state = auth.get();
        let admin = is_admin_user(state.user.as_ref());
        if let Some(target) = redirect_target(state.is_authenticated, state.loading, admin) {
            redirect(target);
        }
    });
    view! {
        <Show
            when=move || {
                should_render_admin_children(is_authenticated.get(), is_loading.get(), is_admin.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn is_admin_user(user: Option<&UserResponse>) -> bool {
    user.map(UserResponse::is_hr_admin).unwrap_or(false)
}

fn should_render_admin_children(is_authenticated: bool, is_loading: bool, is_admin: bool) -> bool {
    is_authenticated && is_admin && !is_loading
}

fn redirect_target(is_authenticated: bool, is_loading: bool, allowed: bool) -> Option<&'static str> {
    if is_loading {
        None
    } else if !is_authenticated {
        Some(LOGIN_PATH)
    } else if !allowed {
        Some(EMPLOYEE_HOME_PATH)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, regular_user};

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn admin_guard_accepts_hr_role_or_system_admin() {
        let hr = admin_user(false);
        let system_admin = UserResponse {
            role: "employee".into(),
            ..admin_user(true)
        };
        assert!(!is_admin_user(None));
        assert!(!is_admin_user(Some(&regular_user())));
        assert!(is_admin_user(Some(&hr)));
        assert!(is_admin_user(Some(&system_admin)));
    }

    #[test]
    fn admin_guard_blocks_non_admins() {
        assert!(!should_render_admin_children(false, true, false));
        assert!(!should_render_admin_children(false, false, true));
        assert!(!should_render_admin_children(true, true, true));
        assert!(!should_render_admin_children(true, false, false));
        assert!(should_render_admin_children(true, false, true));
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(redirect_target(false, true, false), None);
        assert_eq!(redirect_target(false, false, true), Some(LOGIN_PATH));
        assert_eq!(redirect_target(true, false, false), Some(EMPLOYEE_HOME_PATH));
        assert_eq!(redirect_target(true, false, true), None);
    }
}
