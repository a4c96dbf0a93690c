use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

use crate::{
    components::guard::{RequireAdmin, RequireAuth, EMPLOYEE_HOME_PATH},
    pages::{
        employees::EmployeesPage, leaves_admin::LeavesAdminPage, leaves_employee::MyLeavesPage,
        onboarding::OnboardingPage, profile::ProfilePage, salary::SalaryPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/hrm/employees",
    "/hrm/leaves",
    "/hrm/my-leaves",
    "/hrm/salary",
    "/hrm/profile",
    "/hrm/onboarding",
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &[
    "/hrm/employees",
    "/hrm/leaves",
    "/hrm/salary",
    "/hrm/onboarding",
];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    provide_meta_context();
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path=EMPLOYEE_HOME_PATH/> }/>
                    <Route path="/hrm" view=|| view! { <Redirect path=EMPLOYEE_HOME_PATH/> }/>
                    <Route path="/hrm/employees" view=AdminEmployees/>
                    <Route path="/hrm/leaves" view=AdminLeaves/>
                    <Route path="/hrm/salary" view=AdminSalary/>
                    <Route path="/hrm/onboarding" view=AdminOnboarding/>
                    <Route path="/hrm/my-leaves" view=ProtectedMyLeaves/>
                    <Route path="/hrm/profile" view=ProtectedProfile/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn AdminEmployees() -> impl IntoView {
    view! { <RequireAdmin><EmployeesPage/></RequireAdmin> }
}

#[component]
fn AdminLeaves() -> impl IntoView {
    view! { <RequireAdmin><LeavesAdminPage/></RequireAdmin> }
}

#[component]
fn AdminSalary() -> impl IntoView {
    view! { <RequireAdmin><SalaryPage/></RequireAdmin> }
}

#[component]
fn AdminOnboarding() -> impl IntoView {
    view! { <RequireAdmin><OnboardingPage/></RequireAdmin> }
}

#[component]
fn ProtectedMyLeaves() -> impl IntoView {
    view! { <RequireAuth><MyLeavesPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}
