use crate::{
    components::error::InlineErrorMessage,
    state::{auth::use_auth, message::MessageState},
};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub admin_only: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { href: "/hrm/profile", label: "プロフィール", admin_only: false },
    NavItem { href: "/hrm/my-leaves", label: "休暇申請", admin_only: false },
    NavItem { href: "/hrm/employees", label: "従業員", admin_only: true },
    NavItem { href: "/hrm/leaves", label: "休暇管理", admin_only: true },
    NavItem { href: "/hrm/salary", label: "給与体系", admin_only: true },
    NavItem { href: "/hrm/onboarding", label: "入社手続き", admin_only: true },
];

pub fn visible_nav_items(is_admin: bool) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .copied()
        .filter(|item| is_admin || !item.admin_only)
        .collect()
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let is_admin = create_memo(move |_| auth.get().is_hr_admin());
    let user_name = move || {
        auth.get()
            .user
            .map(|user| user.full_name)
            .unwrap_or_default()
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"HRM"</h1>
                    <div class="flex items-center gap-2">
                        <nav class="hidden lg:flex space-x-4">
                            {move || {
                                visible_nav_items(is_admin.get())
                                    .into_iter()
                                    .map(|item| view! { <a href=item.href class=NAV_LINK_CLASS>{item.label}</a> })
                                    .collect_view()
                            }}
                        </nav>
                        <span class="hidden lg:inline text-sm text-fg-muted">{user_name}</span>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "メニューを閉じる" } else { "メニューを開く" }}
                            </span>
                            <svg class="h-6 w-6" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"/>
                            </svg>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {move || {
                                visible_nav_items(is_admin.get())
                                    .into_iter()
                                    .map(|item| view! {
                                        <a
                                            href=item.href
                                            class=format!("block {}", NAV_LINK_CLASS)
                                            on:click=move |_| set_menu_open.set(false)
                                        >
                                            {item.label}
                                        </a>
                                    })
                                    .collect_view()
                            }}
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Renders whichever of the shared success/error messages is set.
#[component]
pub fn MessageBanner(messages: RwSignal<MessageState>) -> impl IntoView {
    let error = Signal::derive(move || messages.with(|m| m.error.clone()));
    view! {
        {move || messages.with(|m| m.success.clone()).map(|msg| view! { <SuccessMessage message=msg /> })}
        <InlineErrorMessage error=error />
    }
}
