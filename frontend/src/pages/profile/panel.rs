use crate::{
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, MessageBanner},
    },
    pages::profile::{
        components::{
            edit_form::ProfileEditForm,
            sections::{EmploymentSection, PersonalSection, SalarySection},
        },
        utils::ProfileTab,
        view_model::ProfileViewModel,
    },
};
use leptos::*;
use leptos_meta::Title;

#[component]
fn ProfileTabs(active: RwSignal<ProfileTab>) -> impl IntoView {
    view! {
        <div class="flex gap-2 border-b border-border">
            {ProfileTab::ALL
                .into_iter()
                .map(|tab| {
                    let class = move || {
                        if active.get() == tab {
                            "px-4 py-2 text-sm font-semibold text-fg border-b-2 border-action-primary-bg"
                        } else {
                            "px-4 py-2 text-sm text-fg-muted"
                        }
                    };
                    view! {
                        <button type="button" class=class on:click=move |_| active.set(tab)>
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let vm = ProfileViewModel::new();
    let profile = vm.profile();
    let load_error = vm.load_error();

    let body = move || {
        let Some(profile) = profile.get() else {
            return view! { <LoadingSpinner/> }.into_view();
        };
        match vm.active_tab.get() {
            ProfileTab::Personal if vm.editing.get() => view! { <ProfileEditForm vm=vm/> }.into_view(),
            ProfileTab::Personal => view! {
                <div class="space-y-4">
                    <PersonalSection profile=profile/>
                    <Button variant=ButtonVariant::Secondary on:click=move |_| vm.start_edit()>
                        "連絡先を編集"
                    </Button>
                </div>
            }
            .into_view(),
            ProfileTab::Employment => view! { <EmploymentSection profile=profile/> }.into_view(),
            ProfileTab::Salary => view! { <SalarySection profile=profile/> }.into_view(),
        }
    };

    view! {
        <Title text="プロフィール"/>
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"プロフィール"</h1>
                <MessageBanner messages=vm.messages/>
                <InlineErrorMessage
                    error=load_error
                    on_retry=Callback::new(move |_| vm.reload())
                />
                <ProfileTabs active=vm.active_tab/>
                <div class="bg-surface-elevated rounded-lg shadow-sm p-6">
                    <Show when=move || load_error.with(Option::is_none)>
                        {body}
                    </Show>
                </div>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::*, ssr::render_to_string};

    #[test]
    fn profile_page_renders_tabs() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <ProfilePage/> }
        });
        assert!(html.contains("プロフィール"));
        assert!(html.contains("個人情報"));
        assert!(html.contains("雇用情報"));
    }
}
