use crate::{
    components::{
        common::{Button, ButtonVariant},
        layout::{Layout, MessageBanner},
    },
    pages::onboarding::{
        components::{
            stepper::Stepper,
            steps::{JobStep, PersonalStep, ReviewStep, SalaryStep},
        },
        utils::OnboardingStep,
        view_model::OnboardingViewModel,
    },
};
use leptos::*;
use leptos_meta::Title;

#[component]
fn CreatedNotice(vm: OnboardingViewModel) -> impl IntoView {
    move || {
        vm.created.get().map(|created| {
            view! {
                <div class="space-y-4">
                    <p class="text-fg">"社員を登録しました。"</p>
                    <dl class="text-sm">
                        <dt class="text-fg-muted">"社員ID"</dt>
                        <dd class="text-fg">{created.employee_id}</dd>
                        <dt class="text-fg-muted">"社員番号"</dt>
                        <dd class="text-fg">{created.employee_code}</dd>
                    </dl>
                    <Button on:click=move |_| vm.start_over()>"続けて登録"</Button>
                </div>
            }
        })
    }
}

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let vm = OnboardingViewModel::new();
    let pending = vm.submit_action.pending();
    let step_body = move || match vm.step.get() {
        OnboardingStep::Personal => view! { <PersonalStep draft=vm.draft/> }.into_view(),
        OnboardingStep::Job => view! { <JobStep draft=vm.draft/> }.into_view(),
        OnboardingStep::Salary => view! { <SalaryStep vm=vm/> }.into_view(),
        OnboardingStep::Review => view! { <ReviewStep vm=vm/> }.into_view(),
    };

    view! {
        <Title text="入社手続き"/>
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"入社手続き"</h1>
                <MessageBanner messages=vm.messages/>
                <Show
                    when=move || vm.created.with(Option::is_none)
                    fallback=move || view! { <CreatedNotice vm=vm/> }
                >
                    <Stepper current=vm.step on_select=Callback::new(move |step| vm.jump_to(step))/>
                    <div class="bg-surface-elevated rounded-lg shadow-sm p-6">{step_body}</div>
                    <div class="flex justify-between">
                        <Button
                            variant=ButtonVariant::Secondary
                            disabled=Signal::derive(move || vm.step.get() == OnboardingStep::Personal)
                            on:click=move |_| vm.back()
                        >
                            "戻る"
                        </Button>
                        <Show
                            when=move || vm.step.get() == OnboardingStep::Review
                            fallback=move || view! { <Button on:click=move |_| vm.advance()>"次へ"</Button> }
                        >
                            <Button loading=pending on:click=move |_| vm.submit()>
                                "登録する"
                            </Button>
                        </Show>
                    </div>
                </Show>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::*, ssr::render_to_string};

    #[test]
    fn onboarding_starts_on_personal_step() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user(false)));
            view! { <OnboardingPage/> }
        });
        assert!(html.contains("1. 基本情報"));
        assert!(html.contains("4. 確認"));
        assert!(html.contains("次へ"));
        assert!(!html.contains("登録する"));
    }
}
