use crate::pages::onboarding::utils::OnboardingStep;
use leptos::*;

#[component]
pub fn Stepper(
    current: RwSignal<OnboardingStep>,
    on_select: Callback<OnboardingStep>,
) -> impl IntoView {
    view! {
        <ol class="flex gap-4 text-sm">
            {OnboardingStep::ALL
                .into_iter()
                .map(|step| {
                    let class = move || {
                        let current = current.get();
                        if step == current {
                            "font-semibold text-fg"
                        } else if step < current {
                            "text-action-primary-bg cursor-pointer"
                        } else {
                            "text-fg-muted"
                        }
                    };
                    view! {
                        <li class=class on:click=move |_| on_select.call(step)>
                            {format!("{}. {}", step.number(), step.label())}
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
