use crate::pages::{
    employees::components::form::TextField,
    onboarding::{utils::OnboardingDraft, view_model::OnboardingViewModel},
    salary::utils::format_amount,
};
use leptos::*;

#[component]
pub fn PersonalStep(draft: OnboardingDraft) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <TextField label="姓" value=draft.last_name/>
            <TextField label="名" value=draft.first_name/>
            <TextField label="メールアドレス" value=draft.email input_type="email"/>
            <TextField label="電話番号" value=draft.phone input_type="tel"/>
            <TextField label="生年月日" value=draft.date_of_birth input_type="date"/>
        </div>
    }
}

#[component]
pub fn JobStep(draft: OnboardingDraft) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <TextField label="部署" value=draft.department/>
            <TextField label="役職" value=draft.position/>
            <TextField label="入社日" value=draft.hire_date input_type="date"/>
            <TextField label="上長の社員ID" value=draft.manager_id placeholder="任意"/>
        </div>
    }
}

#[component]
pub fn SalaryStep(vm: OnboardingViewModel) -> impl IntoView {
    let draft = vm.draft;
    let options = move || {
        vm.salary_options
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    };
    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <label class="block text-sm text-fg-muted space-y-1">
                <span>"給与体系"</span>
                <select
                    class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                    prop:value=move || draft.salary_structure_id.get()
                    on:change=move |ev| draft.salary_structure_id.set(event_target_value(&ev))
                >
                    <option value="">"選択しない"</option>
                    {move || {
                        options()
                            .into_iter()
                            .map(|structure| {
                                let label = format!(
                                    "{} ({})",
                                    structure.name,
                                    format_amount(structure.net_amount(), &structure.currency),
                                );
                                view! { <option value=structure.id>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <TextField label="基本給" value=draft.base_amount placeholder="給与体系の基本給を上書きする場合のみ"/>
        </div>
    }
}

#[component]
fn ReviewRow(label: &'static str, value: String) -> impl IntoView {
    let value = if value.is_empty() { "-".to_string() } else { value };
    view! {
        <div class="flex justify-between py-2">
            <dt class="text-fg-muted">{label}</dt>
            <dd class="text-fg">{value}</dd>
        </div>
    }
}

#[component]
pub fn ReviewStep(vm: OnboardingViewModel) -> impl IntoView {
    let draft = vm.draft;
    let structure_name = move || {
        let id = draft.salary_structure_id.get();
        vm.salary_options
            .get()
            .and_then(Result::ok)
            .and_then(|options| options.into_iter().find(|s| s.id == id))
            .map(|s| s.name)
            .unwrap_or_default()
    };
    view! {
        <dl class="divide-y divide-border text-sm">
            <ReviewRow
                label="氏名"
                value=format!("{} {}", draft.last_name.get_untracked(), draft.first_name.get_untracked())
            />
            <ReviewRow label="メールアドレス" value=draft.email.get_untracked()/>
            <ReviewRow label="電話番号" value=draft.phone.get_untracked()/>
            <ReviewRow label="生年月日" value=draft.date_of_birth.get_untracked()/>
            <ReviewRow label="部署" value=draft.department.get_untracked()/>
            <ReviewRow label="役職" value=draft.position.get_untracked()/>
            <ReviewRow label="入社日" value=draft.hire_date.get_untracked()/>
            <ReviewRow label="上長の社員ID" value=draft.manager_id.get_untracked()/>
            <ReviewRow label="給与体系" value=structure_name()/>
            <ReviewRow label="基本給" value=draft.base_amount.get_untracked()/>
        </dl>
    }
}
