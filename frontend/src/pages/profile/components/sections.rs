use crate::{
    api::EmployeeProfile,
    pages::{
        employees::utils::status_label,
        salary::utils::{format_amount, kind_label},
    },
    utils::time::format_date,
};
use leptos::*;

#[component]
fn Field(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    let value = if value.is_empty() { "-".to_string() } else { value };
    view! {
        <div>
            <dt class="text-xs text-fg-muted">{label}</dt>
            <dd class="text-sm text-fg">{value}</dd>
        </div>
    }
}

#[component]
pub fn PersonalSection(profile: EmployeeProfile) -> impl IntoView {
    view! {
        <dl class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <Field label="氏名" value=profile.full_name()/>
            <Field label="メールアドレス" value=profile.email.clone()/>
            <Field label="電話番号" value=profile.phone.clone().unwrap_or_default()/>
            <Field label="住所" value=profile.address.clone().unwrap_or_default()/>
            <Field
                label="緊急連絡先"
                value=profile.emergency_contact_name.clone().unwrap_or_default()
            />
            <Field
                label="緊急連絡先の電話番号"
                value=profile.emergency_contact_phone.clone().unwrap_or_default()
            />
        </dl>
    }
}

#[component]
pub fn EmploymentSection(profile: EmployeeProfile) -> impl IntoView {
    view! {
        <dl class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <Field label="社員番号" value=profile.employee_code.clone()/>
            <Field label="部署" value=profile.department.clone().unwrap_or_default()/>
            <Field label="役職" value=profile.position.clone().unwrap_or_default()/>
            <Field label="上長" value=profile.manager_name.clone().unwrap_or_default()/>
            <Field label="入社日" value=format_date(profile.hire_date)/>
            <Field label="在籍区分" value=status_label(&profile.status).to_string()/>
        </dl>
    }
}

#[component]
pub fn SalarySection(profile: EmployeeProfile) -> impl IntoView {
    let Some(structure) = profile.salary_structure else {
        return view! {
            <p class="text-sm text-fg-muted">"給与体系が割り当てられていません。"</p>
        }
        .into_view();
    };
    let currency = structure.currency.clone();
    let net = format_amount(structure.net_amount(), &structure.currency);
    view! {
        <div class="space-y-4">
            <dl class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                <Field label="給与体系" value=structure.name.clone()/>
                <Field label="基本給" value=format_amount(structure.base_amount, &currency)/>
                <Field label="差引支給額" value=net/>
            </dl>
            <ul class="divide-y divide-border text-sm">
                {structure
                    .components
                    .into_iter()
                    .map(|component| {
                        let amount = format_amount(component.amount, &currency);
                        view! {
                            <li class="flex justify-between py-2">
                                <span>{component.name}" ("{kind_label(component.kind)}")"</span>
                                <span class="text-fg">{amount}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
    .into_view()
}
