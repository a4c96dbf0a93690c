use crate::{
    components::{
        common::{Button, ButtonVariant},
        layout::MessageBanner,
    },
    pages::employees::{utils::EMPLOYEE_STATUSES, view_model::EmployeesViewModel},
};
use leptos::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="block text-sm text-fg-muted space-y-1">
            <span>{label}</span>
            <input
                type=input_type.unwrap_or("text")
                placeholder=placeholder.unwrap_or_default()
                class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn EmployeeForm(vm: EmployeesViewModel) -> impl IntoView {
    let state = vm.form_state;
    let pending = vm.save_action.pending();
    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.submit_form();
            }
        >
            <MessageBanner messages=vm.form_messages/>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                <TextField label="姓" value=state.last_name/>
                <TextField label="名" value=state.first_name/>
                <TextField label="メールアドレス" value=state.email input_type="email"/>
                <TextField label="電話番号" value=state.phone input_type="tel"/>
                <TextField label="部署" value=state.department/>
                <TextField label="役職" value=state.position/>
                <TextField label="入社日" value=state.hire_date input_type="date" placeholder="YYYY-MM-DD"/>
                <label class="block text-sm text-fg-muted space-y-1">
                    <span>"在籍区分"</span>
                    <select
                        class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        prop:value=move || state.status.get()
                        on:change=move |ev| state.status.set(event_target_value(&ev))
                    >
                        {EMPLOYEE_STATUSES
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                </label>
                <TextField label="給与体系ID" value=state.salary_structure_id/>
            </div>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.close_editor()>
                    "キャンセル"
                </Button>
                <button
                    type="submit"
                    class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                    disabled=move || pending.get()
                >
                    {move || if pending.get() { "保存中..." } else { "保存" }}
                </button>
            </div>
        </form>
    }
}
