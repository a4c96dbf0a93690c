use crate::{
    components::leave_labels::{LEAVE_STATUSES, LEAVE_TYPES},
    pages::leaves_admin::view_model::LeavesAdminViewModel,
};
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg";

#[component]
pub fn LeaveAdminFilters(vm: LeavesAdminViewModel) -> impl IntoView {
    let filters = vm.list.filters;
    let draft = vm.draft;
    view! {
        <div class="bg-surface-elevated border border-border rounded-lg p-4 space-y-3">
            <div class="flex flex-wrap gap-2" role="group" aria-label="ステータス">
                {LEAVE_STATUSES
                    .iter()
                    .map(|(value, label)| {
                        let value = *value;
                        let active = move || filters.with(|f| f.contains("status", value));
                        view! {
                            <button
                                class=move || {
                                    if active() {
                                        "px-3 py-1 rounded-full text-sm bg-action-primary-bg text-action-primary-text"
                                    } else {
                                        "px-3 py-1 rounded-full text-sm border border-border text-fg"
                                    }
                                }
                                aria-pressed=move || active().to_string()
                                on:click=move |_| vm.toggle_status(value)
                            >
                                {*label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-4 gap-3">
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"休暇種別"</span>
                    <select
                        class=INPUT_CLASS
                        prop:value=move || draft.leave_type.get()
                        on:change=move |ev| draft.leave_type.set(event_target_value(&ev))
                    >
                        <option value="">"すべて"</option>
                        {LEAVE_TYPES
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"従業員ID"</span>
                    <input
                        type="text"
                        class=INPUT_CLASS
                        prop:value=move || draft.employee_id.get()
                        on:input=move |ev| draft.employee_id.set(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"期間（開始）"</span>
                    <input
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || draft.from.get()
                        on:input=move |ev| draft.from.set(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"期間（終了）"</span>
                    <input
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || draft.to.get()
                        on:input=move |ev| draft.to.set(event_target_value(&ev))
                    />
                </label>
            </div>
            <div class="flex justify-end gap-3">
                <button class="text-sm text-fg-muted underline" on:click=move |_| vm.clear_filters()>
                    "条件をクリア"
                </button>
                <button
                    class="px-4 py-2 rounded-md text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                    on:click=move |_| vm.apply_draft()
                >
                    "検索"
                </button>
            </div>
        </div>
    }
}
