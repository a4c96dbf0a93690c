use crate::{
    components::{
        common::{Button, ButtonVariant},
        layout::MessageBanner,
        leave_labels::LEAVE_TYPES,
    },
    pages::leaves_employee::view_model::MyLeavesViewModel,
};
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg";

#[component]
pub fn LeaveRequestForm(vm: MyLeavesViewModel) -> impl IntoView {
    let state = vm.form_state;
    let leave_type = state.leave_type_signal();
    let start = state.start_signal();
    let end = state.end_signal();
    let half_day = state.half_day_signal();
    let reason = state.reason_signal();
    let pending = vm.save_action.pending();

    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.submit();
            }
        >
            <MessageBanner messages=vm.form_messages/>
            <label class="block text-sm text-fg-muted space-y-1">
                <span>"休暇種別"</span>
                <select
                    class=INPUT_CLASS
                    prop:value=move || leave_type.get()
                    on:change=move |ev| leave_type.set(event_target_value(&ev))
                >
                    {LEAVE_TYPES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </label>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                <label class="block text-sm text-fg-muted space-y-1">
                    <span>"開始日"</span>
                    <input
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || start.get()
                        on:input=move |ev| start.set(event_target_value(&ev))
                    />
                </label>
                <label class="block text-sm text-fg-muted space-y-1">
                    <span>"終了日"</span>
                    <input
                        type="date"
                        class=INPUT_CLASS
                        prop:value=move || end.get()
                        on:input=move |ev| end.set(event_target_value(&ev))
                    />
                </label>
            </div>
            <label class="inline-flex items-center gap-2 text-sm text-fg">
                <input
                    type="checkbox"
                    prop:checked=move || half_day.get()
                    on:change=move |ev| half_day.set(event_target_checked(&ev))
                />
                "半日休暇"
            </label>
            <label class="block text-sm text-fg-muted space-y-1">
                <span>"理由"</span>
                <textarea
                    class=INPUT_CLASS
                    rows="3"
                    prop:value=move || reason.get()
                    on:input=move |ev| reason.set(event_target_value(&ev))
                ></textarea>
            </label>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.close_form()>
                    "キャンセル"
                </Button>
                <button
                    type="submit"
                    class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                    disabled=move || pending.get()
                >
                    {move || if vm.editing.with(Option::is_some) { "更新する" } else { "申請する" }}
                </button>
            </div>
        </form>
    }
}
