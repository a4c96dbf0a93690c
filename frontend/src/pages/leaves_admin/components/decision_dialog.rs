use crate::{
    api::LeaveDecision,
    components::{
        common::{Button, ButtonVariant},
        leave_labels::leave_type_label,
        modal::Modal,
    },
    pages::leaves_admin::view_model::LeavesAdminViewModel,
    utils::time::format_date,
};
use leptos::*;

#[component]
pub fn DecisionDialog(vm: LeavesAdminViewModel) -> impl IntoView {
    let pending = vm.pending_decision;
    let is_open = Signal::derive(move || pending.with(Option::is_some));
    let title = Signal::derive(move || match pending.with(|p| p.as_ref().map(|(_, d)| *d)) {
        Some(LeaveDecision::Reject) => "休暇申請の却下".to_string(),
        _ => "休暇申請の承認".to_string(),
    });
    let summary = move || {
        pending.with(|p| {
            p.as_ref().map(|(leave, _)| {
                format!(
                    "{} / {} / {} 〜 {}",
                    leave.employee_name.clone().unwrap_or_else(|| leave.employee_id.clone()),
                    leave_type_label(&leave.leave_type),
                    format_date(leave.start_date),
                    format_date(leave.end_date),
                )
            })
        })
    };
    let is_reject = Signal::derive(move || {
        pending.with(|p| matches!(p, Some((_, LeaveDecision::Reject))))
    });

    view! {
        <Modal is_open=is_open title=title on_close=Callback::new(move |_| pending.set(None))>
            <div class="space-y-4">
                <p class="text-sm text-fg">{summary}</p>
                <label class="block text-sm text-fg-muted space-y-1">
                    <span>"コメント（任意）"</span>
                    <textarea
                        class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        rows="3"
                        prop:value=move || vm.decision_comment.get()
                        on:input=move |ev| vm.decision_comment.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="flex justify-end gap-2">
                    <Button variant=ButtonVariant::Secondary on:click=move |_| pending.set(None)>
                        "キャンセル"
                    </Button>
                    <Button
                        variant=if is_reject.get_untracked() { ButtonVariant::Danger } else { ButtonVariant::Primary }
                        loading=vm.decide_action.pending()
                        on:click=move |_| vm.confirm_decision()
                    >
                        {move || if is_reject.get() { "却下する" } else { "承認する" }}
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
