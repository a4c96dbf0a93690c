use crate::{
    api::LeaveRequest,
    components::{
        cards::format_days,
        leave_labels::{leave_type_label, LeaveStatusBadge},
    },
    pages::leaves_employee::view_model::MyLeavesViewModel,
    state::breakpoint::use_is_desktop,
    utils::time::{format_date, format_datetime},
};
use leptos::*;

#[component]
fn PendingActions(vm: MyLeavesViewModel, leave: LeaveRequest) -> impl IntoView {
    if !leave.is_pending() {
        return ().into_view();
    }
    let for_cancel = leave.clone();
    view! {
        <div class="flex gap-3 text-sm">
            <button class="text-link hover:underline" on:click=move |_| vm.open_edit(&leave)>
                "編集"
            </button>
            <button
                class="text-status-error-text hover:underline"
                on:click=move |_| vm.pending_cancel.set(Some(for_cancel.clone()))
            >
                "取消"
            </button>
        </div>
    }
    .into_view()
}

fn dates(leave: &LeaveRequest) -> String {
    if leave.start_date == leave.end_date {
        format_date(leave.start_date)
    } else {
        format!("{} 〜 {}", format_date(leave.start_date), format_date(leave.end_date))
    }
}

fn duration(leave: &LeaveRequest) -> String {
    if leave.half_day {
        "半日".into()
    } else {
        format_days(leave.days)
    }
}

#[component]
pub fn MyLeavesList(vm: MyLeavesViewModel) -> impl IntoView {
    let is_desktop = use_is_desktop();
    let window = vm.list.window;
    let rows = move || window.with(|w| w.items.clone());

    view! {
        <Show
            when=move || is_desktop.get()
            fallback=move || {
                view! {
                    <ul class="space-y-3">
                        {move || {
                            rows()
                                .into_iter()
                                .map(|leave| {
                                    view! {
                                        <li class="bg-surface-elevated border border-border rounded-lg p-4 space-y-2">
                                            <div class="flex justify-between">
                                                <p class="font-semibold text-fg">
                                                    {leave_type_label(&leave.leave_type).to_string()}
                                                </p>
                                                <LeaveStatusBadge status=leave.status.clone()/>
                                            </div>
                                            <p class="text-sm text-fg-muted">
                                                {format!("{}（{}）", dates(&leave), duration(&leave))}
                                            </p>
                                            <PendingActions vm=vm leave=leave/>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                }
            }
        >
            <div class="overflow-x-auto bg-surface-elevated border border-border rounded-lg">
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted text-left text-fg-muted">
                        <tr>
                            <th class="px-4 py-2">"申請日時"</th>
                            <th class="px-4 py-2">"種別"</th>
                            <th class="px-4 py-2">"期間"</th>
                            <th class="px-4 py-2">"日数"</th>
                            <th class="px-4 py-2">"状態"</th>
                            <th class="px-4 py-2">"コメント"</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border text-fg">
                        {move || {
                            rows()
                                .into_iter()
                                .map(|leave| {
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2">{format_datetime(leave.created_at)}</td>
                                            <td class="px-4 py-2">{leave_type_label(&leave.leave_type).to_string()}</td>
                                            <td class="px-4 py-2">{dates(&leave)}</td>
                                            <td class="px-4 py-2">{duration(&leave)}</td>
                                            <td class="px-4 py-2"><LeaveStatusBadge status=leave.status.clone()/></td>
                                            <td class="px-4 py-2 text-fg-muted">
                                                {leave.decision_comment.clone().unwrap_or_default()}
                                            </td>
                                            <td class="px-4 py-2"><PendingActions vm=vm leave=leave/></td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::leaves_admin::utils::sample_leave;

    #[test]
    fn single_day_shows_one_date() {
        let mut leave = sample_leave("l1", "pending", 1);
        assert_eq!(dates(&leave), "2025/03/10 〜 2025/03/12");
        leave.end_date = leave.start_date;
        leave.half_day = true;
        assert_eq!(dates(&leave), "2025/03/10");
        assert_eq!(duration(&leave), "半日");
    }
}
