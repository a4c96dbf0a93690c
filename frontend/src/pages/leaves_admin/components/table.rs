use crate::{
    api::{LeaveDecision, LeaveRequest},
    components::{
        cards::format_days,
        leave_labels::{leave_type_label, LeaveStatusBadge},
    },
    pages::leaves_admin::view_model::LeavesAdminViewModel,
    state::breakpoint::use_is_desktop,
    utils::time::format_date,
};
use leptos::*;

fn period(leave: &LeaveRequest) -> String {
    let days = if leave.half_day {
        "半日".to_string()
    } else {
        format_days(leave.days)
    };
    format!(
        "{} 〜 {}（{}）",
        format_date(leave.start_date),
        format_date(leave.end_date),
        days
    )
}

#[component]
fn DecisionButtons(vm: LeavesAdminViewModel, leave: LeaveRequest) -> impl IntoView {
    if !leave.is_pending() {
        return view! {
            <span class="text-xs text-fg-muted">
                {leave.decision_comment.clone().unwrap_or_default()}
            </span>
        }
        .into_view();
    }
    let for_reject = leave.clone();
    view! {
        <div class="flex gap-3 text-sm">
            <button
                class="text-status-success-text hover:underline"
                on:click=move |_| vm.request_decision(leave.clone(), LeaveDecision::Approve)
            >
                "承認"
            </button>
            <button
                class="text-status-error-text hover:underline"
                on:click=move |_| vm.request_decision(for_reject.clone(), LeaveDecision::Reject)
            >
                "却下"
            </button>
        </div>
    }
    .into_view()
}

#[component]
pub fn LeaveAdminTable(vm: LeavesAdminViewModel) -> impl IntoView {
    let is_desktop = use_is_desktop();
    let window = vm.list.window;
    let selection = vm.selection;
    let rows = move || window.with(|w| w.items.clone());
    let all_selected = move || {
        window.with(|w| {
            !w.items.is_empty() && selection.with(|s| w.items.iter().all(|l| s.contains(&l.id)))
        })
    };
    let checkbox = move |id: String| {
        let for_check = id.clone();
        view! {
            <input
                type="checkbox"
                aria-label="選択"
                prop:checked=move || selection.with(|s| s.contains(&for_check))
                on:change=move |_| vm.toggle_selected(&id)
            />
        }
    };

    view! {
        <Show
            when=move || is_desktop.get()
            fallback=move || {
                view! {
                    <ul class="space-y-3">
                        <For
                            each=rows
                            key=|leave| (leave.id.clone(), leave.status.clone())
                            children=move |leave| {
                                view! {
                                    <li class="bg-surface-elevated border border-border rounded-lg p-4 space-y-2">
                                        <div class="flex justify-between items-start">
                                            <div class="flex items-start gap-2">
                                                {checkbox(leave.id.clone())}
                                                <p class="font-semibold text-fg">
                                                    {leave.employee_name.clone().unwrap_or_else(|| leave.employee_id.clone())}
                                                </p>
                                            </div>
                                            <LeaveStatusBadge status=leave.status.clone()/>
                                        </div>
                                        <p class="text-sm text-fg-muted">{leave_type_label(&leave.leave_type).to_string()}</p>
                                        <p class="text-sm text-fg-muted">{period(&leave)}</p>
                                        <DecisionButtons vm=vm leave=leave/>
                                    </li>
                                }
                            }
                        />
                    </ul>
                }
            }
        >
            <div class="overflow-x-auto bg-surface-elevated border border-border rounded-lg">
                <table class="min-w-full divide-y divide-border text-sm">
                    <thead class="bg-surface-muted text-left text-fg-muted">
                        <tr>
                            <th class="px-4 py-2">
                                <input
                                    type="checkbox"
                                    aria-label="すべて選択"
                                    prop:checked=all_selected
                                    on:change=move |_| vm.toggle_select_all()
                                />
                            </th>
                            <th class="px-4 py-2">"従業員"</th>
                            <th class="px-4 py-2">"種別"</th>
                            <th class="px-4 py-2">"期間"</th>
                            <th class="px-4 py-2">"理由"</th>
                            <th class="px-4 py-2">"状態"</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border text-fg">
                        <For
                            each=rows
                            key=|leave| (leave.id.clone(), leave.status.clone())
                            children=move |leave| {
                                view! {
                                    <tr>
                                        <td class="px-4 py-2">{checkbox(leave.id.clone())}</td>
                                        <td class="px-4 py-2">
                                            {leave.employee_name.clone().unwrap_or_else(|| leave.employee_id.clone())}
                                        </td>
                                        <td class="px-4 py-2">{leave_type_label(&leave.leave_type).to_string()}</td>
                                        <td class="px-4 py-2">{period(&leave)}</td>
                                        <td class="px-4 py-2 text-fg-muted">{leave.reason.clone().unwrap_or_default()}</td>
                                        <td class="px-4 py-2"><LeaveStatusBadge status=leave.status.clone()/></td>
                                        <td class="px-4 py-2"><DecisionButtons vm=vm leave=leave/></td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
