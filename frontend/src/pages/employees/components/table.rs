use crate::{
    api::Employee,
    pages::employees::{
        utils::{status_badge_class, status_label},
        view_model::EmployeesViewModel,
    },
    state::breakpoint::use_is_desktop,
    utils::time::format_date,
};
use leptos::*;

#[component]
fn StatusBadge(status: String) -> impl IntoView {
    view! {
        <span class=format!("px-2 py-0.5 rounded-full text-xs font-medium {}", status_badge_class(&status))>
            {status_label(&status).to_string()}
        </span>
    }
}

#[component]
fn RowActions(vm: EmployeesViewModel, employee: Employee) -> impl IntoView {
    let for_edit = employee.clone();
    view! {
        <div class="flex gap-3 text-sm">
            <button class="text-link hover:underline" on:click=move |_| vm.open_edit(&for_edit)>
                "編集"
            </button>
            <button
                class="text-status-error-text hover:underline"
                on:click=move |_| vm.pending_delete.set(Some(employee.clone()))
            >
                "削除"
            </button>
        </div>
    }
}

#[component]
pub fn EmployeeTable(vm: EmployeesViewModel, rows: Signal<Vec<Employee>>) -> impl IntoView {
    let is_desktop = use_is_desktop();
    let selection = vm.selection;
    let all_selected = Signal::derive(move || {
        let rows = rows.get();
        !rows.is_empty() && selection.with(|s| rows.iter().all(|e| s.contains(&e.id)))
    });
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
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|employee| {
                                    view! {
                                        <li class="bg-surface-elevated border border-border rounded-lg p-4 space-y-2">
                                            <div class="flex justify-between items-start">
                                                <div class="flex items-start gap-2">
                                                    {checkbox(employee.id.clone())}
                                                    <div>
                                                        <p class="font-semibold text-fg">{employee.full_name()}</p>
                                                        <p class="text-xs text-fg-muted">{employee.employee_code.clone()}</p>
                                                    </div>
                                                </div>
                                                <StatusBadge status=employee.status.clone()/>
                                            </div>
                                            <p class="text-sm text-fg-muted">{employee.email.clone()}</p>
                                            <p class="text-sm text-fg-muted">
                                                {employee.department.clone().unwrap_or_else(|| "-".into())}
                                            </p>
                                            <RowActions vm=vm employee=employee/>
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
                            <th class="px-4 py-2">
                                <input
                                    type="checkbox"
                                    aria-label="すべて選択"
                                    prop:checked=move || all_selected.get()
                                    on:change=move |_| vm.toggle_select_all(&rows.get_untracked())
                                />
                            </th>
                            <th class="px-4 py-2">"社員番号"</th>
                            <th class="px-4 py-2">"氏名"</th>
                            <th class="px-4 py-2">"メール"</th>
                            <th class="px-4 py-2">"部署"</th>
                            <th class="px-4 py-2">"入社日"</th>
                            <th class="px-4 py-2">"区分"</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border text-fg">
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|employee| {
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2">{checkbox(employee.id.clone())}</td>
                                            <td class="px-4 py-2 font-mono">{employee.employee_code.clone()}</td>
                                            <td class="px-4 py-2">{employee.full_name()}</td>
                                            <td class="px-4 py-2">{employee.email.clone()}</td>
                                            <td class="px-4 py-2">
                                                {employee.department.clone().unwrap_or_else(|| "-".into())}
                                            </td>
                                            <td class="px-4 py-2">{format_date(employee.hire_date)}</td>
                                            <td class="px-4 py-2"><StatusBadge status=employee.status.clone()/></td>
                                            <td class="px-4 py-2"><RowActions vm=vm employee=employee/></td>
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
