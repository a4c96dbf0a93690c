use crate::{
    api::SalaryStructure,
    pages::salary::{
        utils::{format_amount, kind_label},
        view_model::SalaryViewModel,
    },
    state::breakpoint::use_is_desktop,
};
use leptos::*;

fn components_summary(structure: &SalaryStructure) -> String {
    if structure.components.is_empty() {
        return "-".into();
    }
    structure
        .components
        .iter()
        .map(|c| {
            format!(
                "{} {} {}",
                kind_label(c.kind),
                c.name,
                format_amount(c.amount, &structure.currency)
            )
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

#[component]
fn StructureActions(vm: SalaryViewModel, structure: SalaryStructure) -> impl IntoView {
    let for_edit = structure.clone();
    view! {
        <div class="flex gap-3 text-sm">
            <button class="text-link hover:underline" on:click=move |_| vm.open_edit(&for_edit)>
                "編集"
            </button>
            <button
                class="text-status-error-text hover:underline"
                on:click=move |_| vm.pending_delete.set(Some(structure.clone()))
            >
                "削除"
            </button>
        </div>
    }
}

#[component]
pub fn SalaryTable(vm: SalaryViewModel) -> impl IntoView {
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
                                .map(|structure| {
                                    view! {
                                        <li class="bg-surface-elevated border border-border rounded-lg p-4 space-y-1">
                                            <p class="font-semibold text-fg">{structure.name.clone()}</p>
                                            <p class="text-sm text-fg-muted">
                                                {format!(
                                                    "基本給 {} / 差引 {}",
                                                    format_amount(structure.base_amount, &structure.currency),
                                                    format_amount(structure.net_amount(), &structure.currency),
                                                )}
                                            </p>
                                            <p class="text-xs text-fg-muted">{components_summary(&structure)}</p>
                                            <StructureActions vm=vm structure=structure/>
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
                            <th class="px-4 py-2">"名称"</th>
                            <th class="px-4 py-2 text-right">"基本給"</th>
                            <th class="px-4 py-2">"手当・控除"</th>
                            <th class="px-4 py-2 text-right">"差引支給額"</th>
                            <th class="px-4 py-2 text-right">"適用人数"</th>
                            <th class="px-4 py-2"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border text-fg">
                        {move || {
                            rows()
                                .into_iter()
                                .map(|structure| {
                                    view! {
                                        <tr>
                                            <td class="px-4 py-2 font-medium">{structure.name.clone()}</td>
                                            <td class="px-4 py-2 text-right">
                                                {format_amount(structure.base_amount, &structure.currency)}
                                            </td>
                                            <td class="px-4 py-2 text-fg-muted">{components_summary(&structure)}</td>
                                            <td class="px-4 py-2 text-right font-semibold">
                                                {format_amount(structure.net_amount(), &structure.currency)}
                                            </td>
                                            <td class="px-4 py-2 text-right">{format!("{}名", structure.assigned_count)}</td>
                                            <td class="px-4 py-2"><StructureActions vm=vm structure=structure/></td>
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
