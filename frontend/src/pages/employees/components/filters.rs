use crate::pages::employees::{utils::EMPLOYEE_STATUSES, view_model::EmployeesViewModel};
use leptos::*;

#[component]
pub fn EmployeeFilters(vm: EmployeesViewModel) -> impl IntoView {
    let filters = vm.list.filters;
    view! {
        <div class="bg-surface-elevated border border-border rounded-lg p-4 space-y-3">
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-3">
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"キーワード"</span>
                    <input
                        type="search"
                        class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        placeholder="氏名・メール・社員番号"
                        prop:value=move || vm.search_input.get()
                        on:input=move |ev| vm.on_search_input(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted space-y-1">
                    <span>"部署"</span>
                    <input
                        type="text"
                        class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        prop:value=move || {
                            filters.with(|f| f.scalar("department").unwrap_or_default().to_string())
                        }
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            vm.list.update_filters(|f| f.set_scalar("department", value));
                        }
                    />
                </label>
                <div class="text-sm text-fg-muted space-y-1">
                    <span>"在籍区分"</span>
                    <div class="flex flex-wrap gap-3 py-2">
                        {EMPLOYEE_STATUSES
                            .iter()
                            .map(|(value, label)| {
                                let value = *value;
                                view! {
                                    <label class="inline-flex items-center gap-1 text-fg">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || filters.with(|f| f.contains("status", value))
                                            on:change=move |_| {
                                                vm.list.update_filters(|f| f.toggle("status", value))
                                            }
                                        />
                                        {*label}
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
            <div class="flex flex-wrap items-center justify-between gap-2">
                <input
                    type="text"
                    class="border border-border rounded px-3 py-1 text-sm bg-surface-elevated text-fg"
                    placeholder="このページ内を絞り込み"
                    aria-label="ページ内絞り込み"
                    prop:value=move || vm.quick_filter.get()
                    on:input=move |ev| vm.quick_filter.set(event_target_value(&ev))
                />
                <button
                    class="text-sm text-fg-muted underline disabled:opacity-50"
                    disabled=move || filters.with(|f| f.is_empty()) && vm.search_input.with(String::is_empty)
                    on:click=move |_| vm.clear_filters()
                >
                    "条件をクリア"
                </button>
            </div>
        </div>
    }
}
