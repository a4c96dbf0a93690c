use crate::{components::common::Button, pages::salary::view_model::SalaryViewModel};
use leptos::*;

#[component]
pub fn PayslipDownload(vm: SalaryViewModel) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated border border-border rounded-lg p-4 space-y-3">
            <h2 class="text-lg font-semibold text-fg">"給与明細のダウンロード"</h2>
            <div class="flex flex-wrap items-end gap-3">
                <label class="text-sm text-fg-muted space-y-1">
                    <span class="block">"従業員ID"</span>
                    <input
                        type="text"
                        class="border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        prop:value=move || vm.payslip_employee.get()
                        on:input=move |ev| vm.payslip_employee.set(event_target_value(&ev))
                    />
                </label>
                <label class="text-sm text-fg-muted space-y-1">
                    <span class="block">"対象月"</span>
                    <input
                        type="month"
                        class="border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                        prop:value=move || vm.payslip_month.get()
                        on:input=move |ev| vm.payslip_month.set(event_target_value(&ev))
                    />
                </label>
                <Button
                    loading=vm.payslip_action.pending()
                    on:click=move |_| vm.download_payslip()
                >
                    "PDFをダウンロード"
                </Button>
            </div>
        </section>
    }
}
