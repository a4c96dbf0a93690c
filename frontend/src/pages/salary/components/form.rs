use crate::{
    api::SalaryComponentKind,
    components::{
        common::{Button, ButtonVariant},
        layout::MessageBanner,
    },
    pages::salary::{
        utils::{format_amount, kind_label, ComponentRow},
        view_model::SalaryViewModel,
    },
};
use leptos::*;

const INPUT_CLASS: &str = "w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg";

#[component]
fn ComponentLine(vm: SalaryViewModel, row: ComponentRow) -> impl IntoView {
    view! {
        <div class="grid grid-cols-12 gap-2 items-center">
            <select
                class="col-span-3 border border-border rounded px-2 py-2 bg-surface-elevated text-fg"
                aria-label="区分"
                prop:value=move || {
                    match row.kind.get() {
                        SalaryComponentKind::Allowance => "allowance",
                        SalaryComponentKind::Deduction => "deduction",
                    }
                }
                on:change=move |ev| {
                    let kind = if event_target_value(&ev) == "deduction" {
                        SalaryComponentKind::Deduction
                    } else {
                        SalaryComponentKind::Allowance
                    };
                    row.kind.set(kind);
                }
            >
                <option value="allowance">{kind_label(SalaryComponentKind::Allowance)}</option>
                <option value="deduction">{kind_label(SalaryComponentKind::Deduction)}</option>
            </select>
            <input
                type="text"
                class="col-span-5 border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                placeholder="項目名"
                prop:value=move || row.name.get()
                on:input=move |ev| row.name.set(event_target_value(&ev))
            />
            <input
                type="text"
                inputmode="decimal"
                class="col-span-3 border border-border rounded px-3 py-2 bg-surface-elevated text-fg text-right"
                placeholder="金額"
                prop:value=move || row.amount.get()
                on:input=move |ev| row.amount.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="col-span-1 text-status-error-text"
                aria-label="行を削除"
                on:click=move |_| vm.form_state.remove_component(row.key)
            >
                "✕"
            </button>
        </div>
    }
}

#[component]
pub fn SalaryStructureForm(vm: SalaryViewModel) -> impl IntoView {
    let state = vm.form_state;
    let pending = vm.save_action.pending();
    let net = move || format_amount(state.preview_net(), &state.currency.get());

    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.submit();
            }
        >
            <MessageBanner messages=vm.form_messages/>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                <label class="block text-sm text-fg-muted space-y-1 lg:col-span-2">
                    <span>"給与体系名"</span>
                    <input
                        type="text"
                        class=INPUT_CLASS
                        prop:value=move || state.name.get()
                        on:input=move |ev| state.name.set(event_target_value(&ev))
                    />
                </label>
                <label class="block text-sm text-fg-muted space-y-1">
                    <span>"通貨"</span>
                    <input
                        type="text"
                        maxlength="3"
                        class=INPUT_CLASS
                        prop:value=move || state.currency.get()
                        on:input=move |ev| state.currency.set(event_target_value(&ev))
                    />
                </label>
            </div>
            <label class="block text-sm text-fg-muted space-y-1">
                <span>"基本給"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    class=INPUT_CLASS
                    prop:value=move || state.base_amount.get()
                    on:input=move |ev| state.base_amount.set(event_target_value(&ev))
                />
            </label>

            <div class="space-y-2">
                <div class="flex justify-between items-center">
                    <span class="text-sm font-medium text-fg">"手当・控除"</span>
                    <div class="flex gap-3">
                        <button
                            type="button"
                            class="text-link hover:text-link-hover text-sm"
                            on:click=move |_| state.add_component(SalaryComponentKind::Allowance)
                        >
                            "手当を追加"
                        </button>
                        <button
                            type="button"
                            class="text-link hover:text-link-hover text-sm"
                            on:click=move |_| state.add_component(SalaryComponentKind::Deduction)
                        >
                            "控除を追加"
                        </button>
                    </div>
                </div>
                <For
                    each=move || state.components.get()
                    key=|row| row.key
                    children=move |row| view! { <ComponentLine vm=vm row=row/> }
                />
            </div>

            <p class="text-right text-sm text-fg">
                "差引支給額: " <span class="font-semibold">{net}</span>
            </p>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.close_form()>
                    "キャンセル"
                </Button>
                <button
                    type="submit"
                    class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                    disabled=move || pending.get()
                >
                    "保存"
                </button>
            </div>
        </form>
    }
}
