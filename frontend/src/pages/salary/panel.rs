use crate::{
    components::{
        common::Button,
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, MessageBanner},
        modal::Modal,
        pager::Pager,
    },
    pages::salary::{
        components::{form::SalaryStructureForm, payslip::PayslipDownload, table::SalaryTable},
        view_model::SalaryViewModel,
    },
};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn SalaryPage() -> impl IntoView {
    let vm = SalaryViewModel::new();
    let load_error = Signal::derive(move || vm.list.state.with(|s| s.error().cloned()));
    let loading = Signal::derive(move || vm.list.state.with(|s| s.is_loading()));
    let is_empty = Signal::derive(move || vm.list.window.with(|w| w.items.is_empty()));
    let form_title = Signal::derive(move || {
        if vm.editing.with(Option::is_some) {
            "給与体系の編集".to_string()
        } else {
            "給与体系の登録".to_string()
        }
    });
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .with(|s| s.as_ref().map(|s| format!("「{}」を削除しますか？", s.name)))
            .unwrap_or_default()
    });

    view! {
        <Title text="給与体系"/>
        <Layout>
            <div class="space-y-6">
                <div class="flex justify-between items-center">
                    <h1 class="text-2xl font-bold text-fg">"給与体系"</h1>
                    <Button on:click=move |_| vm.open_new()>"新規登録"</Button>
                </div>
                <MessageBanner messages=vm.messages/>
                <PayslipDownload vm=vm/>

                <InlineErrorMessage
                    error=load_error
                    on_retry=Callback::new(move |_| vm.list.reload())
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner/>
                </Show>
                <Show
                    when=move || !is_empty.get()
                    fallback=move || {
                        view! {
                            <Show when=move || !loading.get() && load_error.with(Option::is_none)>
                                <EmptyState title="給与体系が登録されていません"/>
                            </Show>
                        }
                    }
                >
                    <SalaryTable vm=vm/>
                </Show>
                <Pager list=vm.list/>
            </div>

            <Modal
                is_open=Signal::derive(move || vm.form_open.get())
                title=form_title
                on_close=Callback::new(move |_| vm.close_form())
            >
                <SalaryStructureForm vm=vm/>
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_delete.with(Option::is_some))
                title="給与体系の削除"
                message=delete_message
                confirm_label="削除"
                destructive=true
                pending=vm.delete_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
            />
        </Layout>
    }
}
