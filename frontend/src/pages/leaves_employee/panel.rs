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
    pages::leaves_employee::{
        components::{balance::LeaveBalanceCards, form::LeaveRequestForm, list::MyLeavesList},
        utils::STATUS_TABS,
        view_model::MyLeavesViewModel,
    },
};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn MyLeavesPage() -> impl IntoView {
    let vm = MyLeavesViewModel::new();
    let balances = Signal::derive(move || vm.balance_resource.get());
    let load_error = Signal::derive(move || vm.list.state.with(|s| s.error().cloned()));
    let loading = Signal::derive(move || vm.list.state.with(|s| s.is_loading()));
    let is_empty = Signal::derive(move || vm.list.window.with(|w| w.items.is_empty()));
    let active_tab = vm.active_tab();
    let form_title = Signal::derive(move || {
        if vm.editing.with(Option::is_some) {
            "休暇申請の編集".to_string()
        } else {
            "休暇申請".to_string()
        }
    });

    view! {
        <Title text="休暇申請"/>
        <Layout>
            <div class="space-y-6">
                <div class="flex justify-between items-center">
                    <h1 class="text-2xl font-bold text-fg">"休暇申請"</h1>
                    <Button on:click=move |_| vm.open_new()>"新規申請"</Button>
                </div>
                <LeaveBalanceCards balances=balances/>
                <MessageBanner messages=vm.messages/>

                <div class="flex gap-1 border-b border-border" role="tablist">
                    {STATUS_TABS
                        .iter()
                        .map(|(value, label)| {
                            let value = *value;
                            let selected = move || active_tab.get() == value;
                            view! {
                                <button
                                    role="tab"
                                    aria-selected=move || selected().to_string()
                                    class=move || {
                                        if selected() {
                                            "px-4 py-2 text-sm font-semibold border-b-2 border-action-primary-bg text-fg"
                                        } else {
                                            "px-4 py-2 text-sm text-fg-muted"
                                        }
                                    }
                                    on:click=move |_| vm.select_tab(value)
                                >
                                    {*label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

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
                                <EmptyState
                                    title="休暇申請はありません"
                                    description="「新規申請」から休暇を申請できます。"
                                />
                            </Show>
                        }
                    }
                >
                    <MyLeavesList vm=vm/>
                </Show>
                <Pager list=vm.list/>
            </div>

            <Modal
                is_open=Signal::derive(move || vm.form_open.get())
                title=form_title
                on_close=Callback::new(move |_| vm.close_form())
            >
                <LeaveRequestForm vm=vm/>
            </Modal>
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_cancel.with(Option::is_some))
                title="申請の取消"
                message="この休暇申請を取り消しますか？"
                confirm_label="取り消す"
                destructive=true
                pending=vm.cancel_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_cancel())
                on_cancel=Callback::new(move |_| vm.pending_cancel.set(None))
            />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::*, ssr::render_to_string};

    #[test]
    fn my_leaves_page_renders_tabs() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! { <MyLeavesPage/> }
        });
        assert!(html.contains("新規申請"));
        assert!(html.contains("role=\"tablist\""));
        assert!(html.contains("すべて"));
        assert!(html.contains("休暇申請はありません"));
    }
}
