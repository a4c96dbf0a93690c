use crate::{
    api::EmployeeStats,
    components::{
        bulk_summary::BulkSummaryBanner,
        cards::{StatCard, StatTone},
        common::{Button, ButtonVariant},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, MessageBanner},
        modal::Modal,
        pager::Pager,
    },
    pages::employees::{
        components::{filters::EmployeeFilters, form::EmployeeForm, table::EmployeeTable},
        utils::EditorMode,
        view_model::EmployeesViewModel,
    },
};
use leptos::*;
use leptos_meta::Title;

fn stat(
    stats: Signal<Option<EmployeeStats>>,
    pick: fn(&EmployeeStats) -> i64,
) -> Signal<String> {
    Signal::derive(move || {
        stats
            .get()
            .map(|s| pick(&s).to_string())
            .unwrap_or_else(|| "-".into())
    })
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let vm = EmployeesViewModel::new();
    let rows = vm.visible_rows();
    let stats = Signal::derive(move || vm.stats_resource.get().and_then(|r| r.ok()));
    let load_error = Signal::derive(move || vm.list.state.with(|s| s.error().cloned()));
    let loading = Signal::derive(move || vm.list.state.with(|s| s.is_loading()));
    let selected_count = Signal::derive(move || vm.selection.with(|s| s.len()));

    let editor_open = Signal::derive(move || vm.editor.with(Option::is_some));
    let editor_title = Signal::derive(move || match vm.editor.get() {
        Some(EditorMode::Edit(_)) => "従業員情報の編集".to_string(),
        _ => "従業員の新規登録".to_string(),
    });
    let delete_open = Signal::derive(move || vm.pending_delete.with(Option::is_some));
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .with(|e| e.as_ref().map(|e| format!("{} を削除しますか？", e.full_name())))
            .unwrap_or_default()
    });
    let bulk_message =
        Signal::derive(move || format!("選択した {} 名を削除しますか？", selected_count.get()));

    view! {
        <Title text="従業員管理"/>
        <Layout>
            <div class="space-y-6">
                <div class="flex flex-wrap justify-between items-center gap-3">
                    <h1 class="text-2xl font-bold text-fg">"従業員管理"</h1>
                    <div class="flex gap-2">
                        <Button
                            variant=ButtonVariant::Secondary
                            loading=vm.export_action.pending()
                            on:click=move |_| vm.export_action.dispatch(())
                        >
                            "Excelエクスポート"
                        </Button>
                        <Button on:click=move |_| vm.open_create()>"新規登録"</Button>
                    </div>
                </div>

                <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                    <StatCard label="従業員数" value=stat(stats, |s| s.total)/>
                    <StatCard label="在籍" value=stat(stats, |s| s.active) tone=StatTone::Success/>
                    <StatCard label="休職中" value=stat(stats, |s| s.on_leave) tone=StatTone::Warning/>
                    <StatCard label="今月の入社" value=stat(stats, |s| s.new_this_month)/>
                </div>

                <MessageBanner messages=vm.messages/>
                <BulkSummaryBanner
                    summary=vm.bulk_summary.into()
                    on_dismiss=Callback::new(move |_| vm.bulk_summary.set(None))
                />
                <EmployeeFilters vm=vm/>

                <Show when=move || { selected_count.get() > 0 }>
                    <div class="flex items-center gap-3 bg-surface-muted border border-border rounded px-4 py-2">
                        <span class="text-sm text-fg">{move || format!("{}件選択中", selected_count.get())}</span>
                        <Button
                            variant=ButtonVariant::Danger
                            loading=vm.bulk_delete_action.pending()
                            on:click=move |_| vm.bulk_delete_prompt.set(true)
                        >
                            "一括削除"
                        </Button>
                    </div>
                </Show>

                <InlineErrorMessage
                    error=load_error
                    on_retry=Callback::new(move |_| vm.list.reload())
                />
                <Show when=move || loading.get()>
                    <LoadingSpinner/>
                </Show>
                <Show
                    when=move || !rows.with(Vec::is_empty)
                    fallback=move || {
                        view! {
                            <Show when=move || !loading.get() && load_error.with(Option::is_none)>
                                <EmptyState
                                    title="該当する従業員がいません"
                                    description="検索条件を変更してください。"
                                />
                            </Show>
                        }
                    }
                >
                    <EmployeeTable vm=vm rows=rows/>
                </Show>
                <Pager list=vm.list/>
            </div>

            <Modal
                is_open=editor_open
                title=editor_title
                on_close=Callback::new(move |_| vm.close_editor())
            >
                <EmployeeForm vm=vm/>
            </Modal>
            <ConfirmDialog
                is_open=delete_open
                title="従業員の削除"
                message=delete_message
                confirm_label="削除"
                destructive=true
                pending=vm.delete_action.pending()
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
            />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.bulk_delete_prompt.get())
                title="一括削除"
                message=bulk_message
                confirm_label="削除"
                destructive=true
                on_confirm=Callback::new(move |_| vm.confirm_bulk_delete())
                on_cancel=Callback::new(move |_| vm.bulk_delete_prompt.set(false))
            />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::*, ssr::render_to_string};

    #[test]
    fn employees_page_renders_shell() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user(false)));
            view! { <EmployeesPage/> }
        });
        assert!(html.contains("従業員管理"));
        assert!(html.contains("Excelエクスポート"));
        assert!(html.contains("今月の入社"));
        assert!(html.contains("該当する従業員がいません"));
    }
}
