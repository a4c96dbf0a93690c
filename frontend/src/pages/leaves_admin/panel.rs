use crate::{
    api::{LeaveBulkKind, LeaveStats},
    components::{
        bulk_summary::BulkSummaryBanner,
        cards::{StatCard, StatTone},
        common::{Button, ButtonVariant},
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner, MessageBanner},
        modal::Modal,
        pager::Pager,
    },
    pages::leaves_admin::{
        components::{
            decision_dialog::DecisionDialog, filters::LeaveAdminFilters, table::LeaveAdminTable,
        },
        view_model::{bulk_label, LeavesAdminViewModel},
    },
};
use leptos::*;
use leptos_meta::Title;

fn stat(stats: Signal<Option<LeaveStats>>, pick: fn(&LeaveStats) -> i64) -> Signal<String> {
    Signal::derive(move || {
        stats
            .get()
            .map(|s| pick(&s).to_string())
            .unwrap_or_else(|| "-".into())
    })
}

#[component]
fn BulkConfirm(vm: LeavesAdminViewModel) -> impl IntoView {
    let pending = vm.pending_bulk;
    let is_open = Signal::derive(move || pending.with(Option::is_some));
    let title = Signal::derive(move || pending.get().map(bulk_label).unwrap_or_default().to_string());
    let count = move || vm.selection.with(|s| s.len());
    let needs_comment =
        move || matches!(pending.get(), Some(LeaveBulkKind::Approve | LeaveBulkKind::Reject));
    view! {
        <Modal is_open=is_open title=title on_close=Callback::new(move |_| pending.set(None))>
            <div class="space-y-4">
                <p class="text-sm text-fg">{move || format!("選択した {} 件の申請を処理します。", count())}</p>
                <Show when=needs_comment>
                    <label class="block text-sm text-fg-muted space-y-1">
                        <span>"コメント（任意）"</span>
                        <textarea
                            class="w-full border border-border rounded px-3 py-2 bg-surface-elevated text-fg"
                            rows="3"
                            prop:value=move || vm.bulk_comment.get()
                            on:input=move |ev| vm.bulk_comment.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                </Show>
                <div class="flex justify-end gap-2">
                    <Button variant=ButtonVariant::Secondary on:click=move |_| pending.set(None)>
                        "キャンセル"
                    </Button>
                    <Button on:click=move |_| vm.confirm_bulk()>"実行"</Button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
pub fn LeavesAdminPage() -> impl IntoView {
    let vm = LeavesAdminViewModel::new();
    let stats = Signal::derive(move || vm.stats_resource.get().and_then(|r| r.ok()));
    let load_error = Signal::derive(move || vm.list.state.with(|s| s.error().cloned()));
    let loading = Signal::derive(move || vm.list.state.with(|s| s.is_loading()));
    let selected_count = Signal::derive(move || vm.selection.with(|s| s.len()));
    let is_empty = Signal::derive(move || vm.list.window.with(|w| w.items.is_empty()));
    let bulk_busy = vm.bulk_action.pending();

    view! {
        <Title text="休暇申請管理"/>
        <Layout>
            <div class="space-y-6">
                <div class="flex flex-wrap justify-between items-center gap-3">
                    <h1 class="text-2xl font-bold text-fg">"休暇申請管理"</h1>
                    <Button
                        variant=ButtonVariant::Secondary
                        loading=vm.export_action.pending()
                        on:click=move |_| vm.export_action.dispatch(())
                    >
                        "PDF出力"
                    </Button>
                </div>

                <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                    <StatCard label="承認待ち" value=stat(stats, |s| s.pending) tone=StatTone::Warning/>
                    <StatCard label="承認済み" value=stat(stats, |s| s.approved) tone=StatTone::Success/>
                    <StatCard label="却下" value=stat(stats, |s| s.rejected) tone=StatTone::Danger/>
                    <StatCard label="本日の休暇取得者" value=stat(stats, |s| s.on_leave_today)/>
                </div>

                <MessageBanner messages=vm.messages/>
                <BulkSummaryBanner
                    summary=vm.bulk_summary.into()
                    on_dismiss=Callback::new(move |_| vm.bulk_summary.set(None))
                />
                <LeaveAdminFilters vm=vm/>

                <Show when=move || { selected_count.get() > 0 }>
                    <div class="flex flex-wrap items-center gap-3 bg-surface-muted border border-border rounded px-4 py-2">
                        <span class="text-sm text-fg">{move || format!("{}件選択中", selected_count.get())}</span>
                        {[LeaveBulkKind::Approve, LeaveBulkKind::Reject, LeaveBulkKind::Delete]
                            .into_iter()
                            .map(|kind| {
                                let variant = if kind == LeaveBulkKind::Approve {
                                    ButtonVariant::Primary
                                } else {
                                    ButtonVariant::Danger
                                };
                                view! {
                                    <Button
                                        variant=variant
                                        loading=bulk_busy
                                        on:click=move |_| vm.pending_bulk.set(Some(kind))
                                    >
                                        {bulk_label(kind)}
                                    </Button>
                                }
                            })
                            .collect_view()}
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
                    when=move || !is_empty.get()
                    fallback=move || {
                        view! {
                            <Show when=move || !loading.get() && load_error.with(Option::is_none)>
                                <EmptyState title="該当する休暇申請はありません"/>
                            </Show>
                        }
                    }
                >
                    <LeaveAdminTable vm=vm/>
                </Show>
                <Pager list=vm.list/>
            </div>
            <DecisionDialog vm=vm/>
            <BulkConfirm vm=vm/>
        </Layout>
    }
}
