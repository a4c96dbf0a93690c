use std::collections::BTreeSet;

use crate::{
    api::{
        ApiClient, ApiError, BulkActionSummary, LeaveBulkKind, LeaveDecision, LeaveRequest,
        LeaveStats,
    },
    config,
    pagination::{FilterSet, PagedList, Reconciler},
    state::message::MessageState,
    utils::{
        download::{dated_filename, trigger_blob_download, PDF_MIME},
        form::optional_string,
        time::today_in_app_tz,
    },
};
use leptos::*;

use super::{
    repository::LeavesAdminRepository,
    utils::{admin_leave_matches, newest_first, LeaveFilterDraft},
};

#[derive(Clone)]
pub struct DecisionPayload {
    pub id: String,
    pub decision: LeaveDecision,
    pub comment: Option<String>,
}

#[derive(Clone)]
pub struct BulkPayload {
    pub kind: LeaveBulkKind,
    pub ids: Vec<String>,
    pub comment: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BulkOutcome {
    pub kind: LeaveBulkKind,
    pub requested: Vec<String>,
    pub summary: BulkActionSummary,
}

#[derive(Clone, Copy)]
pub struct LeavesAdminViewModel {
    pub list: PagedList<LeaveRequest>,
    pub stats_resource: Resource<u32, Result<LeaveStats, ApiError>>,
    pub stats_reload: RwSignal<u32>,
    pub draft: LeaveFilterDraft,
    pub selection: RwSignal<BTreeSet<String>>,
    pub pending_decision: RwSignal<Option<(LeaveRequest, LeaveDecision)>>,
    pub decision_comment: RwSignal<String>,
    pub pending_bulk: RwSignal<Option<LeaveBulkKind>>,
    pub bulk_comment: RwSignal<String>,
    pub messages: RwSignal<MessageState>,
    pub bulk_summary: RwSignal<Option<BulkActionSummary>>,
    pub decide_action: Action<DecisionPayload, Result<LeaveRequest, ApiError>>,
    pub bulk_action: Action<BulkPayload, Result<BulkOutcome, ApiError>>,
    pub export_action: Action<(), Result<(), ApiError>>,
}

pub fn admin_leave_reconciler() -> Reconciler<LeaveRequest> {
    Reconciler::new(admin_leave_matches, newest_first)
}

fn bump(signal: RwSignal<u32>) {
    signal.update(|value| *value = value.wrapping_add(1));
}

pub(crate) fn apply_decision_result(
    result: Option<Result<LeaveRequest, ApiError>>,
    list: PagedList<LeaveRequest>,
    pending_decision: RwSignal<Option<(LeaveRequest, LeaveDecision)>>,
    decision_comment: RwSignal<String>,
    messages: RwSignal<MessageState>,
    stats_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    pending_decision.set(None);
    match result {
        Ok(leave) => {
            let message = if leave.status == "rejected" {
                "休暇申請を却下しました。"
            } else {
                "休暇申請を承認しました。"
            };
            list.apply_update(leave);
            decision_comment.set(String::new());
            messages.update(|msg| msg.set_success(message));
            bump(stats_reload);
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

/// Approve/reject changes rows the server may re-sort or re-filter, so the
/// page is refetched. Deletes go through the reconciler.
pub(crate) fn apply_bulk_result(
    result: Option<Result<BulkOutcome, ApiError>>,
    list: PagedList<LeaveRequest>,
    selection: RwSignal<BTreeSet<String>>,
    bulk_summary: RwSignal<Option<BulkActionSummary>>,
    bulk_comment: RwSignal<String>,
    messages: RwSignal<MessageState>,
    stats_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(outcome) => {
            let succeeded = outcome.summary.succeeded_ids(&outcome.requested);
            match outcome.kind {
                LeaveBulkKind::Delete => list.apply_bulk_delete(&succeeded),
                LeaveBulkKind::Approve | LeaveBulkKind::Reject => list.reload(),
            }
            selection.update(|selected| {
                for id in &succeeded {
                    selected.remove(id);
                }
            });
            bulk_comment.set(String::new());
            messages.update(MessageState::clear);
            bulk_summary.set(Some(outcome.summary));
            bump(stats_reload);
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

impl LeavesAdminViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = LeavesAdminRepository::new(api);
        let fetch_repo = repository.clone();
        let list = PagedList::new(
            config::current().default_page_size,
            FilterSet::new(),
            admin_leave_reconciler(),
            move |query| {
                let repo = fetch_repo.clone();
                async move { repo.list(query).await }
            },
        );
        let repository = store_value(repository);

        let stats_reload = create_rw_signal(0u32);
        let stats_resource = create_resource(
            move || stats_reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.stats().await }
            },
        );

        let selection = create_rw_signal(BTreeSet::<String>::new());
        let pending_decision = create_rw_signal(None::<(LeaveRequest, LeaveDecision)>);
        let decision_comment = create_rw_signal(String::new());
        let pending_bulk = create_rw_signal(None::<LeaveBulkKind>);
        let bulk_comment = create_rw_signal(String::new());
        let messages = create_rw_signal(MessageState::default());
        let bulk_summary = create_rw_signal(None::<BulkActionSummary>);

        let decide_action = create_action(move |payload: &DecisionPayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move {
                repo.decide(&payload.id, payload.decision, payload.comment.as_deref())
                    .await
            }
        });
        let bulk_action = create_action(move |payload: &BulkPayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move {
                let summary = repo
                    .bulk(payload.kind, &payload.ids, payload.comment.as_deref())
                    .await?;
                Ok(BulkOutcome {
                    kind: payload.kind,
                    requested: payload.ids,
                    summary,
                })
            }
        });
        let export_action = create_action(move |_: &()| {
            let repo = repository.get_value();
            let query = list.query_for(1);
            async move {
                let bytes = repo.export(query).await?;
                let filename = dated_filename("leaves", today_in_app_tz(), "pdf");
                trigger_blob_download(&filename, PDF_MIME, &bytes)
                    .map_err(|err| ApiError::unknown(err.to_string()))
            }
        });

        create_effect(move |_| list.fetch(1));
        create_effect(move |_| {
            apply_decision_result(
                decide_action.value().get(),
                list,
                pending_decision,
                decision_comment,
                messages,
                stats_reload,
            );
        });
        create_effect(move |_| {
            apply_bulk_result(
                bulk_action.value().get(),
                list,
                selection,
                bulk_summary,
                bulk_comment,
                messages,
                stats_reload,
            );
        });
        create_effect(move |_| match export_action.value().get() {
            Some(Ok(())) => messages.update(|msg| msg.set_success("PDFを出力しました。")),
            Some(Err(err)) => messages.update(|msg| msg.set_error(err)),
            None => {}
        });

        Self {
            list,
            stats_resource,
            stats_reload,
            draft: LeaveFilterDraft::default(),
            selection,
            pending_decision,
            decision_comment,
            pending_bulk,
            bulk_comment,
            messages,
            bulk_summary,
            decide_action,
            bulk_action,
            export_action,
        }
    }

    pub fn apply_draft(&self) {
        let mut filters = self.list.filters.get_untracked();
        match self.draft.apply_to(&mut filters) {
            Ok(()) => {
                self.messages.update(MessageState::clear);
                self.selection.update(BTreeSet::clear);
                self.list.update_filters(|current| *current = filters);
            }
            Err(err) => self.messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn toggle_status(&self, status: &str) {
        self.selection.update(BTreeSet::clear);
        self.list.update_filters(|filters| filters.toggle("status", status));
    }

    pub fn clear_filters(&self) {
        self.draft.reset();
        self.selection.update(BTreeSet::clear);
        self.list.clear_filters();
    }

    pub fn toggle_selected(&self, id: &str) {
        self.selection.update(|selected| {
            if !selected.remove(id) {
                selected.insert(id.to_string());
            }
        });
    }

    pub fn toggle_select_all(&self) {
        let ids: Vec<String> = self
            .list
            .window
            .with_untracked(|w| w.items.iter().map(|l| l.id.clone()).collect());
        self.selection.update(|selected| {
            if !ids.is_empty() && ids.iter().all(|id| selected.contains(id)) {
                selected.clear();
            } else {
                selected.extend(ids);
            }
        });
    }

    pub fn request_decision(&self, leave: LeaveRequest, decision: LeaveDecision) {
        self.decision_comment.set(String::new());
        self.pending_decision.set(Some((leave, decision)));
    }

    pub fn confirm_decision(&self) {
        if let Some((leave, decision)) = self.pending_decision.get_untracked() {
            self.decide_action.dispatch(DecisionPayload {
                id: leave.id,
                decision,
                comment: optional_string(self.decision_comment.get_untracked()),
            });
        }
    }

    pub fn confirm_bulk(&self) {
        let Some(kind) = self.pending_bulk.get_untracked() else {
            return;
        };
        self.pending_bulk.set(None);
        let ids: Vec<String> = self.selection.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        self.bulk_summary.set(None);
        self.bulk_action.dispatch(BulkPayload {
            kind,
            ids,
            comment: optional_string(self.bulk_comment.get_untracked()),
        });
    }
}

pub fn bulk_label(kind: LeaveBulkKind) -> &'static str {
    match kind {
        LeaveBulkKind::Approve => "一括承認",
        LeaveBulkKind::Reject => "一括却下",
        LeaveBulkKind::Delete => "一括削除",
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::{BulkItemError, ListResponse};
    use crate::pages::leaves_admin::utils::sample_leave;
    use crate::pagination::PageWindow;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};
    use std::{cell::Cell, rc::Rc};

    fn seeded(list: PagedList<LeaveRequest>, rows: Vec<LeaveRequest>) {
        let total = rows.len() as i64;
        list.window.set(PageWindow::from(ListResponse {
            page: 1,
            per_page: 20,
            total,
            items: rows,
        }));
    }

    #[test]
    fn rejected_row_leaves_pending_filter() {
        with_runtime(|| {
            let list = PagedList::new(
                20,
                FilterSet::new(),
                admin_leave_reconciler(),
                |_query| async { Err(ApiError::request_failed("offline")) },
            );
            list.filters.update(|f| f.set_members("status", ["pending"]));
            seeded(
                list,
                vec![sample_leave("l2", "pending", 2), sample_leave("l1", "pending", 1)],
            );
            let pending = create_rw_signal(Some((
                sample_leave("l2", "pending", 2),
                LeaveDecision::Reject,
            )));
            let comment = create_rw_signal("繁忙期のため".to_string());
            let messages = create_rw_signal(MessageState::default());

            apply_decision_result(
                Some(Ok(sample_leave("l2", "rejected", 2))),
                list,
                pending,
                comment,
                messages,
                create_rw_signal(0),
            );

            let window = list.window.get_untracked();
            assert_eq!(window.items.len(), 1);
            assert_eq!(window.items[0].id, "l1");
            assert!(pending.get_untracked().is_none());
            assert!(comment.get_untracked().is_empty());
            assert_eq!(
                messages.get_untracked().success.as_deref(),
                Some("休暇申請を却下しました。")
            );
        });
    }

    #[test]
    fn bulk_approve_refetches_current_page() {
        with_local_runtime_async(|| async {
            let fetches = Rc::new(Cell::new(0));
            let counter = fetches.clone();
            let list = PagedList::new(20, FilterSet::new(), admin_leave_reconciler(), move |_q| {
                counter.set(counter.get() + 1);
                async {
                    Ok(ListResponse {
                        page: 1,
                        per_page: 20,
                        total: 1,
                        items: vec![sample_leave("l1", "approved", 1)],
                    })
                }
            });
            seeded(list, vec![sample_leave("l1", "pending", 1)]);
            let selection = create_rw_signal(BTreeSet::from(["l1".to_string()]));
            let bulk_summary = create_rw_signal(None);

            apply_bulk_result(
                Some(Ok(BulkOutcome {
                    kind: LeaveBulkKind::Approve,
                    requested: vec!["l1".into()],
                    summary: BulkActionSummary {
                        succeeded: 1,
                        failed: 0,
                        errors: vec![],
                    },
                })),
                list,
                selection,
                bulk_summary,
                create_rw_signal(String::new()),
                create_rw_signal(MessageState::default()),
                create_rw_signal(0),
            );

            assert_eq!(fetches.get(), 1);
            assert!(selection.get_untracked().is_empty());
            let refreshed = wait_until(|| {
                list.window
                    .with_untracked(|w| w.items.first().map(|l| l.status == "approved"))
                    .unwrap_or(false)
            })
            .await;
            assert!(refreshed);
            assert_eq!(bulk_summary.get_untracked().map(|s| s.succeeded), Some(1));
        });
    }

    #[test]
    fn bulk_delete_removes_only_succeeded_rows() {
        with_runtime(|| {
            let list = PagedList::new(
                20,
                FilterSet::new(),
                admin_leave_reconciler(),
                |_query| async { Err(ApiError::request_failed("offline")) },
            );
            seeded(
                list,
                vec![
                    sample_leave("l3", "rejected", 3),
                    sample_leave("l2", "rejected", 2),
                    sample_leave("l1", "approved", 1),
                ],
            );
            let selection = create_rw_signal(BTreeSet::from(["l1".to_string(), "l2".to_string()]));

            apply_bulk_result(
                Some(Ok(BulkOutcome {
                    kind: LeaveBulkKind::Delete,
                    requested: vec!["l1".into(), "l2".into()],
                    summary: BulkActionSummary {
                        succeeded: 1,
                        failed: 1,
                        errors: vec![BulkItemError {
                            id: "l1".into(),
                            error: "承認済みの申請は削除できません".into(),
                        }],
                    },
                })),
                list,
                selection,
                create_rw_signal(None),
                create_rw_signal(String::new()),
                create_rw_signal(MessageState::default()),
                create_rw_signal(0),
            );

            let ids: Vec<String> = list
                .window
                .get_untracked()
                .items
                .into_iter()
                .map(|l| l.id)
                .collect();
            assert_eq!(ids, vec!["l3", "l1"]);
            assert_eq!(list.window.get_untracked().total_count, 2);
            assert_eq!(selection.get_untracked(), BTreeSet::from(["l1".to_string()]));
        });
    }

    #[test]
    fn bulk_labels() {
        assert_eq!(bulk_label(LeaveBulkKind::Reject), "一括却下");
    }
}
