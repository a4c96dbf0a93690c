use std::collections::BTreeSet;

use crate::{
    api::{ApiClient, ApiError, BulkActionSummary, Employee, EmployeeInput, EmployeeStats},
    config,
    pagination::{FilterSet, PagedList, Reconciler},
    state::message::MessageState,
    utils::{
        download::{dated_filename, trigger_blob_download, XLSX_MIME},
        time::today_in_app_tz,
        timing::debounce_input,
    },
};
use leptos::*;

use super::{
    repository::{EmployeesRepository, SavedEmployee},
    utils::{employee_matches, employee_order, text_matches, EditorMode, EmployeeFormState},
};

#[derive(Clone)]
pub struct SavePayload {
    pub id: Option<String>,
    pub input: EmployeeInput,
}

#[derive(Clone, Copy)]
pub struct EmployeesViewModel {
    pub list: PagedList<Employee>,
    pub stats_resource: Resource<u32, Result<EmployeeStats, ApiError>>,
    pub stats_reload: RwSignal<u32>,
    pub form_state: EmployeeFormState,
    pub editor: RwSignal<Option<EditorMode>>,
    pub pending_delete: RwSignal<Option<Employee>>,
    pub bulk_delete_prompt: RwSignal<bool>,
    pub selection: RwSignal<BTreeSet<String>>,
    pub search_input: RwSignal<String>,
    pub quick_filter: RwSignal<String>,
    pub messages: RwSignal<MessageState>,
    pub form_messages: RwSignal<MessageState>,
    pub bulk_summary: RwSignal<Option<BulkActionSummary>>,
    pub save_action: Action<SavePayload, Result<SavedEmployee, ApiError>>,
    pub delete_action: Action<String, Result<String, ApiError>>,
    pub bulk_delete_action:
        Action<Vec<String>, Result<(Vec<String>, BulkActionSummary), ApiError>>,
    pub export_action: Action<(), Result<(), ApiError>>,
}

pub fn employee_reconciler() -> Reconciler<Employee> {
    Reconciler::new(employee_matches, employee_order)
}

fn bump(signal: RwSignal<u32>) {
    signal.update(|value| *value = value.wrapping_add(1));
}

pub(crate) fn apply_save_result(
    result: Option<Result<SavedEmployee, ApiError>>,
    list: PagedList<Employee>,
    editor: RwSignal<Option<EditorMode>>,
    form_state: EmployeeFormState,
    messages: RwSignal<MessageState>,
    form_messages: RwSignal<MessageState>,
    stats_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(saved) => {
            let message = match saved {
                SavedEmployee::Created(employee) => {
                    list.apply_create(employee);
                    "従業員を登録しました。"
                }
                SavedEmployee::Updated(employee) => {
                    list.apply_update(employee);
                    "従業員情報を更新しました。"
                }
            };
            messages.update(|msg| msg.set_success(message));
            form_messages.update(MessageState::clear);
            editor.set(None);
            form_state.reset();
            bump(stats_reload);
        }
        Err(err) => form_messages.update(|msg| msg.set_error(err)),
    }
}

pub(crate) fn apply_delete_result(
    result: Option<Result<String, ApiError>>,
    list: PagedList<Employee>,
    selection: RwSignal<BTreeSet<String>>,
    pending_delete: RwSignal<Option<Employee>>,
    messages: RwSignal<MessageState>,
    stats_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    pending_delete.set(None);
    match result {
        Ok(id) => {
            list.apply_delete(&id);
            selection.update(|selected| {
                selected.remove(&id);
            });
            messages.update(|msg| msg.set_success("従業員を削除しました。"));
            bump(stats_reload);
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

pub(crate) fn apply_bulk_delete_result(
    result: Option<Result<(Vec<String>, BulkActionSummary), ApiError>>,
    list: PagedList<Employee>,
    selection: RwSignal<BTreeSet<String>>,
    bulk_summary: RwSignal<Option<BulkActionSummary>>,
    messages: RwSignal<MessageState>,
    stats_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok((requested, summary)) => {
            let removed = summary.succeeded_ids(&requested);
            list.apply_bulk_delete(&removed);
            // Failed rows stay selected for a retry.
            selection.update(|selected| {
                for id in &removed {
                    selected.remove(id);
                }
            });
            messages.update(MessageState::clear);
            bulk_summary.set(Some(summary));
            bump(stats_reload);
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

pub(crate) fn apply_export_result(
    result: Option<Result<(), ApiError>>,
    messages: RwSignal<MessageState>,
) {
    match result {
        Some(Ok(())) => messages.update(|msg| msg.set_success("Excelファイルを出力しました。")),
        Some(Err(err)) => messages.update(|msg| msg.set_error(err)),
        None => {}
    }
}

impl EmployeesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = EmployeesRepository::new(api);
        let fetch_repo = repository.clone();
        let list = PagedList::new(
            config::current().default_page_size,
            FilterSet::new(),
            employee_reconciler(),
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

        let form_state = EmployeeFormState::default();
        let editor = create_rw_signal(None::<EditorMode>);
        let pending_delete = create_rw_signal(None::<Employee>);
        let bulk_delete_prompt = create_rw_signal(false);
        let selection = create_rw_signal(BTreeSet::<String>::new());
        let search_input = create_rw_signal(String::new());
        let quick_filter = create_rw_signal(String::new());
        let messages = create_rw_signal(MessageState::default());
        let form_messages = create_rw_signal(MessageState::default());
        let bulk_summary = create_rw_signal(None::<BulkActionSummary>);

        let save_action = create_action(move |payload: &SavePayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(payload.id, payload.input).await }
        });
        let delete_action = create_action(move |id: &String| {
            let repo = repository.get_value();
            let id = id.clone();
            async move { repo.delete(&id).await.map(|_| id) }
        });
        let bulk_delete_action = create_action(move |ids: &Vec<String>| {
            let repo = repository.get_value();
            let ids = ids.clone();
            async move { repo.bulk_delete(&ids).await.map(|summary| (ids, summary)) }
        });
        let export_action = create_action(move |_: &()| {
            let repo = repository.get_value();
            let query = list.query_for(1);
            async move {
                let bytes = repo.export(query).await?;
                let filename = dated_filename("employees", today_in_app_tz(), "xlsx");
                trigger_blob_download(&filename, XLSX_MIME, &bytes)
                    .map_err(|err| ApiError::unknown(err.to_string()))
            }
        });

        create_effect(move |_| list.fetch(1));
        create_effect(move |_| {
            apply_save_result(
                save_action.value().get(),
                list,
                editor,
                form_state,
                messages,
                form_messages,
                stats_reload,
            );
        });
        create_effect(move |_| {
            apply_delete_result(
                delete_action.value().get(),
                list,
                selection,
                pending_delete,
                messages,
                stats_reload,
            );
        });
        create_effect(move |_| {
            apply_bulk_delete_result(
                bulk_delete_action.value().get(),
                list,
                selection,
                bulk_summary,
                messages,
                stats_reload,
            );
        });
        create_effect(move |_| apply_export_result(export_action.value().get(), messages));

        Self {
            list,
            stats_resource,
            stats_reload,
            form_state,
            editor,
            pending_delete,
            bulk_delete_prompt,
            selection,
            search_input,
            quick_filter,
            messages,
            form_messages,
            bulk_summary,
            save_action,
            delete_action,
            bulk_delete_action,
            export_action,
        }
    }

    /// Rows of the current page narrowed by the client-side quick filter.
    pub fn visible_rows(&self) -> Signal<Vec<Employee>> {
        let window = self.list.window;
        let quick_filter = self.quick_filter;
        Signal::derive(move || {
            let term = quick_filter.get();
            window.with(|w| {
                w.items
                    .iter()
                    .filter(|employee| text_matches(employee, &term))
                    .cloned()
                    .collect()
            })
        })
    }

    pub fn on_search_input(&self, value: String) {
        self.search_input.set(value.clone());
        let search_input = self.search_input;
        let list = self.list;
        debounce_input(
            value,
            move || search_input.get_untracked(),
            move |term| list.update_filters(|filters| filters.set_scalar("search", term)),
        );
    }

    pub fn clear_filters(&self) {
        self.search_input.set(String::new());
        self.quick_filter.set(String::new());
        self.selection.update(BTreeSet::clear);
        self.list.clear_filters();
    }

    pub fn open_create(&self) {
        self.form_state.reset();
        self.form_messages.update(MessageState::clear);
        self.editor.set(Some(EditorMode::Create));
    }

    pub fn open_edit(&self, employee: &Employee) {
        self.form_state.load(employee);
        self.form_messages.update(MessageState::clear);
        self.editor.set(Some(EditorMode::Edit(employee.id.clone())));
    }

    pub fn close_editor(&self) {
        self.editor.set(None);
        self.form_state.reset();
    }

    pub fn submit_form(&self) {
        let id = match self.editor.get_untracked() {
            Some(EditorMode::Edit(id)) => Some(id),
            Some(EditorMode::Create) => None,
            None => return,
        };
        match self.form_state.to_payload() {
            Ok(input) => self.save_action.dispatch(SavePayload { id, input }),
            Err(err) => self.form_messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn toggle_selected(&self, id: &str) {
        self.selection.update(|selected| {
            if !selected.remove(id) {
                selected.insert(id.to_string());
            }
        });
    }

    /// Selects every visible row, or clears the selection when all of them
    /// are already selected.
    pub fn toggle_select_all(&self, visible: &[Employee]) {
        self.selection.update(|selected| {
            let all = !visible.is_empty() && visible.iter().all(|e| selected.contains(&e.id));
            if all {
                for employee in visible {
                    selected.remove(&employee.id);
                }
            } else {
                selected.extend(visible.iter().map(|e| e.id.clone()));
            }
        });
    }

    pub fn confirm_delete(&self) {
        if let Some(employee) = self.pending_delete.get_untracked() {
            self.delete_action.dispatch(employee.id);
        }
    }

    pub fn confirm_bulk_delete(&self) {
        self.bulk_delete_prompt.set(false);
        let ids: Vec<String> = self.selection.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        self.bulk_summary.set(None);
        self.bulk_delete_action.dispatch(ids);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::{BulkItemError, ListResponse};
    use crate::pages::employees::utils::sample_employee;
    use crate::pagination::PageWindow;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};

    fn page(codes: &[(&str, &str)], total: i64) -> ListResponse<Employee> {
        ListResponse {
            page: 1,
            per_page: 3,
            total,
            items: codes
                .iter()
                .map(|(id, code)| sample_employee(id, code))
                .collect(),
        }
    }

    fn offline_list() -> PagedList<Employee> {
        PagedList::new(3, FilterSet::new(), employee_reconciler(), |_query| async {
            Err(ApiError::request_failed("offline"))
        })
    }

    #[test]
    fn save_result_inserts_created_row_in_code_order() {
        with_runtime(|| {
            let list = offline_list();
            list.window.set(PageWindow::from(page(
                &[("e1", "EMP-001"), ("e3", "EMP-003")],
                2,
            )));
            let editor = create_rw_signal(Some(EditorMode::Create));
            let form_state = EmployeeFormState::default();
            form_state.first_name.set("draft".into());
            let messages = create_rw_signal(MessageState::default());
            let form_messages = create_rw_signal(MessageState::default());
            let stats_reload = create_rw_signal(0u32);

            apply_save_result(
                Some(Ok(SavedEmployee::Created(sample_employee("e2", "EMP-002")))),
                list,
                editor,
                form_state,
                messages,
                form_messages,
                stats_reload,
            );

            let ids: Vec<String> = list
                .window
                .get_untracked()
                .items
                .into_iter()
                .map(|e| e.id)
                .collect();
            assert_eq!(ids, vec!["e1", "e2", "e3"]);
            assert_eq!(list.window.get_untracked().total_count, 3);
            assert!(editor.get_untracked().is_none());
            assert!(form_state.first_name.get_untracked().is_empty());
            assert_eq!(stats_reload.get_untracked(), 1);
            assert!(messages.get_untracked().success.is_some());
        });
    }

    #[test]
    fn update_that_leaves_the_filter_removes_the_row() {
        with_runtime(|| {
            let list = offline_list();
            list.filters
                .update(|f| f.set_members("status", ["active"]));
            list.window.set(PageWindow::from(page(
                &[("e1", "EMP-001"), ("e2", "EMP-002")],
                2,
            )));
            let mut updated = sample_employee("e2", "EMP-002");
            updated.status = "terminated".into();

            apply_save_result(
                Some(Ok(SavedEmployee::Updated(updated))),
                list,
                create_rw_signal(Some(EditorMode::Edit("e2".into()))),
                EmployeeFormState::default(),
                create_rw_signal(MessageState::default()),
                create_rw_signal(MessageState::default()),
                create_rw_signal(0),
            );

            let window = list.window.get_untracked();
            assert_eq!(window.items.len(), 1);
            assert_eq!(window.total_count, 2);
        });
    }

    #[test]
    fn save_error_stays_in_form() {
        with_runtime(|| {
            let list = offline_list();
            let editor = create_rw_signal(Some(EditorMode::Create));
            let messages = create_rw_signal(MessageState::default());
            let form_messages = create_rw_signal(MessageState::default());
            apply_save_result(
                Some(Err(ApiError::validation("メールアドレスは既に使われています"))),
                list,
                editor,
                EmployeeFormState::default(),
                messages,
                form_messages,
                create_rw_signal(0),
            );
            assert!(editor.get_untracked().is_some());
            assert!(form_messages.get_untracked().error.is_some());
            assert!(messages.get_untracked().error.is_none());
        });
    }

    #[test]
    fn delete_on_full_page_backfills_from_server() {
        with_local_runtime_async(|| async {
            let list = PagedList::new(3, FilterSet::new(), employee_reconciler(), |_query| async {
                Ok(page(
                    &[("e1", "EMP-001"), ("e3", "EMP-003"), ("e4", "EMP-004")],
                    4,
                ))
            });
            list.window.set(PageWindow::from(page(
                &[("e1", "EMP-001"), ("e2", "EMP-002"), ("e3", "EMP-003")],
                5,
            )));
            let selection = create_rw_signal(BTreeSet::from(["e2".to_string()]));
            let pending = create_rw_signal(Some(sample_employee("e2", "EMP-002")));

            apply_delete_result(
                Some(Ok("e2".into())),
                list,
                selection,
                pending,
                create_rw_signal(MessageState::default()),
                create_rw_signal(0),
            );
            assert!(pending.get_untracked().is_none());
            assert!(selection.get_untracked().is_empty());

            let filled = wait_until(|| list.window.with_untracked(|w| w.items.len() == 3)).await;
            assert!(filled);
            let ids: Vec<String> = list
                .window
                .get_untracked()
                .items
                .into_iter()
                .map(|e| e.id)
                .collect();
            assert_eq!(ids, vec!["e1", "e3", "e4"]);
        });
    }

    #[test]
    fn bulk_delete_keeps_failed_rows_selected() {
        with_runtime(|| {
            let list = offline_list();
            list.window.set(PageWindow::from(page(
                &[("e1", "EMP-001"), ("e2", "EMP-002")],
                2,
            )));
            let selection =
                create_rw_signal(BTreeSet::from(["e1".to_string(), "e2".to_string()]));
            let bulk_summary = create_rw_signal(None);
            let summary = BulkActionSummary {
                succeeded: 1,
                failed: 1,
                errors: vec![BulkItemError {
                    id: "e2".into(),
                    error: "在籍中の休暇申請があります".into(),
                }],
            };

            apply_bulk_delete_result(
                Some(Ok((vec!["e1".into(), "e2".into()], summary))),
                list,
                selection,
                bulk_summary,
                create_rw_signal(MessageState::default()),
                create_rw_signal(0),
            );

            assert_eq!(selection.get_untracked(), BTreeSet::from(["e2".to_string()]));
            let window = list.window.get_untracked();
            assert_eq!(window.items.len(), 1);
            assert_eq!(window.items[0].id, "e2");
            assert_eq!(bulk_summary.get_untracked().map(|s| s.failed), Some(1));
        });
    }

    #[test]
    fn export_failure_is_reported() {
        with_runtime(|| {
            let messages = create_rw_signal(MessageState::default());
            apply_export_result(Some(Err(ApiError::timeout("timeout"))), messages);
            assert!(messages.get_untracked().error.is_some());
            apply_export_result(None, messages);
            assert!(messages.get_untracked().error.is_some());
        });
    }
}
