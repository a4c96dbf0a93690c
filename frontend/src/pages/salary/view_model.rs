use crate::{
    api::{ApiClient, ApiError, SalaryStructure, SalaryStructureInput},
    config,
    pagination::{FilterSet, PagedList, Reconciler},
    state::message::MessageState,
    utils::{
        download::{trigger_blob_download, PDF_MIME},
        time::{current_month, is_valid_month},
    },
};
use leptos::*;

use super::{
    repository::{SalaryRepository, SavedStructure},
    utils::{by_name, structure_matches, SalaryFormState},
};

#[derive(Clone)]
pub struct StructureSavePayload {
    pub id: Option<String>,
    pub input: SalaryStructureInput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayslipRequest {
    pub employee_id: String,
    pub month: String,
}

impl PayslipRequest {
    pub fn validate(employee_id: &str, month: &str) -> Result<Self, ApiError> {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(ApiError::validation("従業員IDを入力してください。"));
        }
        if !is_valid_month(month) {
            return Err(ApiError::validation("対象月は YYYY-MM 形式で入力してください。"));
        }
        Ok(Self {
            employee_id: employee_id.to_string(),
            month: month.trim().to_string(),
        })
    }

    pub fn filename(&self) -> String {
        format!("payslip_{}_{}.pdf", self.employee_id, self.month)
    }
}

#[derive(Clone, Copy)]
pub struct SalaryViewModel {
    pub list: PagedList<SalaryStructure>,
    pub form_state: SalaryFormState,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<String>>,
    pub pending_delete: RwSignal<Option<SalaryStructure>>,
    pub payslip_employee: RwSignal<String>,
    pub payslip_month: RwSignal<String>,
    pub messages: RwSignal<MessageState>,
    pub form_messages: RwSignal<MessageState>,
    pub save_action: Action<StructureSavePayload, Result<SavedStructure, ApiError>>,
    pub delete_action: Action<String, Result<String, ApiError>>,
    pub payslip_action: Action<PayslipRequest, Result<(), ApiError>>,
}

pub fn salary_reconciler() -> Reconciler<SalaryStructure> {
    Reconciler::new(structure_matches, by_name)
}

pub(crate) fn apply_save_result(
    result: Option<Result<SavedStructure, ApiError>>,
    list: PagedList<SalaryStructure>,
    form_state: SalaryFormState,
    form_open: RwSignal<bool>,
    editing: RwSignal<Option<String>>,
    messages: RwSignal<MessageState>,
    form_messages: RwSignal<MessageState>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(SavedStructure::Created(structure)) => {
            list.apply_create(structure);
            messages.update(|msg| msg.set_success("給与体系を登録しました。"));
        }
        Ok(SavedStructure::Updated(structure)) => {
            list.apply_update(structure);
            messages.update(|msg| msg.set_success("給与体系を更新しました。"));
        }
        Err(err) => {
            form_messages.update(|msg| msg.set_error(err));
            return;
        }
    }
    form_state.reset();
    form_open.set(false);
    editing.set(None);
    form_messages.update(MessageState::clear);
}

pub(crate) fn apply_delete_result(
    result: Option<Result<String, ApiError>>,
    list: PagedList<SalaryStructure>,
    pending_delete: RwSignal<Option<SalaryStructure>>,
    messages: RwSignal<MessageState>,
) {
    let Some(result) = result else {
        return;
    };
    pending_delete.set(None);
    match result {
        Ok(id) => {
            list.apply_delete(&id);
            messages.update(|msg| msg.set_success("給与体系を削除しました。"));
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

impl SalaryViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = SalaryRepository::new(api);
        let fetch_repo = repository.clone();
        let list = PagedList::new(
            config::current().default_page_size,
            FilterSet::new(),
            salary_reconciler(),
            move |query| {
                let repo = fetch_repo.clone();
                async move { repo.list(query).await }
            },
        );
        let repository = store_value(repository);

        let form_state = SalaryFormState::default();
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<String>);
        let pending_delete = create_rw_signal(None::<SalaryStructure>);
        let payslip_employee = create_rw_signal(String::new());
        let payslip_month = create_rw_signal(current_month());
        let messages = create_rw_signal(MessageState::default());
        let form_messages = create_rw_signal(MessageState::default());

        let save_action = create_action(move |payload: &StructureSavePayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(payload.id, payload.input).await }
        });
        let delete_action = create_action(move |id: &String| {
            let repo = repository.get_value();
            let id = id.clone();
            async move { repo.delete(&id).await.map(|_| id) }
        });
        let payslip_action = create_action(move |request: &PayslipRequest| {
            let repo = repository.get_value();
            let request = request.clone();
            async move {
                let bytes = repo.payslip(&request.employee_id, &request.month).await?;
                trigger_blob_download(&request.filename(), PDF_MIME, &bytes)
                    .map_err(|err| ApiError::unknown(err.to_string()))
            }
        });

        create_effect(move |_| list.fetch(1));
        create_effect(move |_| {
            apply_save_result(
                save_action.value().get(),
                list,
                form_state,
                form_open,
                editing,
                messages,
                form_messages,
            );
        });
        create_effect(move |_| {
            apply_delete_result(delete_action.value().get(), list, pending_delete, messages);
        });
        create_effect(move |_| match payslip_action.value().get() {
            Some(Ok(())) => messages.update(|msg| msg.set_success("給与明細をダウンロードしました。")),
            Some(Err(err)) => messages.update(|msg| msg.set_error(err)),
            None => {}
        });

        Self {
            list,
            form_state,
            form_open,
            editing,
            pending_delete,
            payslip_employee,
            payslip_month,
            messages,
            form_messages,
            save_action,
            delete_action,
            payslip_action,
        }
    }

    pub fn open_new(&self) {
        self.form_state.reset();
        self.editing.set(None);
        self.form_messages.update(MessageState::clear);
        self.form_open.set(true);
    }

    pub fn open_edit(&self, structure: &SalaryStructure) {
        self.form_state.load(structure);
        self.editing.set(Some(structure.id.clone()));
        self.form_messages.update(MessageState::clear);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.editing.set(None);
        self.form_state.reset();
    }

    pub fn submit(&self) {
        match self.form_state.to_payload() {
            Ok(input) => self.save_action.dispatch(StructureSavePayload {
                id: self.editing.get_untracked(),
                input,
            }),
            Err(err) => self.form_messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn confirm_delete(&self) {
        if let Some(structure) = self.pending_delete.get_untracked() {
            self.delete_action.dispatch(structure.id);
        }
    }

    pub fn download_payslip(&self) {
        match PayslipRequest::validate(
            &self.payslip_employee.get_untracked(),
            &self.payslip_month.get_untracked(),
        ) {
            Ok(request) => self.payslip_action.dispatch(request),
            Err(err) => self.messages.update(|msg| msg.set_error(err)),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::ListResponse;
    use crate::pages::salary::utils::sample_structure;
    use crate::pagination::PageWindow;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};

    #[test]
    fn payslip_request_validation() {
        assert!(PayslipRequest::validate(" ", "2025-03").is_err());
        assert!(PayslipRequest::validate("e1", "2025-3").is_err());
        assert!(PayslipRequest::validate("e1", "2025-13").is_err());
        let request = PayslipRequest::validate(" e1 ", "2025-03").unwrap();
        assert_eq!(request.filename(), "payslip_e1_2025-03.pdf");
    }

    #[test]
    fn created_structure_is_inserted_by_name() {
        with_runtime(|| {
            let list = PagedList::new(20, FilterSet::new(), salary_reconciler(), |_q| async {
                Err(ApiError::request_failed("offline"))
            });
            list.window.set(PageWindow::from(ListResponse {
                page: 1,
                per_page: 20,
                total: 2,
                items: vec![sample_structure("s1", "A職"), sample_structure("s3", "C職")],
            }));
            let form_open = create_rw_signal(true);
            let form_state = SalaryFormState::default();
            form_state.name.set("draft".into());

            apply_save_result(
                Some(Ok(SavedStructure::Created(sample_structure("s2", "B職")))),
                list,
                form_state,
                form_open,
                create_rw_signal(None),
                create_rw_signal(MessageState::default()),
                create_rw_signal(MessageState::default()),
            );

            let names: Vec<String> = list
                .window
                .get_untracked()
                .items
                .into_iter()
                .map(|s| s.name)
                .collect();
            assert_eq!(names, vec!["A職", "B職", "C職"]);
            assert!(!form_open.get_untracked());
            assert!(form_state.name.get_untracked().is_empty());
        });
    }

    #[test]
    fn failed_save_keeps_form_open() {
        with_runtime(|| {
            let list = PagedList::new(20, FilterSet::new(), salary_reconciler(), |_q| async {
                Err(ApiError::request_failed("offline"))
            });
            let form_open = create_rw_signal(true);
            let form_messages = create_rw_signal(MessageState::default());
            apply_save_result(
                Some(Err(ApiError::validation("同名の給与体系があります"))),
                list,
                SalaryFormState::default(),
                form_open,
                create_rw_signal(Some("s1".into())),
                create_rw_signal(MessageState::default()),
                form_messages,
            );
            assert!(form_open.get_untracked());
            assert!(form_messages.get_untracked().error.is_some());
        });
    }

    #[test]
    fn deleting_last_row_of_last_page_steps_back() {
        with_local_runtime_async(|| async {
            let list = PagedList::new(1, FilterSet::new(), salary_reconciler(), |query| async move {
                Ok(ListResponse {
                    page: query.page_index as i64,
                    per_page: 1,
                    total: 1,
                    items: vec![sample_structure("s1", "A職")],
                })
            });
            list.window.set(PageWindow::from(ListResponse {
                page: 2,
                per_page: 1,
                total: 2,
                items: vec![sample_structure("s2", "B職")],
            }));
            let pending = create_rw_signal(Some(sample_structure("s2", "B職")));

            apply_delete_result(
                Some(Ok("s2".into())),
                list,
                pending,
                create_rw_signal(MessageState::default()),
            );
            assert_eq!(list.window.get_untracked().page_index, 1);
            let refetched = wait_until(|| {
                list.window
                    .with_untracked(|w| w.items.first().map(|s| s.id == "s1"))
                    .unwrap_or(false)
            })
            .await;
            assert!(refetched);
            assert!(pending.get_untracked().is_none());
        });
    }
}
