use crate::{
    api::{ApiClient, ApiError, LeaveBalance, LeaveInput, LeaveRequest},
    config,
    pages::leaves_admin::utils::newest_first,
    pagination::{FilterSet, PagedList, Reconciler},
    state::message::MessageState,
};
use leptos::*;

use super::{
    repository::{MyLeavesRepository, SavedLeave},
    utils::{own_leave_matches, LeaveFormState},
};

#[derive(Clone)]
pub struct LeaveSavePayload {
    pub id: Option<String>,
    pub input: LeaveInput,
}

#[derive(Clone, Copy)]
pub struct MyLeavesViewModel {
    pub list: PagedList<LeaveRequest>,
    pub balance_resource: Resource<u32, Result<Vec<LeaveBalance>, ApiError>>,
    pub balance_reload: RwSignal<u32>,
    pub form_state: LeaveFormState,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<String>>,
    pub pending_cancel: RwSignal<Option<LeaveRequest>>,
    pub messages: RwSignal<MessageState>,
    pub form_messages: RwSignal<MessageState>,
    pub save_action: Action<LeaveSavePayload, Result<SavedLeave, ApiError>>,
    pub cancel_action: Action<String, Result<String, ApiError>>,
}

pub fn own_leave_reconciler() -> Reconciler<LeaveRequest> {
    Reconciler::new(own_leave_matches, newest_first)
}

pub(crate) fn apply_save_result(
    result: Option<Result<SavedLeave, ApiError>>,
    list: PagedList<LeaveRequest>,
    form_state: LeaveFormState,
    form_open: RwSignal<bool>,
    editing: RwSignal<Option<String>>,
    messages: RwSignal<MessageState>,
    form_messages: RwSignal<MessageState>,
    balance_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(saved) => {
            let message = match saved {
                SavedLeave::Created(leave) => {
                    list.apply_create(leave);
                    "休暇を申請しました。"
                }
                SavedLeave::Updated(leave) => {
                    list.apply_update(leave);
                    "申請内容を更新しました。"
                }
            };
            form_state.reset();
            form_open.set(false);
            editing.set(None);
            form_messages.update(MessageState::clear);
            messages.update(|msg| msg.set_success(message));
            balance_reload.update(|value| *value = value.wrapping_add(1));
        }
        Err(err) => form_messages.update(|msg| msg.set_error(err)),
    }
}

pub(crate) fn apply_cancel_result(
    result: Option<Result<String, ApiError>>,
    list: PagedList<LeaveRequest>,
    pending_cancel: RwSignal<Option<LeaveRequest>>,
    messages: RwSignal<MessageState>,
    balance_reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    pending_cancel.set(None);
    match result {
        Ok(id) => {
            list.apply_delete(&id);
            messages.update(|msg| msg.set_success("申請を取り消しました。"));
            balance_reload.update(|value| *value = value.wrapping_add(1));
        }
        Err(err) => messages.update(|msg| msg.set_error(err)),
    }
}

impl MyLeavesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = MyLeavesRepository::new(api);
        let fetch_repo = repository.clone();
        let list = PagedList::new(
            config::current().default_page_size,
            FilterSet::new(),
            own_leave_reconciler(),
            move |query| {
                let repo = fetch_repo.clone();
                async move { repo.list(query).await }
            },
        );
        let repository = store_value(repository);

        let balance_reload = create_rw_signal(0u32);
        let balance_resource = create_resource(
            move || balance_reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.balance().await }
            },
        );

        let form_state = LeaveFormState::default();
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<String>);
        let pending_cancel = create_rw_signal(None::<LeaveRequest>);
        let messages = create_rw_signal(MessageState::default());
        let form_messages = create_rw_signal(MessageState::default());

        let save_action = create_action(move |payload: &LeaveSavePayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(payload.id, payload.input).await }
        });
        let cancel_action = create_action(move |id: &String| {
            let repo = repository.get_value();
            let id = id.clone();
            async move { repo.cancel(&id).await.map(|_| id) }
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
                balance_reload,
            );
        });
        create_effect(move |_| {
            apply_cancel_result(
                cancel_action.value().get(),
                list,
                pending_cancel,
                messages,
                balance_reload,
            );
        });

        Self {
            list,
            balance_resource,
            balance_reload,
            form_state,
            form_open,
            editing,
            pending_cancel,
            messages,
            form_messages,
            save_action,
            cancel_action,
        }
    }

    pub fn active_tab(&self) -> Signal<String> {
        let filters = self.list.filters;
        Signal::derive(move || {
            filters.with(|f| f.scalar("status").unwrap_or_default().to_string())
        })
    }

    pub fn select_tab(&self, status: &str) {
        let status = status.to_string();
        self.list
            .update_filters(move |filters| filters.set_scalar("status", status));
    }

    pub fn open_new(&self) {
        self.form_state.reset();
        self.editing.set(None);
        self.form_messages.update(MessageState::clear);
        self.form_open.set(true);
    }

    /// Only pending requests can be edited.
    pub fn open_edit(&self, leave: &LeaveRequest) {
        if !leave.is_pending() {
            return;
        }
        self.form_state.load(leave);
        self.editing.set(Some(leave.id.clone()));
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
            Ok(input) => self.save_action.dispatch(LeaveSavePayload {
                id: self.editing.get_untracked(),
                input,
            }),
            Err(err) => self.form_messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn confirm_cancel(&self) {
        if let Some(leave) = self.pending_cancel.get_untracked() {
            self.cancel_action.dispatch(leave.id);
        }
    }
}
