use crate::{
    api::{ApiClient, ApiError, EmployeeProfile, ProfileUpdate},
    state::message::MessageState,
};
use leptos::*;

use super::{
    repository::ProfileRepository,
    utils::{ProfileFormState, ProfileTab},
};

#[derive(Clone, Copy)]
pub struct ProfileViewModel {
    pub profile_resource: Resource<u32, Result<EmployeeProfile, ApiError>>,
    reload_trigger: RwSignal<u32>,
    /// Latest profile returned by a save, shown in place of the loaded one.
    pub saved: RwSignal<Option<EmployeeProfile>>,
    pub active_tab: RwSignal<ProfileTab>,
    pub editing: RwSignal<bool>,
    pub form_state: ProfileFormState,
    pub messages: RwSignal<MessageState>,
    pub update_action: Action<ProfileUpdate, Result<EmployeeProfile, ApiError>>,
}

pub(crate) fn apply_update_result(
    result: Option<Result<EmployeeProfile, ApiError>>,
    saved: RwSignal<Option<EmployeeProfile>>,
    editing: RwSignal<bool>,
    messages: RwSignal<MessageState>,
) {
    match result {
        Some(Ok(profile)) => {
            saved.set(Some(profile));
            editing.set(false);
            messages.update(|msg| msg.set_success("プロフィールを更新しました。"));
        }
        Some(Err(err)) => messages.update(|msg| msg.set_error(err)),
        None => {}
    }
}

impl ProfileViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(ProfileRepository::new(api));
        let reload = create_rw_signal(0u32);
        let profile_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.load().await }
            },
        );
        let saved = create_rw_signal(None::<EmployeeProfile>);
        let editing = create_rw_signal(false);
        let messages = create_rw_signal(MessageState::default());

        let update_action = create_action(move |update: &ProfileUpdate| {
            let repo = repository.get_value();
            let update = update.clone();
            async move { repo.update(update).await }
        });
        create_effect(move |_| {
            apply_update_result(update_action.value().get(), saved, editing, messages);
        });

        Self {
            profile_resource,
            reload_trigger: reload,
            saved,
            active_tab: create_rw_signal(ProfileTab::default()),
            editing,
            form_state: ProfileFormState::default(),
            messages,
            update_action,
        }
    }

    pub fn profile(&self) -> Signal<Option<EmployeeProfile>> {
        let saved = self.saved;
        let resource = self.profile_resource;
        Signal::derive(move || saved.get().or_else(|| resource.get().and_then(Result::ok)))
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let resource = self.profile_resource;
        Signal::derive(move || resource.get().and_then(Result::err))
    }

    pub fn reload(&self) {
        self.saved.set(None);
        self.reload_trigger.update(|n| *n += 1);
    }

    pub fn start_edit(&self) {
        if let Some(profile) = self.profile().get_untracked() {
            self.form_state.load(&profile);
            self.messages.update(MessageState::clear);
            self.editing.set(true);
        }
    }

    pub fn save(&self) {
        match self.form_state.to_payload() {
            Ok(update) => self.update_action.dispatch(update),
            Err(err) => self.messages.update(|msg| msg.set_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::profile::utils::sample_profile;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn saved_profile_closes_editor() {
        with_runtime(|| {
            let saved = create_rw_signal(None);
            let editing = create_rw_signal(true);
            let messages = create_rw_signal(MessageState::default());
            apply_update_result(Some(Ok(sample_profile())), saved, editing, messages);
            assert!(!editing.get_untracked());
            assert_eq!(saved.get_untracked().map(|p| p.id), Some("e1".to_string()));

            editing.set(true);
            apply_update_result(
                Some(Err(ApiError::validation("住所が長すぎます"))),
                saved,
                editing,
                messages,
            );
            assert!(editing.get_untracked());
            assert!(messages.get_untracked().error.is_some());
        });
    }
}
