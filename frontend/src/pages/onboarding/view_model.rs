use crate::{
    api::{ApiClient, ApiError, OnboardingRequest, OnboardingResponse, SalaryStructure},
    state::message::MessageState,
};
use leptos::*;

use super::{
    repository::OnboardingRepository,
    utils::{OnboardingDraft, OnboardingStep},
};

#[derive(Clone, Copy)]
pub struct OnboardingViewModel {
    pub step: RwSignal<OnboardingStep>,
    pub draft: OnboardingDraft,
    pub salary_options: Resource<(), Result<Vec<SalaryStructure>, ApiError>>,
    pub messages: RwSignal<MessageState>,
    pub created: RwSignal<Option<OnboardingResponse>>,
    pub submit_action: Action<OnboardingRequest, Result<OnboardingResponse, ApiError>>,
}

pub(crate) fn apply_submit_result(
    result: Option<Result<OnboardingResponse, ApiError>>,
    created: RwSignal<Option<OnboardingResponse>>,
    messages: RwSignal<MessageState>,
) {
    match result {
        Some(Ok(response)) => {
            log::info!("Onboarded employee {}", response.employee_id);
            messages.update(|msg| {
                msg.set_success(format!("社員 {} を登録しました。", response.employee_code))
            });
            created.set(Some(response));
        }
        Some(Err(err)) => {
            log::error!("Onboarding failed: {}", err);
            messages.update(|msg| msg.set_error(err));
        }
        None => {}
    }
}

impl OnboardingViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(OnboardingRepository::new(api));
        let salary_options = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.salary_options().await }
            },
        );
        let messages = create_rw_signal(MessageState::default());
        let created = create_rw_signal(None::<OnboardingResponse>);
        let submit_action = create_action(move |request: &OnboardingRequest| {
            let repo = repository.get_value();
            let request = request.clone();
            async move { repo.submit(request).await }
        });
        create_effect(move |_| {
            apply_submit_result(submit_action.value().get(), created, messages);
        });

        Self {
            step: create_rw_signal(OnboardingStep::default()),
            draft: OnboardingDraft::default(),
            salary_options,
            messages,
            created,
            submit_action,
        }
    }

    /// Moves forward only when the current step validates.
    pub fn advance(&self) {
        let step = self.step.get_untracked();
        match self.draft.validate(step) {
            Ok(()) => {
                self.messages.update(MessageState::clear);
                if let Some(next) = step.next() {
                    self.step.set(next);
                }
            }
            Err(err) => self.messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn back(&self) {
        if let Some(previous) = self.step.get_untracked().previous() {
            self.messages.update(MessageState::clear);
            self.step.set(previous);
        }
    }

    /// Jumps to an earlier step; later steps are reachable only via `advance`.
    pub fn jump_to(&self, step: OnboardingStep) {
        if step < self.step.get_untracked() {
            self.messages.update(MessageState::clear);
            self.step.set(step);
        }
    }

    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        match self.draft.to_request() {
            Ok(request) => self.submit_action.dispatch(request),
            Err(err) => self.messages.update(|msg| msg.set_error(err)),
        }
    }

    pub fn start_over(&self) {
        self.draft.reset();
        self.created.set(None);
        self.messages.update(MessageState::clear);
        self.step.set(OnboardingStep::Personal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pages::onboarding::utils::filled_draft,
        test_support::ssr::{with_quiet_runtime, with_runtime},
    };

    fn view_model() -> OnboardingViewModel {
        let vm = OnboardingViewModel::new();
        OnboardingViewModel {
            draft: filled_draft(),
            ..vm
        }
    }

    #[test]
    fn invalid_step_blocks_advance() {
        with_quiet_runtime(|| {
            let vm = view_model();
            vm.draft.last_name.set(String::new());
            vm.advance();
            assert_eq!(vm.step.get_untracked(), OnboardingStep::Personal);
            assert!(vm.messages.get_untracked().error.is_some());
        });
    }

    #[test]
    fn going_back_keeps_entered_values() {
        with_quiet_runtime(|| {
            let vm = view_model();
            vm.advance();
            vm.advance();
            assert_eq!(vm.step.get_untracked(), OnboardingStep::Salary);
            vm.back();
            vm.back();
            assert_eq!(vm.step.get_untracked(), OnboardingStep::Personal);
            assert_eq!(vm.draft.department.get_untracked(), "営業部");
            vm.jump_to(OnboardingStep::Review);
            assert_eq!(vm.step.get_untracked(), OnboardingStep::Personal);
        });
    }

    #[test]
    fn submit_result_records_created_employee() {
        with_runtime(|| {
            let created = create_rw_signal(None);
            let messages = create_rw_signal(MessageState::default());
            apply_submit_result(
                Some(Ok(OnboardingResponse {
                    employee_id: "e42".into(),
                    employee_code: "EMP-042".into(),
                })),
                created,
                messages,
            );
            assert_eq!(
                created.get_untracked().map(|c| c.employee_id),
                Some("e42".to_string())
            );
            assert!(messages
                .get_untracked()
                .success
                .is_some_and(|m| m.contains("EMP-042")));
        });
    }
}
