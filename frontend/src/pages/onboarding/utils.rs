use crate::{
    api::{ApiError, OnboardingJob, OnboardingPersonal, OnboardingRequest, OnboardingSalary},
    utils::form::{
        is_plausible_email, is_plausible_phone, optional_string, parse_amount, parse_date,
        required,
    },
};
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OnboardingStep {
    #[default]
    Personal,
    Job,
    Salary,
    Review,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Personal,
        OnboardingStep::Job,
        OnboardingStep::Salary,
        OnboardingStep::Review,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OnboardingStep::Personal => "基本情報",
            OnboardingStep::Job => "配属",
            OnboardingStep::Salary => "給与",
            OnboardingStep::Review => "確認",
        }
    }

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Field values for every step, kept for the lifetime of the wizard so that
/// moving back and forth never discards input.
#[derive(Clone, Copy)]
pub struct OnboardingDraft {
    pub last_name: RwSignal<String>,
    pub first_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub date_of_birth: RwSignal<String>,
    pub department: RwSignal<String>,
    pub position: RwSignal<String>,
    pub hire_date: RwSignal<String>,
    pub manager_id: RwSignal<String>,
    pub salary_structure_id: RwSignal<String>,
    pub base_amount: RwSignal<String>,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            last_name: create_rw_signal(String::new()),
            first_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            date_of_birth: create_rw_signal(String::new()),
            department: create_rw_signal(String::new()),
            position: create_rw_signal(String::new()),
            hire_date: create_rw_signal(String::new()),
            manager_id: create_rw_signal(String::new()),
            salary_structure_id: create_rw_signal(String::new()),
            base_amount: create_rw_signal(String::new()),
        }
    }
}

impl OnboardingDraft {
    pub fn reset(&self) {
        for field in [
            self.last_name,
            self.first_name,
            self.email,
            self.phone,
            self.date_of_birth,
            self.department,
            self.position,
            self.hire_date,
            self.manager_id,
            self.salary_structure_id,
            self.base_amount,
        ] {
            field.set(String::new());
        }
    }

    pub fn personal(&self) -> Result<OnboardingPersonal, ApiError> {
        let last_name = required(self.last_name.get_untracked(), "姓を入力してください。")?;
        let first_name = required(self.first_name.get_untracked(), "名を入力してください。")?;
        let email = required(self.email.get_untracked(), "メールアドレスを入力してください。")?;
        if !is_plausible_email(&email) {
            return Err(ApiError::validation("メールアドレスの形式が正しくありません。"));
        }
        let phone = optional_string(self.phone.get_untracked());
        if phone.as_deref().is_some_and(|p| !is_plausible_phone(p)) {
            return Err(ApiError::validation("電話番号の形式が正しくありません。"));
        }
        let date_of_birth = optional_string(self.date_of_birth.get_untracked())
            .map(|value| parse_date(&value, "生年月日の形式が正しくありません。"))
            .transpose()?;
        Ok(OnboardingPersonal {
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
        })
    }

    pub fn job(&self) -> Result<OnboardingJob, ApiError> {
        let department = required(self.department.get_untracked(), "部署を入力してください。")?;
        let position = required(self.position.get_untracked(), "役職を入力してください。")?;
        let hire_date = required(self.hire_date.get_untracked(), "入社日を入力してください。")
            .and_then(|value| parse_date(&value, "入社日の形式が正しくありません。"))?;
        Ok(OnboardingJob {
            department,
            position,
            hire_date,
            manager_id: optional_string(self.manager_id.get_untracked()),
        })
    }

    pub fn salary(&self) -> Result<OnboardingSalary, ApiError> {
        let salary_structure_id = optional_string(self.salary_structure_id.get_untracked());
        let base_amount = optional_string(self.base_amount.get_untracked())
            .map(|value| parse_amount(&value, "基本給は0以上の数値で入力してください。"))
            .transpose()?;
        if salary_structure_id.is_none() && base_amount.is_none() {
            return Err(ApiError::validation(
                "給与体系を選択するか、基本給を入力してください。",
            ));
        }
        Ok(OnboardingSalary {
            salary_structure_id,
            base_amount,
        })
    }

    pub fn validate(&self, step: OnboardingStep) -> Result<(), ApiError> {
        match step {
            OnboardingStep::Personal => self.personal().map(drop),
            OnboardingStep::Job => self.job().map(drop),
            OnboardingStep::Salary => self.salary().map(drop),
            OnboardingStep::Review => self.to_request().map(drop),
        }
    }

    pub fn to_request(&self) -> Result<OnboardingRequest, ApiError> {
        Ok(OnboardingRequest {
            personal: self.personal()?,
            job: self.job()?,
            salary: self.salary()?,
        })
    }
}

#[cfg(test)]
pub(crate) fn filled_draft() -> OnboardingDraft {
    let draft = OnboardingDraft::default();
    draft.last_name.set("山田".into());
    draft.first_name.set("花子".into());
    draft.email.set("hanako@example.com".into());
    draft.department.set("営業部".into());
    draft.position.set("主任".into());
    draft.hire_date.set("2025-04-01".into());
    draft.base_amount.set("280,000".into());
    draft
}
