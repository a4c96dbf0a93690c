use crate::{
    api::{ApiError, EmployeeProfile, ProfileUpdate},
    utils::form::{is_plausible_phone, optional_string},
};
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Personal,
    Employment,
    Salary,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::Personal, ProfileTab::Employment, ProfileTab::Salary];

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Personal => "個人情報",
            ProfileTab::Employment => "雇用情報",
            ProfileTab::Salary => "給与",
        }
    }
}

#[derive(Clone, Copy)]
pub struct ProfileFormState {
    pub phone: RwSignal<String>,
    pub address: RwSignal<String>,
    pub emergency_contact_name: RwSignal<String>,
    pub emergency_contact_phone: RwSignal<String>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        Self {
            phone: create_rw_signal(String::new()),
            address: create_rw_signal(String::new()),
            emergency_contact_name: create_rw_signal(String::new()),
            emergency_contact_phone: create_rw_signal(String::new()),
        }
    }
}

impl ProfileFormState {
    pub fn load(&self, profile: &EmployeeProfile) {
        self.phone.set(profile.phone.clone().unwrap_or_default());
        self.address.set(profile.address.clone().unwrap_or_default());
        self.emergency_contact_name
            .set(profile.emergency_contact_name.clone().unwrap_or_default());
        self.emergency_contact_phone
            .set(profile.emergency_contact_phone.clone().unwrap_or_default());
    }

    pub fn to_payload(&self) -> Result<ProfileUpdate, ApiError> {
        let phone = optional_string(self.phone.get());
        let emergency_contact_phone = optional_string(self.emergency_contact_phone.get());
        for (value, label) in [(&phone, "電話番号"), (&emergency_contact_phone, "緊急連絡先の電話番号")] {
            if let Some(value) = value {
                if !is_plausible_phone(value) {
                    return Err(ApiError::validation(format!("{}の形式が正しくありません。", label)));
                }
            }
        }
        let emergency_contact_name = optional_string(self.emergency_contact_name.get());
        if emergency_contact_name.is_some() != emergency_contact_phone.is_some() {
            return Err(ApiError::validation(
                "緊急連絡先は氏名と電話番号の両方を入力してください。",
            ));
        }
        Ok(ProfileUpdate {
            phone,
            address: optional_string(self.address.get()),
            emergency_contact_name,
            emergency_contact_phone,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> EmployeeProfile {
    EmployeeProfile {
        id: "e1".into(),
        employee_code: "EMP-001".into(),
        first_name: "花子".into(),
        last_name: "山田".into(),
        email: "hanako@example.com".into(),
        phone: Some("03-1234-5678".into()),
        address: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        department: Some("営業部".into()),
        position: Some("主任".into()),
        manager_name: Some("佐藤 一郎".into()),
        hire_date: chrono::NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
        status: "active".into(),
        salary_structure: None,
    }
}
