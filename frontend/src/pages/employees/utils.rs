use std::cmp::Ordering;

use crate::{
    api::{ApiError, Employee, EmployeeInput},
    pagination::FilterSet,
    utils::form::{is_plausible_email, optional_string, parse_date, required},
};
use leptos::*;

pub const EMPLOYEE_STATUSES: &[(&str, &str)] = &[
    ("active", "在籍"),
    ("on_leave", "休職中"),
    ("terminated", "退職"),
];

pub fn status_label(status: &str) -> &str {
    EMPLOYEE_STATUSES
        .iter()
        .find(|(value, _)| *value == status)
        .map(|(_, label)| *label)
        .unwrap_or(status)
}

pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "active" => "bg-status-success-bg text-status-success-text",
        "on_leave" => "bg-status-warning-bg text-status-warning-text",
        _ => "bg-surface-muted text-fg-muted",
    }
}

/// Mirrors the server-side `search`, `department` and `status` filters.
pub fn employee_matches(employee: &Employee, filters: &FilterSet) -> bool {
    let department = employee.department.as_deref().unwrap_or_default();
    filters.admits("department", department)
        && filters.admits("status", &employee.status)
        && filters
            .scalar("search")
            .map(|term| text_matches(employee, term))
            .unwrap_or(true)
}

pub fn employee_order(a: &Employee, b: &Employee) -> Ordering {
    a.employee_code.cmp(&b.employee_code)
}

/// Substring match on name, e-mail and employee code, case-insensitive.
pub fn text_matches(employee: &Employee, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        employee.first_name.as_str(),
        employee.last_name.as_str(),
        employee.email.as_str(),
        employee.employee_code.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
        || employee.full_name().to_lowercase().contains(&term)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

#[derive(Clone, Copy)]
pub struct EmployeeFormState {
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub department: RwSignal<String>,
    pub position: RwSignal<String>,
    pub status: RwSignal<String>,
    pub hire_date: RwSignal<String>,
    pub salary_structure_id: RwSignal<String>,
}

impl Default for EmployeeFormState {
    fn default() -> Self {
        Self {
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            department: create_rw_signal(String::new()),
            position: create_rw_signal(String::new()),
            status: create_rw_signal("active".to_string()),
            hire_date: create_rw_signal(String::new()),
            salary_structure_id: create_rw_signal(String::new()),
        }
    }
}

impl EmployeeFormState {
    pub fn reset(&self) {
        for signal in [
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.department,
            self.position,
            self.hire_date,
            self.salary_structure_id,
        ] {
            signal.set(String::new());
        }
        self.status.set("active".into());
    }

    pub fn load(&self, employee: &Employee) {
        self.first_name.set(employee.first_name.clone());
        self.last_name.set(employee.last_name.clone());
        self.email.set(employee.email.clone());
        self.phone.set(employee.phone.clone().unwrap_or_default());
        self.department
            .set(employee.department.clone().unwrap_or_default());
        self.position.set(employee.position.clone().unwrap_or_default());
        self.status.set(employee.status.clone());
        self.hire_date
            .set(employee.hire_date.format("%Y-%m-%d").to_string());
        self.salary_structure_id
            .set(employee.salary_structure_id.clone().unwrap_or_default());
    }

    pub fn to_payload(self) -> Result<EmployeeInput, ApiError> {
        let last_name = required(self.last_name.get(), "姓を入力してください。")?;
        let first_name = required(self.first_name.get(), "名を入力してください。")?;
        let email = self.email.get().trim().to_string();
        if !is_plausible_email(&email) {
            return Err(ApiError::validation(
                "メールアドレスの形式が正しくありません。",
            ));
        }
        let hire_date = parse_date(
            &self.hire_date.get(),
            "入社日を YYYY-MM-DD 形式で入力してください。",
        )?;
        let status = self.status.get();
        if !EMPLOYEE_STATUSES.iter().any(|(value, _)| *value == status) {
            return Err(ApiError::validation("在籍区分を選択してください。"));
        }
        Ok(EmployeeInput {
            first_name,
            last_name,
            email,
            phone: optional_string(self.phone.get()),
            department: optional_string(self.department.get()),
            position: optional_string(self.position.get()),
            status,
            hire_date,
            salary_structure_id: optional_string(self.salary_structure_id.get()),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_employee(id: &str, code: &str) -> Employee {
    Employee {
        id: id.into(),
        employee_code: code.into(),
        first_name: "Hanako".into(),
        last_name: "Yamada".into(),
        email: format!("{}@example.com", id),
        phone: None,
        department: Some("Sales".into()),
        position: None,
        status: "active".into(),
        hire_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        salary_structure_id: None,
    }
}
