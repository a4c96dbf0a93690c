use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Row;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub is_system_admin: bool,
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl UserResponse {
    pub fn is_hr_admin(&self) -> bool {
        self.is_system_admin
            || self.role.eq_ignore_ascii_case("admin")
            || self.role.eq_ignore_ascii_case("hr")
    }
}

/// Envelope shared by every paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub status: String,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub salary_structure_id: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

impl Row for Employee {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub hire_date: NaiveDate,
    pub salary_structure_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmployeeStats {
    pub total: i64,
    pub active: i64,
    pub on_leave: i64,
    #[serde(default)]
    pub new_this_month: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkItemError {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BulkActionSummary {
    pub succeeded: u32,
    pub failed: u32,
    #[serde(default)]
    pub errors: Vec<BulkItemError>,
}

impl BulkActionSummary {
    /// Requested ids the server did not report as failed.
    pub fn succeeded_ids(&self, requested: &[String]) -> Vec<String> {
        requested
            .iter()
            .filter(|id| !self.errors.iter().any(|err| &err.id == *id))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub half_day: bool,
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
    #[serde(default)]
    pub decision_comment: Option<String>,
    #[serde(default)]
    pub decided_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

impl Row for LeaveRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveInput {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub half_day: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveDecisionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaveBulkKind {
    Approve,
    Reject,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBulkRequest {
    pub action: LeaveBulkKind,
    pub ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeaveStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    #[serde(default)]
    pub on_leave_today: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalance {
    pub leave_type: String,
    pub entitled: f64,
    pub used: f64,
    #[serde(default)]
    pub pending: f64,
}

impl LeaveBalance {
    pub fn remaining(&self) -> f64 {
        (self.entitled - self.used - self.pending).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComponentKind {
    Allowance,
    Deduction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryComponent {
    pub name: String,
    pub kind: SalaryComponentKind,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryStructure {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub base_amount: f64,
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
    #[serde(default)]
    pub assigned_count: i64,
}

impl SalaryStructure {
    pub fn net_amount(&self) -> f64 {
        self.components
            .iter()
            .fold(self.base_amount, |acc, component| match component.kind {
                SalaryComponentKind::Allowance => acc + component.amount,
                SalaryComponentKind::Deduction => acc - component.amount,
            })
    }
}

impl Row for SalaryStructure {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryStructureInput {
    pub name: String,
    pub currency: String,
    pub base_amount: f64,
    pub components: Vec<SalaryComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeProfile {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    pub hire_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub salary_structure: Option<SalaryStructure>,
}

impl EmployeeProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingPersonal {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingJob {
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub manager_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingSalary {
    pub salary_structure_id: Option<String>,
    pub base_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingRequest {
    pub personal: OnboardingPersonal,
    pub job: OnboardingJob,
    pub salary: OnboardingSalary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingResponse {
    pub employee_id: String,
    pub employee_code: String,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "TIMEOUT".to_string(),
            details: None,
        }
    }
}
