use crate::{
    api::{ApiError, LeaveInput, LeaveRequest},
    components::leave_labels::LEAVE_TYPES,
    pagination::FilterSet,
    utils::form::{optional_string, parse_date},
};
use leptos::*;

pub const STATUS_TABS: &[(&str, &str)] = &[
    ("", "すべて"),
    ("pending", "承認待ち"),
    ("approved", "承認済み"),
    ("rejected", "却下"),
];

pub fn own_leave_matches(leave: &LeaveRequest, filters: &FilterSet) -> bool {
    filters.admits("status", &leave.status)
}

#[derive(Clone, Copy)]
pub struct LeaveFormState {
    leave_type: RwSignal<String>,
    start_date: RwSignal<String>,
    end_date: RwSignal<String>,
    half_day: RwSignal<bool>,
    reason: RwSignal<String>,
}

impl Default for LeaveFormState {
    fn default() -> Self {
        Self {
            leave_type: create_rw_signal("annual".to_string()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            half_day: create_rw_signal(false),
            reason: create_rw_signal(String::new()),
        }
    }
}

impl LeaveFormState {
    pub fn leave_type_signal(&self) -> RwSignal<String> {
        self.leave_type
    }

    pub fn start_signal(&self) -> RwSignal<String> {
        self.start_date
    }

    pub fn end_signal(&self) -> RwSignal<String> {
        self.end_date
    }

    pub fn half_day_signal(&self) -> RwSignal<bool> {
        self.half_day
    }

    pub fn reason_signal(&self) -> RwSignal<String> {
        self.reason
    }

    pub fn reset(&self) {
        self.leave_type.set("annual".into());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.half_day.set(false);
        self.reason.set(String::new());
    }

    pub fn load(&self, leave: &LeaveRequest) {
        self.leave_type.set(leave.leave_type.clone());
        self.start_date
            .set(leave.start_date.format("%Y-%m-%d").to_string());
        self.end_date.set(leave.end_date.format("%Y-%m-%d").to_string());
        self.half_day.set(leave.half_day);
        self.reason.set(leave.reason.clone().unwrap_or_default());
    }

    pub fn to_payload(&self) -> Result<LeaveInput, ApiError> {
        let leave_type = self.leave_type.get();
        if !LEAVE_TYPES.iter().any(|(value, _)| *value == leave_type) {
            return Err(ApiError::validation("休暇種別を選択してください。"));
        }
        let start_date = parse_date(
            &self.start_date.get(),
            "開始日は YYYY-MM-DD 形式で入力してください。",
        )?;
        // A blank end date means a single-day leave.
        let end_input = self.end_date.get();
        let end_date = if end_input.trim().is_empty() {
            start_date
        } else {
            parse_date(&end_input, "終了日は YYYY-MM-DD 形式で入力してください。")?
        };
        if end_date < start_date {
            return Err(ApiError::validation("終了日は開始日以降の日付を指定してください。"));
        }
        let half_day = self.half_day.get();
        if half_day && end_date != start_date {
            return Err(ApiError::validation("半日休暇は1日のみ指定できます。"));
        }
        Ok(LeaveInput {
            leave_type,
            start_date,
            end_date,
            half_day,
            reason: optional_string(self.reason.get()),
        })
    }
}
