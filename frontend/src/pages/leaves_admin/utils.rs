use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::{
    api::{ApiError, LeaveRequest},
    pagination::FilterSet,
    utils::form::parse_date,
};
use leptos::*;

/// Mirrors the server-side leave filters. `from`/`to` admit any request
/// overlapping the range.
pub fn admin_leave_matches(leave: &LeaveRequest, filters: &FilterSet) -> bool {
    let within_from = filters
        .scalar("from")
        .and_then(|from| NaiveDate::parse_from_str(from, "%Y-%m-%d").ok())
        .map(|from| leave.end_date >= from)
        .unwrap_or(true);
    let within_to = filters
        .scalar("to")
        .and_then(|to| NaiveDate::parse_from_str(to, "%Y-%m-%d").ok())
        .map(|to| leave.start_date <= to)
        .unwrap_or(true);
    filters.admits("status", &leave.status)
        && filters.admits("leave_type", &leave.leave_type)
        && filters.admits("employee_id", &leave.employee_id)
        && within_from
        && within_to
}

/// Newest request first.
pub fn newest_first(a: &LeaveRequest, b: &LeaveRequest) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Draft of the scalar filters, applied on demand.
#[derive(Clone, Copy)]
pub struct LeaveFilterDraft {
    pub leave_type: RwSignal<String>,
    pub employee_id: RwSignal<String>,
    pub from: RwSignal<String>,
    pub to: RwSignal<String>,
}

impl Default for LeaveFilterDraft {
    fn default() -> Self {
        Self {
            leave_type: create_rw_signal(String::new()),
            employee_id: create_rw_signal(String::new()),
            from: create_rw_signal(String::new()),
            to: create_rw_signal(String::new()),
        }
    }
}

impl LeaveFilterDraft {
    pub fn reset(&self) {
        for signal in [self.leave_type, self.employee_id, self.from, self.to] {
            signal.set(String::new());
        }
    }

    /// Writes the draft into `filters`, leaving the `status` set untouched.
    pub fn apply_to(&self, filters: &mut FilterSet) -> Result<(), ApiError> {
        let from = self.from.get_untracked();
        let to = self.to.get_untracked();
        let from_date = optional_date(&from, "開始日は YYYY-MM-DD 形式で入力してください。")?;
        let to_date = optional_date(&to, "終了日は YYYY-MM-DD 形式で入力してください。")?;
        if let (Some(from), Some(to)) = (from_date, to_date) {
            if from > to {
                return Err(ApiError::validation("開始日は終了日以前の日付を指定してください。"));
            }
        }
        filters.set_scalar("leave_type", self.leave_type.get_untracked());
        filters.set_scalar("employee_id", self.employee_id.get_untracked());
        filters.set_scalar("from", from);
        filters.set_scalar("to", to);
        Ok(())
    }
}

fn optional_date(value: &str, err: &str) -> Result<Option<NaiveDate>, ApiError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(value, err).map(Some)
    }
}

#[cfg(test)]
pub(crate) fn sample_leave(id: &str, status: &str, created_day: u32) -> LeaveRequest {
    use chrono::{TimeZone, Utc};
    LeaveRequest {
        id: id.into(),
        employee_id: "e1".into(),
        employee_name: Some("山田 花子".into()),
        leave_type: "annual".into(),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        half_day: false,
        days: 3.0,
        reason: None,
        status: status.into(),
        decision_comment: None,
        decided_by: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, created_day, 9, 0, 0).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn date_range_admits_overlapping_requests() {
        let leave = sample_leave("l1", "pending", 1);
        let filters = FilterSet::new()
            .with_scalar("from", "2025-03-12")
            .with_scalar("to", "2025-03-31");
        assert!(admin_leave_matches(&leave, &filters));
        let filters = FilterSet::new().with_scalar("from", "2025-03-13");
        assert!(!admin_leave_matches(&leave, &filters));
        let filters = FilterSet::new().with_scalar("to", "2025-03-09");
        assert!(!admin_leave_matches(&leave, &filters));
    }

    #[test]
    fn status_set_filters_rows() {
        let mut filters = FilterSet::new();
        filters.set_members("status", ["pending"]);
        assert!(admin_leave_matches(&sample_leave("l1", "pending", 1), &filters));
        assert!(!admin_leave_matches(&sample_leave("l1", "approved", 1), &filters));
    }

    #[test]
    fn newest_request_sorts_first() {
        let older = sample_leave("a", "pending", 1);
        let newer = sample_leave("b", "pending", 5);
        assert_eq!(newest_first(&newer, &older), Ordering::Less);
    }

    #[test]
    fn draft_rejects_inverted_range() {
        with_runtime(|| {
            let draft = LeaveFilterDraft::default();
            draft.from.set("2025-04-01".into());
            draft.to.set("2025-03-01".into());
            let mut filters = FilterSet::new();
            assert!(draft.apply_to(&mut filters).is_err());
            assert!(filters.is_empty());

            draft.to.set("2025-04-30".into());
            draft.leave_type.set("sick".into());
            filters.set_members("status", ["pending"]);
            draft.apply_to(&mut filters).unwrap();
            assert_eq!(filters.scalar("leave_type"), Some("sick"));
            assert_eq!(filters.scalar("from"), Some("2025-04-01"));
            assert!(filters.contains("status", "pending"));
        });
    }
}
