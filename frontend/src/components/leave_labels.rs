use leptos::*;

pub const LEAVE_TYPES: &[(&str, &str)] = &[
    ("annual", "年次有給休暇"),
    ("sick", "病気休暇"),
    ("special", "特別休暇"),
    ("unpaid", "無給休暇"),
];

pub const LEAVE_STATUSES: &[(&str, &str)] = &[
    ("pending", "承認待ち"),
    ("approved", "承認済み"),
    ("rejected", "却下"),
    ("cancelled", "取消"),
];

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(value, _)| *value == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

pub fn leave_type_label(leave_type: &str) -> &str {
    lookup(LEAVE_TYPES, leave_type)
}

pub fn leave_status_label(status: &str) -> &str {
    lookup(LEAVE_STATUSES, status)
}

#[component]
pub fn LeaveStatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = match status.as_str() {
        "approved" => "bg-status-success-bg text-status-success-text",
        "rejected" => "bg-status-error-bg text-status-error-text",
        "pending" => "bg-status-warning-bg text-status-warning-text",
        _ => "bg-surface-muted text-fg-muted",
    };
    view! {
        <span class=format!("px-2 py-0.5 rounded-full text-xs font-medium {}", class)>
            {leave_status_label(&status).to_string()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_raw_value() {
        assert_eq!(leave_type_label("annual"), "年次有給休暇");
        assert_eq!(leave_status_label("approved"), "承認済み");
        assert_eq!(leave_type_label("sabbatical"), "sabbatical");
    }
}
