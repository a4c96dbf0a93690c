use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
}

impl StatTone {
    fn value_class(self) -> &'static str {
        match self {
            StatTone::Neutral => "text-fg",
            StatTone::Success => "text-status-success-text",
            StatTone::Warning => "text-status-warning-text",
            StatTone::Danger => "text-status-error-text",
        }
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] tone: StatTone,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated border border-border rounded-lg shadow-sm p-4">
            <p class="text-xs font-medium text-fg-muted">{label}</p>
            <p class=format!("mt-1 text-2xl font-semibold {}", tone.value_class())>{move || value.get()}</p>
        </div>
    }
}

/// Formats a day count, dropping `.0` for whole days.
pub fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}日", days as i64)
    } else {
        format!("{:.1}日", days)
    }
}
