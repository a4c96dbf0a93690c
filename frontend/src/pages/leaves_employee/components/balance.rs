use crate::{
    api::{ApiError, LeaveBalance},
    components::{cards::format_days, leave_labels::leave_type_label},
};
use leptos::*;

#[component]
pub fn LeaveBalanceCards(balances: Signal<Option<Result<Vec<LeaveBalance>, ApiError>>>) -> impl IntoView {
    view! {
        {move || match balances.get() {
            None => view! { <p class="text-sm text-fg-muted">"残日数を読み込み中..."</p> }.into_view(),
            Some(Err(err)) => view! {
                <p class="text-sm text-status-error-text">{format!("残日数を取得できませんでした: {}", err)}</p>
            }
            .into_view(),
            Some(Ok(balances)) => view! {
                <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                    {balances
                        .into_iter()
                        .map(|balance| {
                            view! {
                                <div class="bg-surface-elevated border border-border rounded-lg shadow-sm p-4">
                                    <p class="text-xs font-medium text-fg-muted">
                                        {leave_type_label(&balance.leave_type).to_string()}
                                    </p>
                                    <p class="mt-1 text-2xl font-semibold text-fg">
                                        {format_days(balance.remaining())}
                                    </p>
                                    <p class="text-xs text-fg-muted">
                                        {format!(
                                            "付与 {} / 取得 {} / 申請中 {}",
                                            format_days(balance.entitled),
                                            format_days(balance.used),
                                            format_days(balance.pending),
                                        )}
                                    </p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_view(),
        }}
    }
}
