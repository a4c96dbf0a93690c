use crate::api::BulkActionSummary;
use leptos::*;

#[component]
pub fn BulkSummaryBanner(
    summary: Signal<Option<BulkActionSummary>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        {move || summary.get().map(|summary| {
            let tone = if summary.failed > 0 {
                "bg-status-warning-bg border-status-warning-border text-status-warning-text"
            } else {
                "bg-status-success-bg border-status-success-border text-status-success-text"
            };
            view! {
                <div class=format!("border px-4 py-3 rounded mb-4 {}", tone) role="status">
                    <div class="flex justify-between items-start gap-4">
                        <p class="text-sm font-semibold">
                            {format!("成功 {}件 / 失敗 {}件", summary.succeeded, summary.failed)}
                        </p>
                        <button type="button" class="text-sm underline" on:click=move |_| on_dismiss.call(())>
                            "閉じる"
                        </button>
                    </div>
                    {(!summary.errors.is_empty()).then(|| view! {
                        <ul class="mt-2 list-disc list-inside text-xs">
                            {summary
                                .errors
                                .iter()
                                .map(|item| view! { <li>{format!("{}: {}", item.id, item.error)}</li> })
                                .collect_view()}
                        </ul>
                    })}
                </div>
            }
        })}
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::BulkItemError;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn banner_lists_failed_items() {
        let html = render_to_string(move || {
            let summary = BulkActionSummary {
                succeeded: 2,
                failed: 1,
                errors: vec![BulkItemError {
                    id: "e3".into(),
                    error: "給与データが存在します".into(),
                }],
            };
            view! {
                <BulkSummaryBanner
                    summary=Signal::derive(move || Some(summary.clone()))
                    on_dismiss=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("成功 2件"));
        assert!(html.contains("失敗 1件"));
        assert!(html.contains("e3: 給与データが存在します"));
    }
}
