use crate::{
    config::PAGE_SIZE_OPTIONS,
    pagination::{PagedList, Row},
};
use leptos::*;

/// "21-40 / 95件" style label.
pub fn range_label(range: Option<(usize, usize)>, total: usize) -> String {
    match range {
        Some((start, end)) => format!("{}-{} / {}件", start, end, total),
        None => format!("0 / {}件", total),
    }
}

#[component]
pub fn Pager<T: Row + 'static>(list: PagedList<T>) -> impl IntoView {
    let window = list.window;
    let loading = Signal::derive(move || list.state.with(|s| s.is_loading()));
    view! {
        <div class="mt-4 flex flex-wrap justify-between items-center gap-2">
            <div class="text-sm text-fg-muted">
                {move || window.with(|w| range_label(w.visible_range(), w.total_count))}
            </div>
            <div class="flex items-center gap-2">
                <button
                    class="px-4 py-2 border border-border rounded disabled:opacity-50 text-sm"
                    disabled=move || loading.get() || !window.with(|w| w.has_previous())
                    on:click=move |_| list.previous_page()
                >
                    "前へ"
                </button>
                <span class="text-sm text-fg">
                    {move || window.with(|w| format!("ページ {} / {}", w.page_index, w.last_page()))}
                </span>
                <button
                    class="px-4 py-2 border border-border rounded disabled:opacity-50 text-sm"
                    disabled=move || loading.get() || !window.with(|w| w.has_next())
                    on:click=move |_| list.next_page()
                >
                    "次へ"
                </button>
                <select
                    class="border border-border rounded px-2 py-1 text-sm bg-surface-elevated"
                    aria-label="表示件数"
                    prop:value=move || window.with(|w| w.page_size.to_string())
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            list.set_page_size(size);
                        }
                    }
                >
                    {PAGE_SIZE_OPTIONS
                        .iter()
                        .map(|size| view! { <option value=size.to_string()>{format!("{}件", size)}</option> })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_label_formats_visible_rows() {
        assert_eq!(range_label(Some((21, 40)), 95), "21-40 / 95件");
        assert_eq!(range_label(None, 0), "0 / 0件");
    }
}
