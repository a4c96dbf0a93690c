use leptos::ev::KeyboardEvent;
use leptos::*;

#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = store_value(children);
    let title = Signal::derive(move || title.get());
    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="閉じる"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class="relative z-[61] w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border"
                    role="dialog"
                    aria-modal="true"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            on_close.call(());
                        }
                    }
                >
                    <div class="px-6 py-4 border-b border-border flex justify-between items-center">
                        <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                        <button
                            type="button"
                            aria-label="閉じる"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            "✕"
                        </button>
                    </div>
                    <div class="p-6">{move || children.with_value(|children| children())}</div>
                </div>
            </div>
        </Show>
    }
}
