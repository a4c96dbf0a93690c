use leptos::*;

pub const DESKTOP_QUERY: &str = "(min-width: 1024px)";

/// Tracks whether `query` currently matches. Hosts without `matchMedia`
/// report `true`, so tables are rendered.
pub fn use_breakpoint(query: &'static str) -> Signal<bool> {
    let matches = create_rw_signal(initial_match(query));
    watch_media(query, matches);
    matches.into()
}

pub fn use_is_desktop() -> Signal<bool> {
    use_breakpoint(DESKTOP_QUERY)
}

#[cfg(target_arch = "wasm32")]
fn initial_match(query: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(true)
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_match(_query: &str) -> bool {
    true
}

#[cfg(target_arch = "wasm32")]
fn watch_media(query: &str, matches: RwSignal<bool>) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(list) = web_sys::window().and_then(|w| w.match_media(query).ok().flatten()) else {
        return;
    };
    let listener = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
        move |ev: web_sys::MediaQueryListEvent| matches.set(ev.matches()),
    );
    if list
        .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("matchMedia listener could not be attached for {}", query);
        return;
    }
    let function: js_sys::Function = listener.into_js_value().unchecked_into();
    on_cleanup(move || {
        let _ = list.remove_event_listener_with_callback("change", &function);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn watch_media(_query: &str, _matches: RwSignal<bool>) {}
