/// Quiet period before a typed search term is sent to the server.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Runs `f` after `delay_ms`. Host builds have no timer source and run it
/// immediately.
#[cfg(target_arch = "wasm32")]
pub fn after_delay(delay_ms: u32, f: impl FnOnce() + 'static) {
    leptos::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(delay_ms).await;
        f();
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn after_delay(_delay_ms: u32, f: impl FnOnce() + 'static) {
    f();
}

/// Applies `apply` once `current` still equals `value` after the quiet period,
/// so only the last keystroke of a burst reaches the server.
pub fn debounce_input<R, A>(value: String, current: R, apply: A)
where
    R: Fn() -> String + 'static,
    A: FnOnce(String) + 'static,
{
    after_delay(SEARCH_DEBOUNCE_MS, move || {
        if current() == value {
            apply(value);
        }
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn stale_input_is_not_applied() {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = applied.clone();
        debounce_input("ab".into(), || "abc".to_string(), move |v| {
            sink.borrow_mut().push(v)
        });
        let sink = applied.clone();
        debounce_input("abc".into(), || "abc".to_string(), move |v| {
            sink.borrow_mut().push(v)
        });
        assert_eq!(*applied.borrow(), vec!["abc".to_string()]);
    }
}
