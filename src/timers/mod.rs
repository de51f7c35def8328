use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// Runs `f` once after `delay_ms`. Not cancellable.
pub(crate) fn run_after(delay_ms: i32, f: impl FnOnce() + 'static) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let cb = wasm_bindgen::closure::Closure::once_into_js(f);
    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        delay_ms,
    );
}

/// A single restartable timeout.
///
/// Each `schedule` clears the previous pending call, so only the last
/// scheduled closure runs, `delay_ms` after the last call.
#[derive(Clone)]
pub(crate) struct Debouncer {
    delay_ms: i32,
    timer_id: Rc<Cell<Option<i32>>>,
}

impl Debouncer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            timer_id: Rc::new(Cell::new(None)),
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        self.cancel();

        let Some(win) = web_sys::window() else {
            return;
        };

        let timer_id = self.timer_id.clone();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            timer_id.set(None);
            f();
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                self.delay_ms,
            )
            .ok();
        self.timer_id.set(tid);
    }

    pub fn cancel(&self) {
        if let Some(tid) = self.timer_id.take() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
        }
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn is_pending(&self) -> bool {
        self.timer_id.get().is_some()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_debouncer_collapses_rapid_calls() {
        let fired = Rc::new(Cell::new(0u32));
        let last = Rc::new(Cell::new(0u32));
        let d = Debouncer::new(50);

        for i in 1..=5u32 {
            let fired = fired.clone();
            let last = last.clone();
            d.schedule(move || {
                fired.set(fired.get() + 1);
                last.set(i);
            });
            TimeoutFuture::new(10).await;
        }
        assert!(d.is_pending());

        TimeoutFuture::new(120).await;
        assert_eq!(fired.get(), 1);
        assert_eq!(last.get(), 5);
        assert!(!d.is_pending());
    }

    #[wasm_bindgen_test]
    async fn test_debouncer_cancel() {
        let fired = Rc::new(Cell::new(false));
        let d = Debouncer::new(20);
        let f = fired.clone();
        d.schedule(move || f.set(true));
        d.cancel();
        TimeoutFuture::new(60).await;
        assert!(!fired.get());
    }
}
