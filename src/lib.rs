mod api;
mod bridge;
mod config;
mod dom;
mod drafts;
mod editor;
mod enhance;
mod forms;
mod interop;
mod models;
mod notify;
mod scroll;
mod search;
mod shortcuts;
mod state;
mod storage;
mod theme;
mod timers;
mod util;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    state::UiController::install();
}
