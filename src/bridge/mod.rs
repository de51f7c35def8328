//! Globals that inline page markup calls (`onclick="submitForm('contact')"`).

use crate::interop::object_from_pairs;
use crate::notify::AlertKind;
use crate::state::UiController;
use crate::util::format_date;
use js_sys::{Function, Reflect};
use leptos::logging::{log, warn};
use wasm_bindgen::prelude::*;

fn string_arg(v: &JsValue) -> String {
    v.as_string().unwrap_or_default()
}

/// Installs `submitForm`, `saveData`, `showAlert` and `CMS` on `window`.
///
/// The closures are leaked into JS and live as long as the page.
pub(crate) fn install(controller: &UiController) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let forms = controller.forms.clone();
    let submit_form = Closure::<dyn Fn(JsValue)>::new(move |id: JsValue| {
        forms.submit_form(&string_arg(&id));
    })
    .into_js_value();

    let forms = controller.forms.clone();
    let save_data = Closure::<dyn Fn(JsValue)>::new(move |source: JsValue| {
        forms.save_data(&string_arg(&source));
    })
    .into_js_value();

    let notifier = controller.notifier;
    let show_alert = Closure::<dyn Fn(JsValue, JsValue)>::new(move |kind: JsValue, message: JsValue| {
        notifier.alert(AlertKind::parse_lenient(&string_arg(&kind)), &string_arg(&message));
    })
    .into_js_value();

    let show_toast = Closure::<dyn Fn(JsValue, JsValue)>::new(move |message: JsValue, kind: JsValue| {
        notifier.toast(AlertKind::parse_lenient(&string_arg(&kind)), &string_arg(&message));
    })
    .into_js_value();

    let confirm = Closure::<dyn Fn(JsValue, JsValue)>::new(|message: JsValue, callback: JsValue| {
        let accepted = web_sys::window()
            .and_then(|w| w.confirm_with_message(&string_arg(&message)).ok())
            .unwrap_or(false);
        if !accepted {
            return;
        }
        if let Some(f) = callback.dyn_ref::<Function>() {
            if let Err(e) = f.call0(&JsValue::NULL) {
                warn!("[bridge] confirm callback threw: {e:?}");
            }
        }
    })
    .into_js_value();

    let format = Closure::<dyn Fn(JsValue) -> String>::new(|value: JsValue| format_date(&value))
        .into_js_value();

    let cms = object_from_pairs(&[
        ("showToast", show_toast),
        ("confirm", confirm),
        ("formatDate", format),
    ]);

    let globals = [
        ("submitForm", submit_form),
        ("saveData", save_data),
        ("showAlert", show_alert),
        ("CMS", cms.into()),
    ];
    for (name, value) in &globals {
        if let Err(e) = Reflect::set(&window, &JsValue::from_str(name), value) {
            warn!("[bridge] could not set window.{name}: {e:?}");
        }
    }
    log!("[bridge] page globals installed");
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::dom;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn global(path: &[&str]) -> JsValue {
        let mut v: JsValue = web_sys::window().unwrap().into();
        for key in path {
            v = Reflect::get(&v, &JsValue::from_str(key)).unwrap();
        }
        v
    }

    #[wasm_bindgen_test]
    fn test_globals_are_installed() {
        let controller = UiController::start(UiConfig::with_origin("http://127.0.0.1:9"));
        install(&controller);

        for name in ["submitForm", "saveData", "showAlert"] {
            assert!(global(&[name]).is_function(), "{name} missing");
        }
        for name in ["showToast", "confirm", "formatDate"] {
            assert!(global(&["CMS", name]).is_function(), "CMS.{name} missing");
        }
        controller.shutdown();
    }

    #[wasm_bindgen_test]
    fn test_format_date_through_bridge() {
        let controller = UiController::start(UiConfig::with_origin("http://127.0.0.1:9"));
        install(&controller);

        let f: Function = global(&["CMS", "formatDate"]).unchecked_into();
        let out = f.call1(&JsValue::NULL, &JsValue::from_str("not a date")).unwrap();
        assert_eq!(out.as_string().as_deref(), Some("Invalid Date"));
        controller.shutdown();
    }

    #[wasm_bindgen_test]
    fn test_show_alert_through_bridge() {
        let controller = UiController::start(UiConfig::with_origin("http://127.0.0.1:9"));
        install(&controller);

        let f: Function = global(&["showAlert"]).unchecked_into();
        f.call2(
            &JsValue::NULL,
            &JsValue::from_str("warning"),
            &JsValue::from_str("bridged <b>alert</b>"),
        )
        .unwrap();

        let alerts: Vec<web_sys::Element> = dom::query_all(".alert.alert-warning");
        assert!(alerts.iter().any(|a| a.inner_html().contains("<b>alert</b>")));
        controller.shutdown();
    }
}
