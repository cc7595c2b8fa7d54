//! Landing/demo view switching.
//!
//! A `token` query parameter on the page URL selects the demo view on
//! initial load (its value is not validated); afterwards navigation is
//! button-driven and pushes history entries.

use crate::dom::{self, Elements};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Landing,
    Demo,
}

/// View to show on first load.
pub fn initial_view() -> View {
    let search = dom::window().location().search().unwrap_or_default();
    match web_sys::UrlSearchParams::new_with_str(&search) {
        Ok(params) if params.has("token") => View::Demo,
        _ => View::Landing,
    }
}

pub fn show(els: &Elements, view: View) {
    dom::set_visible(&els.landing_page, view == View::Landing);
    dom::set_visible(&els.demo_page, view == View::Demo);
}

/// Show a view and record it in the session history.
pub fn navigate(els: &Elements, view: View) {
    show(els, view);
    let path = match view {
        View::Landing => "/",
        View::Demo => "/demo",
    };
    if let Ok(history) = dom::window().history() {
        let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
    }
}
