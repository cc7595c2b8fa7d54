//! Event binding.
//!
//! Wires all UI event listeners once at startup. To add new events, add
//! closures here and (if async) spawn via `wasm_bindgen_futures::spawn_local`.

use crate::customizer;
use crate::dom::{self, Elements};
use crate::embed::{self, SnippetTab};
use crate::views::{self, View};
use crate::wallet_modal;
use crate::widget;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            $handler(&els);
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach an `input` handler that re-reads the customizer form.
macro_rules! on_input {
    ($el:expr, $els:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            customizer::on_field_change(&els);
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Navigation ──
    on_click!(els.launch_demo_btn, els, |e: &Elements| views::navigate(e, View::Demo));
    on_click!(els.nav_demo_btn, els, |e: &Elements| views::navigate(e, View::Demo));
    on_click!(els.back_home_btn, els, |e: &Elements| views::navigate(e, View::Landing));

    // ── Customize / code panel switch ──
    on_click!(els.customize_tab_btn, els, |e: &Elements| set_demo_panel(e, true));
    on_click!(els.code_tab_btn, els, |e: &Elements| set_demo_panel(e, false));

    // ── Wallet ──
    on_click!(els.connect_wallet_btn, els, wallet_modal::open);
    on_click!(els.wallet_modal_close, els, wallet_modal::close);
    on_click!(els.wallet_modal_backdrop, els, wallet_modal::close);
    on_click_async!(els.disconnect_btn, els, wallet_modal::on_disconnect);

    // ── Purchase ──
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            widget::update_total_cost(&els2);
        }) as Box<dyn FnMut(_)>);
        els.amount_input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
    on_click_async!(els.buy_btn, els, widget::on_buy);

    // ── Customizer form ──
    on_input!(els.token_name_input, els);
    on_input!(els.token_symbol_input, els);
    on_input!(els.logo_url_input, els);
    on_input!(els.price_input, els);
    on_input!(els.total_supply_input, els);
    on_input!(els.sold_amount_input, els);
    on_input!(els.end_date_input, els);
    on_input!(els.gradient_from_input, els);
    on_input!(els.gradient_to_input, els);

    for preset in &els.preset_buttons {
        let from = preset.get_attribute("data-from").unwrap_or_default();
        let to = preset.get_attribute("data-to").unwrap_or_default();
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            customizer::apply_preset(&els2, &from, &to);
        }) as Box<dyn FnMut(_)>);
        preset
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }

    on_click_async!(els.deploy_btn, els, customizer::on_deploy);

    // ── Embed code ──
    on_click!(els.embed_iframe_tab, els, |e: &Elements| {
        embed::set_active_tab(e, SnippetTab::Iframe)
    });
    on_click!(els.embed_component_tab, els, |e: &Elements| {
        embed::set_active_tab(e, SnippetTab::Component)
    });
    on_click_async!(els.copy_iframe_btn, els, embed::on_copy_iframe);
    on_click_async!(els.copy_component_btn, els, embed::on_copy_component);
}

/// Toggle between the customizer form and the embed-code panel.
fn set_demo_panel(els: &Elements, customize: bool) {
    dom::toggle_class(&els.customize_tab_btn, "active", customize);
    dom::toggle_class(&els.code_tab_btn, "active", !customize);
    dom::set_visible(&els.customizer_panel, customize);
    dom::set_visible(&els.code_panel, !customize);
}
