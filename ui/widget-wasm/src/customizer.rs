//! Widget customizer form.
//!
//! Every input change rewrites the shared config and re-renders the preview
//! and embed snippets. The deploy button is a pure simulation (2 s delay,
//! success state, 5 s reset).

use crate::dom::{self, Elements};
use crate::embed;
use crate::state;
use crate::widget;
use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;

thread_local! {
    static DEPLOYING: Cell<bool> = const { Cell::new(false) };
}

/// Push current config values into the form. Called once at startup.
pub fn sync_inputs(els: &Elements) {
    let config = state::config();
    dom::set_input_value(&els.token_name_input, &config.token_name);
    dom::set_input_value(&els.token_symbol_input, &config.token_symbol);
    dom::set_input_value(&els.logo_url_input, &config.logo_url);
    dom::set_input_value(&els.price_input, &config.price_per_token.to_string());
    dom::set_input_value(&els.total_supply_input, &config.total_supply.to_string());
    dom::set_input_value(&els.sold_amount_input, &config.sold_amount.to_string());
    dom::set_input_value(
        &els.end_date_input,
        &datetime_local_value(config.end_timestamp_ms),
    );
    dom::set_input_value(&els.gradient_from_input, &config.gradient_from);
    dom::set_input_value(&els.gradient_to_input, &config.gradient_to);
    update_swatches(els);
}

/// Read the whole form back into the config and re-render.
pub fn on_field_change(els: &Elements) {
    let end_timestamp_ms = parse_datetime_local(&dom::get_input_value(&els.end_date_input))
        .unwrap_or_else(|| state::config().end_timestamp_ms);

    state::with_config_mut(|config| {
        config.token_name = dom::get_input_value(&els.token_name_input);
        config.token_symbol = dom::get_input_value(&els.token_symbol_input);
        config.logo_url = dom::get_input_value(&els.logo_url_input);
        config.price_per_token = parse_number(&els.price_input);
        config.total_supply = parse_number(&els.total_supply_input);
        config.sold_amount = parse_number(&els.sold_amount_input);
        config.end_timestamp_ms = end_timestamp_ms;
        config.gradient_from = dom::get_input_value(&els.gradient_from_input);
        config.gradient_to = dom::get_input_value(&els.gradient_to_input);
    });

    update_swatches(els);
    widget::render(els);
    embed::render_snippets(els);
}

/// Apply one of the preset gradients and reflect it in the form.
pub fn apply_preset(els: &Elements, from: &str, to: &str) {
    dom::set_input_value(&els.gradient_from_input, from);
    dom::set_input_value(&els.gradient_to_input, to);
    on_field_change(els);
}

fn update_swatches(els: &Elements) {
    let config = state::config();
    dom::set_style(&els.gradient_from_swatch, "background", &config.gradient_from);
    dom::set_style(&els.gradient_to_swatch, "background", &config.gradient_to);
}

fn parse_number(input: &web_sys::HtmlInputElement) -> f64 {
    dom::get_input_value(input).parse().unwrap_or(0.0)
}

/// Epoch ms → `YYYY-MM-DDTHH:MM` for a datetime-local input.
fn datetime_local_value(epoch_ms: u64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(epoch_ms as f64));
    let iso = String::from(date.to_iso_string());
    iso.chars().take(16).collect()
}

fn parse_datetime_local(value: &str) -> Option<u64> {
    if value.is_empty() {
        return None;
    }
    let parsed = js_sys::Date::parse(value);
    if parsed.is_nan() { None } else { Some(parsed as u64) }
}

/// Simulated deployment: nothing is provisioned anywhere.
pub async fn on_deploy(els: &Elements) {
    if DEPLOYING.with(Cell::get) {
        return;
    }
    DEPLOYING.with(|d| d.set(true));
    els.deploy_btn.set_disabled(true);
    els.deploy_btn.set_text_content(Some("Deploying..."));
    dom::set_visible(&els.deploy_status, false);

    TimeoutFuture::new(2_000).await;

    els.deploy_btn.set_disabled(false);
    els.deploy_btn.set_text_content(Some("Deploy Presale"));
    dom::set_text(
        &els.deploy_status,
        "Presale deployed! Copy the embed code to integrate into your project.",
    );
    dom::set_visible(&els.deploy_status, true);
    DEPLOYING.with(|d| d.set(false));

    TimeoutFuture::new(5_000).await;
    dom::set_visible(&els.deploy_status, false);
}
