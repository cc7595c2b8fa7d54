//! Live widget preview.
//!
//! Renders the presale card from the current config and session, ticks the
//! countdown once a second, and runs the simulated purchase flow.

use crate::dom::{self, Elements};
use crate::state;
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use pk_presale::{JobSimulator, SIMULATED_JOB_DELAY_MS, calculate_progress, format_token_amount};
use pk_wallet::address::format_wallet_address;
use std::cell::Cell;

thread_local! {
    static PROCESSING: Cell<bool> = const { Cell::new(false) };
}

/// Re-render the whole card. Cheap enough to call on every config change.
pub fn render(els: &Elements) {
    let config = state::config();

    dom::set_style(
        &els.widget_card,
        "background",
        &format!(
            "linear-gradient(135deg, {}, {})",
            config.gradient_from, config.gradient_to
        ),
    );
    els.widget_logo.set_src(&config.logo_url);
    dom::set_text(&els.widget_token_name, &config.token_name);
    dom::set_text(
        &els.widget_token_symbol,
        &format!("{} Token Sale", config.token_symbol),
    );

    let progress = calculate_progress(config.sold_amount, config.total_supply);
    dom::set_text(&els.widget_progress_pct, &format!("{progress:.1}%"));
    dom::set_style(
        &els.widget_progress_bar,
        "width",
        &format!("{:.1}%", progress.max(0.0)),
    );
    dom::set_text(
        &els.widget_sold,
        &format!("{} sold", format_token_amount(config.sold_amount)),
    );
    dom::set_text(
        &els.widget_remaining,
        &format!(
            "{} remaining",
            format_token_amount(config.total_supply - config.sold_amount)
        ),
    );
    dom::set_text(&els.widget_price, &format!("${}", config.price_per_token));

    update_countdown(els);
    render_connection(els);
    update_total_cost(els);
}

/// Swap between the connect button and the connected-address panel.
pub fn render_connection(els: &Elements) {
    let session = state::with_controller(|c| c.session().clone());
    let connected = session.is_connected();
    dom::set_visible(&els.connect_wallet_btn, !connected);
    dom::set_visible(&els.connected_panel, connected);
    if let Some(address) = &session.address {
        dom::set_text(&els.connected_address, &format_wallet_address(&address.0));
    }
}

pub fn update_countdown(els: &Elements) {
    let config = state::config();
    let text = match pk_presale::countdown(state::now_ms(), config.end_timestamp_ms) {
        Some(countdown) => countdown.to_string(),
        None => "Sale Ended".to_owned(),
    };
    dom::set_text(&els.widget_countdown, &text);
}

/// Start the 1 s countdown tick. Runs for the lifetime of the page.
pub fn start_countdown_tick(els: &Elements) {
    let els = els.clone();
    Interval::new(1_000, move || update_countdown(&els)).forget();
}

fn entered_amount(els: &Elements) -> f64 {
    dom::get_input_value(&els.amount_input).parse().unwrap_or(0.0)
}

pub fn update_total_cost(els: &Elements) {
    let amount = entered_amount(els);
    let valid = amount > 0.0;
    if valid {
        let config = state::config();
        dom::set_text(
            &els.total_cost,
            &format!("Total: ${:.2}", amount * config.price_per_token),
        );
    }
    dom::set_visible(&els.total_cost, valid);
    els.buy_btn
        .set_disabled(!valid || PROCESSING.with(Cell::get));
}

/// Simulated purchase: fixed delay, then a fabricated job result. The
/// success banner auto-resets after five seconds.
pub async fn on_buy(els: &Elements) {
    let amount = entered_amount(els);
    if amount <= 0.0 || PROCESSING.with(Cell::get) {
        return;
    }

    PROCESSING.with(|p| p.set(true));
    dom::set_visible(&els.tx_success, false);
    dom::set_visible(&els.tx_error, false);
    els.buy_btn.set_disabled(true);
    els.buy_btn.set_text_content(Some("Processing..."));

    TimeoutFuture::new(SIMULATED_JOB_DELAY_MS).await;

    let address = state::with_controller(|c| c.session().address.clone())
        .map(|a| a.0)
        .unwrap_or_default();
    let result = JobSimulator::new().schedule(amount, &address, state::now_ms());

    PROCESSING.with(|p| p.set(false));
    els.buy_btn.set_text_content(Some("Buy"));
    update_total_cost(els);

    match result {
        Ok(job) => {
            gloo_console::log!("job scheduled:", job.id.clone());
            dom::set_visible(&els.tx_success, true);

            TimeoutFuture::new(5_000).await;
            dom::set_visible(&els.tx_success, false);
            dom::set_input_value(&els.amount_input, "");
            update_total_cost(els);
        }
        Err(err) => {
            gloo_console::error!("simulated job failed:", err.to_string());
            dom::set_text(&els.tx_error, "Transaction failed. Please try again.");
            dom::set_visible(&els.tx_error, true);
        }
    }
}
