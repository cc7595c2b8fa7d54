//! Presale Kit demo frontend.
//!
//! Pure Rust + WASM implementation of the marketing site: landing page,
//! live-customizable widget preview, wallet connection, and embed-code
//! generation. Each concern lives in its own module.

pub mod customizer;
pub mod dom;
pub mod embed;
pub mod events;
pub mod state;
pub mod storage;
pub mod views;
pub mod wallet_modal;
pub mod wallets;
pub mod widget;

use pk_session::SessionController;
use storage::LocalSessionStore;
use wasm_bindgen::prelude::*;

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    state::init_config(state::default_config(state::now_ms()));

    // Build the session controller and rehydrate any persisted session
    // (no extension handshake is re-run at startup).
    let mut controller =
        SessionController::new(wallets::default_registry(), LocalSessionStore);
    controller.restore();
    state::init_controller(controller);

    // A `token` query parameter jumps straight to the demo view.
    views::show(&els, views::initial_view());

    customizer::sync_inputs(&els);
    widget::render(&els);
    widget::start_countdown_tick(&els);
    embed::render_snippets(&els);
    embed::set_active_tab(&els, embed::SnippetTab::Iframe);

    events::bind_events(&els);

    Ok(())
}
