//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! The session controller is constructed once in `lib.rs` and accessed
//! through short-lived borrows; never hold one across an `await`.

use crate::storage::LocalSessionStore;
use pk_session::SessionController;
use pk_types::PresaleConfig;
use std::cell::RefCell;

thread_local! {
    static CONFIG: RefCell<Option<PresaleConfig>> = const { RefCell::new(None) };
    static CONTROLLER: RefCell<Option<SessionController<LocalSessionStore>>> =
        const { RefCell::new(None) };
}

/// Demo defaults shown before the user customizes anything.
pub fn default_config(now_ms: u64) -> PresaleConfig {
    PresaleConfig {
        token_name: "Nova Token".to_owned(),
        token_symbol: "NOVA".to_owned(),
        logo_url: "https://api.dicebear.com/7.x/shapes/svg?seed=nova".to_owned(),
        price_per_token: 0.5,
        total_supply: 1_000_000.0,
        sold_amount: 450_000.0,
        end_timestamp_ms: now_ms + 7 * 24 * 60 * 60 * 1_000,
        gradient_from: "rgba(102, 126, 234, 0.8)".to_owned(),
        gradient_to: "rgba(118, 75, 162, 0.8)".to_owned(),
    }
}

pub fn init_config(config: PresaleConfig) {
    CONFIG.with(|c| *c.borrow_mut() = Some(config));
}

pub fn config() -> PresaleConfig {
    CONFIG.with(|c| c.borrow().clone().expect("config not initialized"))
}

/// Run a closure with mutable access to the widget config.
pub fn with_config_mut<F>(f: F)
where
    F: FnOnce(&mut PresaleConfig),
{
    CONFIG.with(|c| {
        if let Some(config) = c.borrow_mut().as_mut() {
            f(config);
        }
    });
}

pub fn init_controller(controller: SessionController<LocalSessionStore>) {
    CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
}

/// Run a closure against the session controller. The borrow lasts only for
/// the closure, so extension handshakes must be awaited outside of it (via
/// `begin_connect`/`complete_connect`).
pub fn with_controller<F, R>(f: F) -> R
where
    F: FnOnce(&mut SessionController<LocalSessionStore>) -> R,
{
    CONTROLLER.with(|c| {
        let mut guard = c.borrow_mut();
        f(guard.as_mut().expect("session controller not initialized"))
    })
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
