//! Connect-wallet modal.
//!
//! Lists the currently installed adapters, or install links when none are
//! detected. Connect runs through the session controller's split
//! `begin_connect`/`complete_connect` so no controller borrow is held across
//! the extension handshake.

use crate::dom::{self, Elements};
use crate::state;
use crate::widget;
use pk_session::SessionError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub fn open(els: &Elements) {
    state::with_controller(|c| c.clear_error());
    render(els);
    dom::set_visible(&els.wallet_modal, true);
}

pub fn close(els: &Elements) {
    dom::set_visible(&els.wallet_modal, false);
}

/// Rebuild the wallet list and error banner from controller state.
pub fn render(els: &Elements) {
    match state::with_controller(|c| c.last_error().map(str::to_owned)) {
        Some(error) => {
            dom::set_text(&els.wallet_modal_error, &error);
            dom::set_visible(&els.wallet_modal_error, true);
        }
        None => dom::set_visible(&els.wallet_modal_error, false),
    }

    els.wallet_modal_list.set_inner_html("");
    let wallets: Vec<(String, String)> = state::with_controller(|c| {
        c.available_wallets()
            .iter()
            .map(|a| (a.name().to_owned(), a.icon().to_owned()))
            .collect()
    });

    if wallets.is_empty() {
        render_install_links(els);
        return;
    }

    for (name, icon) in wallets {
        let button = dom::create_element("button");
        button.set_class_name("wallet-option");
        button.set_inner_html(&format!(
            "<span class=\"wallet-icon\">{icon}</span>\
             <span class=\"wallet-name\">{name}</span>"
        ));

        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els3 = els2.clone();
            let name = name.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_connect(&els3, &name).await;
            });
        }) as Box<dyn FnMut(_)>);
        button
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();

        let _ = els.wallet_modal_list.append_child(&button);
    }
}

fn render_install_links(els: &Elements) {
    let adapters: Vec<(String, String, String)> = state::with_controller(|c| {
        c.registry()
            .all()
            .iter()
            .map(|a| {
                (
                    a.name().to_owned(),
                    a.icon().to_owned(),
                    a.install_url().to_owned(),
                )
            })
            .collect()
    });

    let mut html = String::from(
        "<p class=\"modal-empty\">No wallets detected</p>\
         <p class=\"modal-hint\">Install a supported wallet to continue</p>",
    );
    for (name, icon, url) in adapters {
        html.push_str(&format!(
            "<a class=\"wallet-install\" href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">\
             <span class=\"wallet-icon\">{icon}</span> Install {name}</a>"
        ));
    }
    els.wallet_modal_list.set_inner_html(&html);
}

async fn on_connect(els: &Elements, wallet_name: &str) {
    let adapter = match state::with_controller(|c| c.begin_connect(wallet_name)) {
        Ok(adapter) => adapter,
        Err(SessionError::ConnectInFlight) => return,
        Err(_) => {
            render(els);
            return;
        }
    };

    let outcome = adapter.connect().await;
    let completed =
        state::with_controller(|c| c.complete_connect(adapter.name(), outcome));

    match completed {
        Ok(()) => {
            close(els);
            widget::render_connection(els);
        }
        Err(_) => render(els),
    }
}

/// Clear the session and best-effort hang up the extension side.
pub async fn on_disconnect(els: &Elements) {
    let adapter = state::with_controller(|c| c.disconnect());
    widget::render_connection(els);
    if let Some(adapter) = adapter {
        if let Err(err) = adapter.disconnect().await {
            gloo_console::warn!("wallet disconnect failed:", err.to_string());
        }
    }
}
