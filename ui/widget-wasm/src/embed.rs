//! Embed-code generator.
//!
//! Produces the iframe and component-usage snippets for the current config.
//! Both are display-only text: nothing here is parsed or executed.

use crate::dom::{self, Elements};
use crate::state;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::JsFuture;

pub fn iframe_snippet(origin: &str, token_symbol: &str) -> String {
    format!(
        "<iframe\n  src=\"{origin}/demo?token={token_symbol}\"\n  width=\"400\"\n  \
         height=\"600\"\n  frameborder=\"0\"\n  \
         style=\"border-radius: 16px; overflow: hidden;\"\n></iframe>"
    )
}

pub fn component_snippet(config: &pk_types::PresaleConfig) -> String {
    format!(
        "<div id=\"presale\"></div>\n<script type=\"module\">\n  \
         import {{ mountPresaleWidget }} from \"https://cdn.presalekit.dev/widget.js\";\n\n  \
         mountPresaleWidget(\"#presale\", {{\n    \
         tokenName: \"{name}\",\n    \
         tokenSymbol: \"{symbol}\",\n    \
         pricePerToken: {price},\n    \
         totalSupply: {total},\n    \
         endDate: new Date({end}),\n  }});\n</script>",
        name = config.token_name,
        symbol = config.token_symbol,
        price = config.price_per_token,
        total = config.total_supply,
        end = config.end_timestamp_ms,
    )
}

pub fn render_snippets(els: &Elements) {
    let config = state::config();
    let origin = dom::window().location().origin().unwrap_or_default();
    dom::set_text(
        &els.iframe_snippet,
        &iframe_snippet(&origin, &config.token_symbol),
    );
    dom::set_text(&els.component_snippet, &component_snippet(&config));
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SnippetTab {
    Iframe,
    Component,
}

pub fn set_active_tab(els: &Elements, tab: SnippetTab) {
    dom::toggle_class(&els.embed_iframe_tab, "active", tab == SnippetTab::Iframe);
    dom::toggle_class(&els.embed_component_tab, "active", tab == SnippetTab::Component);
    dom::set_visible(&els.iframe_block, tab == SnippetTab::Iframe);
    dom::set_visible(&els.component_block, tab == SnippetTab::Component);
}

/// Copy a snippet to the clipboard and flash the button label for 2 s.
pub async fn copy_snippet(button: &web_sys::HtmlElement, text: String) {
    let clipboard = dom::window().navigator().clipboard();
    if JsFuture::from(clipboard.write_text(&text)).await.is_err() {
        gloo_console::warn!("clipboard write failed");
        return;
    }

    button.set_text_content(Some("Copied!"));
    TimeoutFuture::new(2_000).await;
    button.set_text_content(Some("Copy"));
}

pub async fn on_copy_iframe(els: &Elements) {
    let config = state::config();
    let origin = dom::window().location().origin().unwrap_or_default();
    copy_snippet(
        &els.copy_iframe_btn,
        iframe_snippet(&origin, &config.token_symbol),
    )
    .await;
}

pub async fn on_copy_component(els: &Elements) {
    let config = state::config();
    copy_snippet(&els.copy_component_btn, component_snippet(&config)).await;
}
