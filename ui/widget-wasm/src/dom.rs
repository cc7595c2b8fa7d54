//! DOM element bindings.
//!
//! All element references are resolved once at startup. To add new UI
//! elements, add a field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

/// Show/hide by toggling the `hidden` utility class.
pub fn set_visible(el: &Element, visible: bool) {
    toggle_class(el, "hidden", !visible);
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

// ── Elements struct ──

/// All DOM element references used by the demo site.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Views / navigation
    pub landing_page: Element,
    pub demo_page: Element,
    pub launch_demo_btn: HtmlElement,
    pub nav_demo_btn: HtmlElement,
    pub back_home_btn: HtmlElement,

    // Demo panel switcher
    pub customize_tab_btn: Element,
    pub code_tab_btn: Element,
    pub customizer_panel: Element,
    pub code_panel: Element,

    // Widget preview
    pub widget_card: Element,
    pub widget_logo: HtmlImageElement,
    pub widget_token_name: Element,
    pub widget_token_symbol: Element,
    pub widget_progress_pct: Element,
    pub widget_progress_bar: Element,
    pub widget_sold: Element,
    pub widget_remaining: Element,
    pub widget_price: Element,
    pub widget_countdown: Element,
    pub connect_wallet_btn: HtmlElement,
    pub connected_panel: Element,
    pub connected_address: Element,
    pub disconnect_btn: HtmlElement,
    pub amount_input: HtmlInputElement,
    pub buy_btn: web_sys::HtmlButtonElement,
    pub total_cost: Element,
    pub tx_success: Element,
    pub tx_error: Element,

    // Customizer
    pub token_name_input: HtmlInputElement,
    pub token_symbol_input: HtmlInputElement,
    pub logo_url_input: HtmlInputElement,
    pub price_input: HtmlInputElement,
    pub total_supply_input: HtmlInputElement,
    pub sold_amount_input: HtmlInputElement,
    pub end_date_input: HtmlInputElement,
    pub gradient_from_input: HtmlInputElement,
    pub gradient_to_input: HtmlInputElement,
    pub gradient_from_swatch: Element,
    pub gradient_to_swatch: Element,
    pub preset_buttons: Vec<Element>,
    pub deploy_btn: web_sys::HtmlButtonElement,
    pub deploy_status: Element,

    // Embed code
    pub embed_iframe_tab: Element,
    pub embed_component_tab: Element,
    pub iframe_block: Element,
    pub component_block: Element,
    pub iframe_snippet: Element,
    pub component_snippet: Element,
    pub copy_iframe_btn: HtmlElement,
    pub copy_component_btn: HtmlElement,

    // Wallet modal
    pub wallet_modal: Element,
    pub wallet_modal_backdrop: Element,
    pub wallet_modal_close: HtmlElement,
    pub wallet_modal_error: Element,
    pub wallet_modal_list: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<web_sys::HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

macro_rules! get_img {
    ($id:expr) => {
        by_id_typed::<HtmlImageElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing img #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            landing_page: get_el!("landingPage"),
            demo_page: get_el!("demoPage"),
            launch_demo_btn: get_html!("launchDemoBtn"),
            nav_demo_btn: get_html!("navDemoBtn"),
            back_home_btn: get_html!("backHomeBtn"),

            customize_tab_btn: get_el!("customizeTabBtn"),
            code_tab_btn: get_el!("codeTabBtn"),
            customizer_panel: get_el!("customizerPanel"),
            code_panel: get_el!("codePanel"),

            widget_card: get_el!("widgetCard"),
            widget_logo: get_img!("widgetLogo"),
            widget_token_name: get_el!("widgetTokenName"),
            widget_token_symbol: get_el!("widgetTokenSymbol"),
            widget_progress_pct: get_el!("widgetProgressPct"),
            widget_progress_bar: get_el!("widgetProgressBar"),
            widget_sold: get_el!("widgetSold"),
            widget_remaining: get_el!("widgetRemaining"),
            widget_price: get_el!("widgetPrice"),
            widget_countdown: get_el!("widgetCountdown"),
            connect_wallet_btn: get_html!("connectWalletBtn"),
            connected_panel: get_el!("connectedPanel"),
            connected_address: get_el!("connectedAddress"),
            disconnect_btn: get_html!("disconnectBtn"),
            amount_input: get_input!("amountInput"),
            buy_btn: get_button!("buyBtn"),
            total_cost: get_el!("totalCost"),
            tx_success: get_el!("txSuccess"),
            tx_error: get_el!("txError"),

            token_name_input: get_input!("tokenNameInput"),
            token_symbol_input: get_input!("tokenSymbolInput"),
            logo_url_input: get_input!("logoUrlInput"),
            price_input: get_input!("priceInput"),
            total_supply_input: get_input!("totalSupplyInput"),
            sold_amount_input: get_input!("soldAmountInput"),
            end_date_input: get_input!("endDateInput"),
            gradient_from_input: get_input!("gradientFromInput"),
            gradient_to_input: get_input!("gradientToInput"),
            gradient_from_swatch: get_el!("gradientFromSwatch"),
            gradient_to_swatch: get_el!("gradientToSwatch"),
            preset_buttons: query_all(".preset-gradient"),
            deploy_btn: get_button!("deployBtn"),
            deploy_status: get_el!("deployStatus"),

            embed_iframe_tab: get_el!("embedIframeTab"),
            embed_component_tab: get_el!("embedComponentTab"),
            iframe_block: get_el!("iframeBlock"),
            component_block: get_el!("componentBlock"),
            iframe_snippet: get_el!("iframeSnippet"),
            component_snippet: get_el!("componentSnippet"),
            copy_iframe_btn: get_html!("copyIframeBtn"),
            copy_component_btn: get_html!("copyComponentBtn"),

            wallet_modal: get_el!("walletModal"),
            wallet_modal_backdrop: get_el!("walletModalBackdrop"),
            wallet_modal_close: get_html!("walletModalClose"),
            wallet_modal_error: get_el!("walletModalError"),
            wallet_modal_list: get_el!("walletModalList"),
        })
    }
}
