//! DOM element bindings.
//!
//! Every node the page needs is resolved once in `Elements::bind()`; a missing
//! id fails startup instead of surfacing later as a silent no-op.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

// ── Helpers ──

pub fn window() -> web_sys::Window {
    web_sys::window().expect("no global window")
}

pub fn document() -> Document {
    window().document().expect("window has no document")
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

/// Set (or clear, with an empty value) one inline style property.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let style = el.style();
    let _ = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
}

/// Restart the panel entrance animation on an element that just became visible.
pub fn replay_fade_up(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        set_style(html, "animation", "none");
        // Reading layout forces a reflow so the next assignment restarts it.
        let _ = html.offset_height();
        set_style(html, "animation", FADE_UP_ANIMATION);
    }
}

const FADE_UP_ANIMATION: &str = "fadeUp 0.4s ease forwards";

const FADE_UP_KEYFRAMES: &str = "@keyframes fadeUp {\
 from { opacity: 0; transform: translateY(16px); }\
 to { opacity: 1; transform: translateY(0); } }";

/// Inject the `fadeUp` keyframes used by `replay_fade_up`.
pub fn install_keyframes() -> Result<(), JsValue> {
    let doc = document();
    let style = doc.create_element("style")?;
    style.set_text_content(Some(FADE_UP_KEYFRAMES));
    doc.head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?
        .append_child(&style)?;
    Ok(())
}

// ── Elements struct ──

/// All DOM references used by the wallet card.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Panels
    pub panels: Vec<Element>,

    // Connected card
    pub wallet_card: HtmlElement,
    pub wallet_address: Element,
    pub wallet_balance: Element,
    pub copy_address_btn: HtmlElement,
    pub disconnect_btn: HtmlElement,

    // Connect options
    pub wallet_buttons: Vec<Element>,
    pub show_qr_btn: HtmlElement,

    // QR panel
    pub qr_container: Element,
    pub back_btn: HtmlElement,

    pub toast: Element,
    pub bg_canvas: HtmlCanvasElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once at startup.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            panels: query_all(".state"),

            wallet_card: get_html!("wallet-card"),
            wallet_address: get_el!("wallet-address"),
            wallet_balance: get_el!("wallet-balance"),
            copy_address_btn: get_html!("copy-address-btn"),
            disconnect_btn: get_html!("disconnect-btn"),

            wallet_buttons: query_all("[data-wallet]"),
            show_qr_btn: get_html!("show-qr-btn"),

            qr_container: get_el!("qr-container"),
            back_btn: get_html!("back-btn"),

            toast: get_el!("toast"),
            bg_canvas: by_id_typed::<HtmlCanvasElement>("bg-canvas")
                .ok_or_else(|| JsValue::from_str("missing canvas #bg-canvas"))?,
        })
    }

    /// The panel element for one UI state, e.g. `#state-qr`.
    pub fn panel(&self, name: &str) -> Option<&Element> {
        let id = format!("state-{name}");
        self.panels.iter().find(|el| el.id() == id)
    }
}
