use crate::content::Palette;
use crate::motion::Rect;
use crate::navigation::OverflowTarget;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};
use yew::NodeRef;

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn mount_point() -> Option<Element> {
    document()?.get_element_by_id("app")
}

fn root_element() -> Option<HtmlElement> {
    document()?.document_element()?.dyn_into::<HtmlElement>().ok()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    (width, height)
}

pub fn has_touch() -> bool {
    window()
        .map(|win| Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false)
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|win| win.match_media(query).ok().flatten())
        .is_some_and(|list| list.matches())
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Largest scroll offset the document allows.
pub fn scroll_limit() -> f64 {
    let height = document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    (height - viewport_size().1).max(0.0)
}

pub fn scroll_window_to(y: f64) {
    if let Some(win) = window() {
        win.scroll_to_with_x_and_y(0.0, y);
    }
}

pub fn scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn set_location_hash(anchor: &str) {
    if let Some(win) = window() {
        let _ = win.location().set_hash(anchor);
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn style_node(node: &NodeRef, property: &str, value: &str) {
    if let Some(element) = node.cast::<HtmlElement>() {
        set_style(&element, property, value);
    }
}

pub fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// `(top, bottom)` in viewport coordinates, `None` while detached.
pub fn vertical_bounds(node: &NodeRef) -> Option<(f64, f64)> {
    let element = node.cast::<Element>()?;
    let rect = element.get_bounding_client_rect();
    Some((rect.top(), rect.bottom()))
}

/// Document-relative top edge.
pub fn document_top(element: &Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y()
}

pub fn add_class(node: &NodeRef, class: &str) {
    if let Some(element) = node.cast::<Element>() {
        let _ = element.class_list().add_1(class);
    }
}

pub fn apply_palette(palette: &Palette) {
    let Some(root) = root_element() else {
        return;
    };
    for (name, value) in palette.css_variables() {
        set_style(&root, name, value);
    }
}

/// Opts the stylesheet into hiding not-yet-revealed elements.
pub fn mark_motion_ready() {
    if let Some(root) = root_element() {
        let _ = root.class_list().add_1("motion-ready");
    }
}

pub struct BodyOverflow(pub HtmlElement);

impl OverflowTarget for BodyOverflow {
    fn set_overflow(&self, value: &str) {
        set_style(&self.0, "overflow", value);
    }
}
