use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlElement, PointerEvent};

use dresstour_shared::geometry::{display_to_backing, Point};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Creates `<tag class="...">`.
pub fn make<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {tag}")))
}

pub fn text(document: &Document, tag: &str, class: &str, content: &str) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = make(document, tag, class)?;
    element.set_text_content(Some(content));
    Ok(element)
}

/// A `type="button"` carrying the attributes the delegated click handler reads.
pub fn action_button(
    document: &Document,
    class: &str,
    label: &str,
    action: &str,
    attrs: &[(&str, &str)],
) -> Result<HtmlElement, JsValue> {
    let button = text(document, "button", class, label)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action)?;
    for (name, value) in attrs {
        button.set_attribute(name, value)?;
    }
    Ok(button)
}

pub fn set_pressed(element: &Element, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = element.set_attribute("aria-pressed", pressed);
}

pub fn set_hidden(element: &Element, hidden: bool) {
    if hidden {
        let _ = element.set_attribute("hidden", "");
    } else {
        let _ = element.remove_attribute("hidden");
    }
}

/// The nearest element, from the event target upward, that carries `data-action`.
pub fn action_target(event: &Event) -> Option<Element> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if element.has_attribute("data-action") {
            return Some(element);
        }
        current = element.parent_element();
    }
    None
}

/// Pointer position in canvas backing pixels.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    display_to_backing(
        Point {
            x: event.client_x() as f64 - rect.left(),
            y: event.client_y() as f64 - rect.top(),
        },
        rect.width(),
        rect.height(),
    )
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
