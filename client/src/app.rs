use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use dresstour_shared::report::Report;
use dresstour_shared::sketch::stored_sketch_file_name;
use dresstour_shared::storage::{load_catalog, save_catalog, Loaded};
use dresstour_shared::DressChange;

use crate::actions::{parse_action, update, Effect, UiAction};
use crate::dom::{action_target, alert, get_element, make};
use crate::persistence::{open_print_window, LocalStore};
use crate::sketch::{SketchEvent, SketchWidget};
use crate::state::{DressRef, State};
use crate::util::{make_shop_id, today};
use crate::views::{render, GATE_INPUT_ID};

pub const REPORT_FAILED: &str = "PDF 생성 중 오류가 발생했습니다.";

fn debug_enabled(window: &web_sys::Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn form_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    element
        .dyn_ref::<HtmlSelectElement>()
        .map(HtmlSelectElement::value)
}

/// Decodes the action carried by `element` under the attribute `marker`.
fn element_action(element: &Element, marker: &str) -> Option<UiAction> {
    if element.has_attribute("disabled") {
        return None;
    }
    let name = element.get_attribute(marker)?;
    let attr = |key: &str| element.get_attribute(key);
    parse_action(&name, &attr, form_value(element))
}

fn event_element(event: &Event) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
}

struct App {
    document: Document,
    root: HtmlElement,
    store: LocalStore,
    state: RefCell<State>,
    sketch: Rc<SketchWidget>,
}

impl App {
    fn render(&self) {
        let state = self.state.borrow();
        if let Err(err) = render(&self.document, &self.root, &state) {
            log::error!("render failed: {err:?}");
        }
    }

    fn persist(&self) {
        let state = self.state.borrow();
        match save_catalog(&self.store, &state.catalog) {
            Ok(true) => log::debug!("catalog saved ({} shops)", state.catalog.shops().len()),
            Ok(false) => log::debug!("empty catalog not saved"),
            Err(err) => log::warn!("catalog not saved: {err}"),
        }
    }

    /// Runs one action. Text edits pass `redraw = false` so the focused field survives.
    fn dispatch(self: &Rc<Self>, action: UiAction, redraw: bool) {
        let effect = update(&mut self.state.borrow_mut(), action, make_shop_id);
        let result = match effect {
            Ok(Effect::Nothing) => Ok(()),
            Ok(Effect::Render) => {
                self.render();
                Ok(())
            }
            Ok(Effect::Commit) => {
                self.persist();
                if redraw {
                    self.render();
                }
                Ok(())
            }
            Ok(Effect::OpenSketch(target)) => self.open_sketch(target),
            Ok(Effect::DownloadSketch(target)) => self.download_sketch(&target),
            Ok(Effect::ExportReport) => {
                self.export_report();
                Ok(())
            }
            Err(err) => {
                log::warn!("edit rejected: {err}");
                Ok(())
            }
        };
        if let Err(err) = result {
            log::error!("action failed: {err:?}");
        }
    }

    fn open_sketch(self: &Rc<Self>, target: DressRef) -> Result<(), JsValue> {
        if self.sketch.is_open() {
            return Ok(());
        }
        let (skirt, neckline) = {
            let state = self.state.borrow();
            let Some(dress) = state.catalog.dress(&target.shop_id, &target.dress_id) else {
                return Ok(());
            };
            (dress.details.skirt, dress.details.neckline)
        };
        let app = self.clone();
        let listener = Rc::new(move |event: SketchEvent| {
            let change = match event {
                SketchEvent::Detail(detail) => DressChange::Detail(detail),
                SketchEvent::Saved(data_url) => DressChange::Sketch(Some(data_url)),
                SketchEvent::Closed => {
                    app.render();
                    return;
                }
            };
            app.dispatch(
                UiAction::ChangeDress {
                    target: target.clone(),
                    change,
                },
                true,
            );
        });
        self.sketch.open(skirt, neckline, listener)
    }

    fn download_sketch(&self, target: &DressRef) -> Result<(), JsValue> {
        let state = self.state.borrow();
        let Some(dress) = state.catalog.dress(&target.shop_id, &target.dress_id) else {
            return Ok(());
        };
        let Some(data_url) = &dress.sketch_data else {
            return Ok(());
        };
        let anchor: HtmlAnchorElement = make(&self.document, "a", "")?;
        anchor.set_href(data_url);
        anchor.set_download(&stored_sketch_file_name(&dress.name));
        anchor.click();
        Ok(())
    }

    fn export_report(&self) {
        let report = Report::build(&self.state.borrow().catalog, today());
        log::info!(
            "exporting {} ({} pages)",
            report.file_name(),
            report.pages().len()
        );
        if let Err(err) = open_print_window(&self.document, &report.to_document()) {
            log::error!("report export failed: {err:?}");
            alert(REPORT_FAILED);
        }
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        {
            let app = self.clone();
            let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(element) = action_target(&event) else {
                    return;
                };
                if let Some(action) = element_action(&element, "data-action") {
                    app.dispatch(action, true);
                }
            });
            self.root
                .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }

        {
            let app = self.clone();
            let oninput = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(element) = event_element(&event) else {
                    return;
                };
                if let Some(action) = element_action(&element, "data-input") {
                    app.dispatch(action, false);
                }
            });
            self.root
                .add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
            oninput.forget();
        }

        {
            let app = self.clone();
            let onchange = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(element) = event_element(&event) else {
                    return;
                };
                if let Some(action) = element_action(&element, "data-change") {
                    app.dispatch(action, true);
                }
            });
            self.root
                .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();
        }

        {
            let app = self.clone();
            let onsubmit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let is_gate = event_element(&event)
                    .and_then(|form| form.get_attribute("data-form"))
                    .is_some_and(|name| name == "gate");
                if !is_gate {
                    return;
                }
                event.prevent_default();
                let code = get_element::<HtmlInputElement>(&app.document, GATE_INPUT_ID)
                    .map(|input| input.value())
                    .unwrap_or_default();
                app.dispatch(UiAction::Unlock(code), true);
            });
            self.root
                .add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())?;
            onsubmit.forget();
        }
        Ok(())
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let level = if debug_enabled(&window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();

    let store = LocalStore::open(&window);
    let loaded = load_catalog(&store);
    let restored = match &loaded {
        Loaded::Stored(catalog) => {
            log::info!("restored {} shops", catalog.shops().len());
            true
        }
        Loaded::Seeded => {
            log::info!("no saved catalog, starting from seed shops");
            false
        }
        Loaded::Recovered(err) => {
            log::warn!("saved catalog unusable, starting from seed shops: {err}");
            false
        }
    };

    let app = Rc::new(App {
        root: get_element(&document, "app")?,
        sketch: SketchWidget::install(&document)?,
        document,
        store,
        state: RefCell::new(State::new(loaded.into_catalog(), restored)),
    });
    app.wire()?;
    app.render();
    Ok(())
}
