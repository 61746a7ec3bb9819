use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlAnchorElement, HtmlCanvasElement,
    HtmlElement, HtmlImageElement, PointerEvent,
};

use dresstour_shared::geometry::{Rect, CANVAS_HEIGHT, CANVAS_WIDTH};
use dresstour_shared::model::{Detail, NecklineStyle, SkirtStyle};
use dresstour_shared::overlay::ScaleAxis;
use dresstour_shared::sketch::{Asset, Layer, LoadRequest, LoadTicket, Motion, Sketch, SKETCH_FILE_NAME};

use crate::dom::{event_to_point, get_element, make, set_hidden};
use crate::palette::{render_sketch_tools, sketch_action_from_event, SketchAction};
use crate::render::{clear_background, clear_layer, draw_layer, draw_overlay, paint_background, paint_marks};
use crate::util::BrowserJitter;

pub enum SketchEvent {
    Detail(Detail),
    Saved(String),
    Closed,
}

type Listener = Rc<dyn Fn(SketchEvent)>;

/// An image element with its load handlers kept alive until it settles or is replaced.
struct PendingImage {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut(Event)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

impl PendingImage {
    fn detach(&self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

struct Session {
    sketch: Sketch,
    silhouette: Option<PendingImage>,
    neckline: Option<PendingImage>,
    listener: Listener,
}

impl Session {
    fn slot(&mut self, asset: Asset) -> &mut Option<PendingImage> {
        match asset {
            Asset::Silhouette => &mut self.silhouette,
            Asset::Neckline => &mut self.neckline,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for image in [&self.silhouette, &self.neckline].into_iter().flatten() {
            image.detach();
        }
    }
}

pub struct SketchWidget {
    document: Document,
    modal: HtmlElement,
    stage: HtmlElement,
    background: HtmlCanvasElement,
    background_ctx: CanvasRenderingContext2d,
    drawing: HtmlCanvasElement,
    drawing_ctx: CanvasRenderingContext2d,
    overlay: HtmlElement,
    overlay_image: HtmlImageElement,
    tools: HtmlElement,
    session: RefCell<Option<Session>>,
}

fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas.set_width(CANVAS_WIDTH as u32);
    canvas.set_height(CANVAS_HEIGHT as u32);
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Invalid canvas context"))
}

fn percent(value: f64, whole: f64) -> String {
    format!("{}%", value / whole * 100.0)
}

impl SketchWidget {
    pub fn install(document: &Document) -> Result<Rc<Self>, JsValue> {
        let background: HtmlCanvasElement = get_element(document, "sketchBackground")?;
        let drawing: HtmlCanvasElement = get_element(document, "sketchDrawing")?;
        let widget = Rc::new(Self {
            document: document.clone(),
            modal: get_element(document, "sketchModal")?,
            stage: get_element(document, "sketchStage")?,
            background_ctx: context(&background)?,
            background,
            drawing_ctx: context(&drawing)?,
            drawing,
            overlay: get_element(document, "sketchOverlay")?,
            overlay_image: get_element(document, "sketchOverlayImage")?,
            tools: get_element(document, "sketchTools")?,
            session: RefCell::new(None),
        });
        widget.wire()?;
        Ok(widget)
    }

    pub fn is_open(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn open(
        self: &Rc<Self>,
        skirt: Option<SkirtStyle>,
        neckline: Option<NecklineStyle>,
        listener: Listener,
    ) -> Result<(), JsValue> {
        let (sketch, requests) = Sketch::open(skirt, neckline);
        self.session.replace(Some(Session {
            sketch,
            silhouette: None,
            neckline: None,
            listener,
        }));
        clear_background(&self.background_ctx);
        clear_layer(&self.drawing_ctx);
        for request in requests {
            self.load(request)?;
        }
        set_hidden(&self.modal, false);
        self.sync()?;
        log::debug!("sketch opened skirt={skirt:?} neckline={neckline:?}");
        Ok(())
    }

    pub fn close(&self) {
        let session = self.session.borrow_mut().take();
        set_hidden(&self.modal, true);
        if let Some(session) = session {
            (session.listener)(SketchEvent::Closed);
        }
    }

    fn load(self: &Rc<Self>, request: LoadRequest) -> Result<(), JsValue> {
        let LoadRequest { asset, ticket, url } = request;
        let image = HtmlImageElement::new()?;
        let onload = {
            let widget = self.clone();
            Closure::<dyn FnMut(Event)>::new(move |_| widget.settle(asset, ticket, true))
        };
        let onerror = {
            let widget = self.clone();
            let url = url.clone();
            Closure::<dyn FnMut(Event)>::new(move |_| {
                log::error!("image failed to load: {url}");
                widget.settle(asset, ticket, false);
            })
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(&url);
        let pending = PendingImage {
            image,
            _onload: onload,
            _onerror: onerror,
        };
        let mut session = self.session.borrow_mut();
        if let Some(session) = session.as_mut() {
            if let Some(previous) = session.slot(asset).replace(pending) {
                previous.detach();
            }
        }
        Ok(())
    }

    fn settle(&self, asset: Asset, ticket: LoadTicket, loaded: bool) {
        let painted = {
            let mut session = self.session.borrow_mut();
            let Some(session) = session.as_mut() else {
                return;
            };
            if !session.sketch.settled(asset, ticket, loaded) {
                log::debug!("dropping stale {asset:?} load");
                return;
            }
            match (asset, loaded, session.slot(asset).as_ref()) {
                (Asset::Silhouette, true, Some(pending)) => {
                    paint_background(&self.background_ctx, &pending.image)
                }
                (Asset::Silhouette, false, _) => {
                    clear_background(&self.background_ctx);
                    Ok(())
                }
                (Asset::Neckline, true, Some(pending)) => {
                    self.overlay_image.set_src(&pending.image.src());
                    Ok(())
                }
                (Asset::Neckline, false, _) => self.overlay_image.remove_attribute("src"),
                _ => Ok(()),
            }
        };
        if let Err(err) = painted.and_then(|_| self.sync()) {
            log::error!("sketch refresh failed: {err:?}");
        }
    }

    /// Brings toolbar, overlay box and tool-mode styling in line with the session.
    fn sync(&self) -> Result<(), JsValue> {
        let session = self.session.borrow();
        let Some(session) = session.as_ref() else {
            return Ok(());
        };
        let sketch = &session.sketch;
        self.stage.set_attribute("data-tool", sketch.tool().key())?;
        set_hidden(&self.overlay, !sketch.overlay().is_visible());
        set_hidden(&self.overlay_image, !sketch.shows_neckline_art());
        self.place_overlay(sketch.overlay().rect())?;
        render_sketch_tools(&self.document, &self.tools, sketch)
    }

    fn place_overlay(&self, rect: Rect) -> Result<(), JsValue> {
        let style = self.overlay.style();
        style.set_property("left", &percent(rect.x, CANVAS_WIDTH))?;
        style.set_property("top", &percent(rect.y, CANVAS_HEIGHT))?;
        style.set_property("width", &percent(rect.width, CANVAS_WIDTH))?;
        style.set_property("height", &percent(rect.height, CANVAS_HEIGHT))?;
        Ok(())
    }

    fn emit(&self, event: SketchEvent) {
        let listener = self
            .session
            .borrow()
            .as_ref()
            .map(|session| session.listener.clone());
        if let Some(listener) = listener {
            listener(event);
        }
    }

    fn handle_action(self: &Rc<Self>, action: SketchAction) -> Result<(), JsValue> {
        let mut request = None;
        let mut outgoing = None;
        {
            let mut session = self.session.borrow_mut();
            let Some(session) = session.as_mut() else {
                return Ok(());
            };
            match action {
                SketchAction::Skirt(skirt) => {
                    request = session.sketch.set_skirt(Some(skirt));
                    outgoing = Some(SketchEvent::Detail(Detail::Skirt(Some(skirt))));
                }
                SketchAction::Neckline(neckline) => {
                    request = session.sketch.set_neckline(neckline);
                    outgoing = Some(SketchEvent::Detail(Detail::Neckline(neckline)));
                }
                SketchAction::Tool(tool) => session.sketch.set_tool(tool),
                SketchAction::Color(color) => session.sketch.set_color(&color),
                SketchAction::Brush(kind) => session.sketch.set_brush_kind(kind),
                SketchAction::Width(width) => session.sketch.set_width(width),
                SketchAction::TextureSize(size) => session.sketch.set_texture_size(size),
                SketchAction::Clear => clear_layer(&self.drawing_ctx),
                SketchAction::Save => outgoing = self.flatten(session)?.map(SketchEvent::Saved),
                SketchAction::Close => {}
            }
        }
        if let Some(request) = request {
            self.load(request)?;
        }
        self.sync()?;
        match outgoing {
            Some(SketchEvent::Saved(data_url)) => {
                self.download(&data_url)?;
                self.emit(SketchEvent::Saved(data_url));
                self.close();
            }
            Some(event) => self.emit(event),
            None => {}
        }
        Ok(())
    }

    /// Flattens the layers into a PNG data URL, or `None` while saving is blocked.
    fn flatten(&self, session: &Session) -> Result<Option<String>, JsValue> {
        let plan = match session.sketch.composite_plan() {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("sketch not saved: {err}");
                return Ok(None);
            }
        };
        let output: HtmlCanvasElement = make(&self.document, "canvas", "")?;
        let ctx = context(&output)?;
        for layer in plan {
            match layer {
                Layer::Background => draw_layer(&ctx, &self.background)?,
                Layer::Overlay => {
                    if let Some(pending) = &session.neckline {
                        draw_overlay(&ctx, &pending.image, session.sketch.overlay().rect())?;
                    }
                }
                Layer::Drawing => draw_layer(&ctx, &self.drawing)?,
            }
        }
        output.to_data_url_with_type("image/png").map(Some)
    }

    fn download(&self, data_url: &str) -> Result<(), JsValue> {
        let anchor: HtmlAnchorElement = make(&self.document, "a", "")?;
        anchor.set_href(data_url);
        anchor.set_download(SKETCH_FILE_NAME);
        anchor.click();
        Ok(())
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        {
            let widget = self.clone();
            let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(action) = sketch_action_from_event(&event) else {
                    return;
                };
                if matches!(action, SketchAction::Close) {
                    widget.close();
                    return;
                }
                if let Err(err) = widget.handle_action(action) {
                    log::error!("sketch action failed: {err:?}");
                }
            });
            self.tools
                .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }

        {
            let widget = self.clone();
            let onpointerdown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
                let Some(point) = event_to_point(&widget.drawing, &event) else {
                    return;
                };
                let pressed = widget
                    .session
                    .borrow_mut()
                    .as_mut()
                    .is_some_and(|session| session.sketch.press_canvas(point));
                if pressed {
                    event.prevent_default();
                    if let Err(err) = widget.drawing.set_pointer_capture(event.pointer_id()) {
                        log::debug!("pointer capture failed: {err:?}");
                    }
                }
            });
            self.drawing.add_event_listener_with_callback(
                "pointerdown",
                onpointerdown.as_ref().unchecked_ref(),
            )?;
            onpointerdown.forget();
        }

        {
            let widget = self.clone();
            let onpointerdown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
                let Some(point) = event_to_point(&widget.drawing, &event) else {
                    return;
                };
                let handle = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| element.get_attribute("data-handle"))
                    .and_then(|name| ScaleAxis::from_handle(&name));
                let pressed = widget
                    .session
                    .borrow_mut()
                    .as_mut()
                    .is_some_and(|session| match handle {
                        Some(axis) => session.sketch.press_handle(axis, point),
                        None => session.sketch.press_overlay(point),
                    });
                if pressed {
                    event.prevent_default();
                    event.stop_propagation();
                    if let Err(err) = widget.overlay.set_pointer_capture(event.pointer_id()) {
                        log::debug!("pointer capture failed: {err:?}");
                    }
                }
            });
            self.overlay.add_event_listener_with_callback(
                "pointerdown",
                onpointerdown.as_ref().unchecked_ref(),
            )?;
            onpointerdown.forget();
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
        {
            let widget = self.clone();
            let onpointermove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
                let Some(point) = event_to_point(&widget.drawing, &event) else {
                    return;
                };
                let motion = match widget.session.borrow_mut().as_mut() {
                    Some(session) => session.sketch.drag(point, &mut BrowserJitter),
                    None => return,
                };
                let result = match motion {
                    Motion::None => Ok(()),
                    Motion::Paint(marks) => paint_marks(&widget.drawing_ctx, &marks),
                    Motion::Overlay(rect) => widget.place_overlay(rect),
                };
                if let Err(err) = result {
                    log::error!("sketch pointer move failed: {err:?}");
                }
            });
            window.add_event_listener_with_callback(
                "pointermove",
                onpointermove.as_ref().unchecked_ref(),
            )?;
            onpointermove.forget();
        }

        for name in ["pointerup", "pointercancel"] {
            let widget = self.clone();
            let onpointerup = Closure::<dyn FnMut(PointerEvent)>::new(move |_| {
                if let Some(session) = widget.session.borrow_mut().as_mut() {
                    session.sketch.release();
                }
            });
            window.add_event_listener_with_callback(name, onpointerup.as_ref().unchecked_ref())?;
            onpointerup.forget();
        }
        Ok(())
    }
}
