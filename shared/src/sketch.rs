use crate::brush::{brush_marks, eraser_marks, BrushKind, BrushSettings, Jitter, Mark};
use crate::error::SketchError;
use crate::geometry::{Point, Rect};
use crate::model::{NecklineStyle, SkirtStyle};
use crate::overlay::{neckline_image, Overlay, ScaleAxis};

pub const SKETCH_FILE_NAME: &str = "dress-sketch.png";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Select,
    Brush,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Select, Tool::Brush, Tool::Eraser];

    pub fn key(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "👆 선택",
            Tool::Brush => "✏️ 브러시",
            Tool::Eraser => "🧽 지우개",
        }
    }

    pub fn permits_painting(self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }

    pub fn permits_overlay(self) -> bool {
        self == Tool::Select
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Background,
    Overlay,
    Drawing,
}

/// Bottom to top.
pub const LAYER_STACK: [Layer; 3] = [Layer::Background, Layer::Overlay, Layer::Drawing];

pub fn silhouette_image(skirt: Option<SkirtStyle>) -> &'static str {
    match skirt.unwrap_or(SkirtStyle::ALine) {
        SkirtStyle::ALine => "/images/dress-aline.png",
        SkirtStyle::BellLine => "/images/dress-bellline.png",
        SkirtStyle::Mermaid => "/images/dress-mermaid.png",
    }
}

pub fn stored_sketch_file_name(dress_name: &str) -> String {
    format!("{dress_name}-sketch.png")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetState {
    Idle,
    Loading(LoadTicket),
    Ready,
    Failed,
}

/// Tracks the one image a surface currently wants. Completions for superseded
/// requests are dropped.
#[derive(Clone, Debug)]
pub struct AssetSlot {
    issued: u64,
    state: AssetState,
}

impl Default for AssetSlot {
    fn default() -> Self {
        Self {
            issued: 0,
            state: AssetState::Idle,
        }
    }
}

impl AssetSlot {
    pub fn state(&self) -> AssetState {
        self.state
    }

    pub fn request(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.state = AssetState::Loading(ticket);
        ticket
    }

    pub fn release(&mut self) {
        self.state = AssetState::Idle;
    }

    /// Records a load result. Returns false when the ticket is stale.
    pub fn settle(&mut self, ticket: LoadTicket, loaded: bool) -> bool {
        if self.state != AssetState::Loading(ticket) {
            return false;
        }
        self.state = if loaded {
            AssetState::Ready
        } else {
            AssetState::Failed
        };
        true
    }

    pub fn is_ready(&self) -> bool {
        self.state == AssetState::Ready
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    Silhouette,
    Neckline,
}

/// An image the widget wants fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub asset: Asset,
    pub ticket: LoadTicket,
    pub url: String,
}

pub enum StrokeMode {
    Idle,
    Painting { last: Point },
}

/// Result of a pointer sample while a gesture is active.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    None,
    Paint(Vec<Mark>),
    Overlay(Rect),
}

/// State of the sketch widget minus the pixels.
pub struct Sketch {
    tool: Tool,
    brush: BrushSettings,
    skirt: Option<SkirtStyle>,
    overlay: Overlay,
    background: AssetSlot,
    neckline_art: AssetSlot,
    stroke: StrokeMode,
}

impl Sketch {
    /// Opens the widget for a dress. Returns the loads to start right away.
    pub fn open(
        skirt: Option<SkirtStyle>,
        neckline: Option<NecklineStyle>,
    ) -> (Self, Vec<LoadRequest>) {
        let mut sketch = Self {
            tool: Tool::Select,
            brush: BrushSettings::default(),
            skirt,
            overlay: Overlay::new(None),
            background: AssetSlot::default(),
            neckline_art: AssetSlot::default(),
            stroke: StrokeMode::Idle,
        };
        let mut requests = vec![sketch.request_background()];
        requests.extend(sketch.set_neckline(neckline));
        (sketch, requests)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.stroke = StrokeMode::Idle;
        self.overlay.end();
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// Picking a solid color also switches the brush back to solid.
    pub fn set_color(&mut self, color: &str) {
        self.brush.kind = BrushKind::Solid;
        self.brush.color = color.to_string();
    }

    pub fn set_brush_kind(&mut self, kind: BrushKind) {
        self.brush.kind = kind;
    }

    pub fn set_width(&mut self, width: f64) {
        self.brush.width = width;
    }

    pub fn set_texture_size(&mut self, size: f64) {
        self.brush.texture_size = size;
    }

    pub fn skirt(&self) -> Option<SkirtStyle> {
        self.skirt
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn background(&self) -> AssetState {
        self.background.state()
    }

    pub fn neckline_art(&self) -> AssetState {
        self.neckline_art.state()
    }

    /// Swaps the silhouette. The drawing layer is left alone.
    pub fn set_skirt(&mut self, skirt: Option<SkirtStyle>) -> Option<LoadRequest> {
        if skirt == self.skirt && self.background.state() != AssetState::Failed {
            return None;
        }
        self.skirt = skirt;
        Some(self.request_background())
    }

    pub fn set_neckline(&mut self, neckline: Option<NecklineStyle>) -> Option<LoadRequest> {
        if !self.overlay.select(neckline) {
            return None;
        }
        match neckline {
            Some(style) => Some(LoadRequest {
                asset: Asset::Neckline,
                ticket: self.neckline_art.request(),
                url: neckline_image(style),
            }),
            None => {
                self.neckline_art.release();
                None
            }
        }
    }

    pub fn background_settled(&mut self, ticket: LoadTicket, loaded: bool) -> bool {
        let accepted = self.background.settle(ticket, loaded);
        if accepted && !loaded {
            self.stroke = StrokeMode::Idle;
        }
        accepted
    }

    pub fn neckline_settled(&mut self, ticket: LoadTicket, loaded: bool) -> bool {
        self.neckline_art.settle(ticket, loaded)
    }

    /// Routes a load result to the slot that issued it. Returns false for stale tickets.
    pub fn settled(&mut self, asset: Asset, ticket: LoadTicket, loaded: bool) -> bool {
        match asset {
            Asset::Silhouette => self.background_settled(ticket, loaded),
            Asset::Neckline => self.neckline_settled(ticket, loaded),
        }
    }

    pub fn can_paint(&self) -> bool {
        self.background.is_ready() && self.tool.permits_painting()
    }

    /// The neckline picture is drawn only once its image has arrived.
    pub fn shows_neckline_art(&self) -> bool {
        self.overlay.is_visible() && self.neckline_art.is_ready()
    }

    pub fn overlay_interactive(&self) -> bool {
        self.overlay.is_visible() && self.tool.permits_overlay()
    }

    pub fn press_canvas(&mut self, point: Point) -> bool {
        if !self.can_paint() {
            return false;
        }
        self.stroke = StrokeMode::Painting { last: point };
        true
    }

    pub fn press_overlay(&mut self, point: Point) -> bool {
        self.overlay_interactive() && self.overlay.begin_move(point)
    }

    pub fn press_handle(&mut self, axis: ScaleAxis, point: Point) -> bool {
        self.overlay_interactive() && self.overlay.begin_scale(axis, point)
    }

    pub fn drag(&mut self, point: Point, jitter: &mut dyn Jitter) -> Motion {
        if let StrokeMode::Painting { last } = self.stroke {
            if !self.can_paint() {
                self.stroke = StrokeMode::Idle;
                return Motion::None;
            }
            self.stroke = StrokeMode::Painting { last: point };
            let marks = match self.tool {
                Tool::Eraser => eraser_marks(&self.brush, last, point),
                _ => brush_marks(&self.brush, last, point, jitter),
            };
            return Motion::Paint(marks);
        }
        if self.overlay.update(point) {
            Motion::Overlay(self.overlay.rect())
        } else {
            Motion::None
        }
    }

    pub fn release(&mut self) {
        self.stroke = StrokeMode::Idle;
        self.overlay.end();
    }

    pub fn can_save(&self) -> bool {
        self.composite_plan().is_ok()
    }

    /// Layers to flatten, bottom first. The overlay is included only while a
    /// neckline is chosen.
    pub fn composite_plan(&self) -> Result<Vec<Layer>, SketchError> {
        if !self.background.is_ready() {
            return Err(SketchError::BackgroundNotReady);
        }
        let with_overlay = match (self.overlay.neckline(), self.neckline_art.state()) {
            (None, _) => false,
            (Some(_), AssetState::Ready) => true,
            (Some(_), AssetState::Loading(_)) => return Err(SketchError::OverlayLoading),
            (Some(_), AssetState::Failed | AssetState::Idle) => {
                return Err(SketchError::OverlayUnavailable)
            }
        };
        Ok(LAYER_STACK
            .into_iter()
            .filter(|layer| *layer != Layer::Overlay || with_overlay)
            .collect())
    }

    fn request_background(&mut self) -> LoadRequest {
        LoadRequest {
            asset: Asset::Silhouette,
            ticket: self.background.request(),
            url: silhouette_image(self.skirt).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{Composite, Shape, ERASER_SCALE};

    struct Half;

    impl Jitter for Half {
        fn sample(&mut self) -> f64 {
            0.5
        }
    }

    fn at(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn ready(neckline: Option<NecklineStyle>) -> Sketch {
        let (mut sketch, requests) = Sketch::open(Some(SkirtStyle::Mermaid), neckline);
        for request in requests {
            assert!(sketch.settled(request.asset, request.ticket, true));
        }
        sketch
    }

    #[test]
    fn opens_in_select_mode_with_requested_assets() {
        let (sketch, requests) = Sketch::open(None, Some(NecklineStyle::Halter));
        assert_eq!(sketch.tool(), Tool::Select);
        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            ["/images/dress-aline.png", "/images/necklines/halter.png"]
        );
        assert!(!sketch.can_save());
    }

    #[test]
    fn stale_background_completion_is_ignored() {
        let (mut sketch, requests) = Sketch::open(Some(SkirtStyle::ALine), None);
        let first = requests[0].ticket;
        let second = sketch.set_skirt(Some(SkirtStyle::BellLine)).unwrap();
        assert_eq!(second.url, "/images/dress-bellline.png");
        assert!(!sketch.background_settled(first, true));
        assert!(matches!(sketch.background(), AssetState::Loading(_)));
        assert!(sketch.background_settled(second.ticket, true));
        assert!(sketch.can_save());
    }

    #[test]
    fn failed_background_blocks_painting_and_saving() {
        let (mut sketch, requests) = Sketch::open(None, None);
        sketch.background_settled(requests[0].ticket, false);
        sketch.set_tool(Tool::Brush);
        assert!(!sketch.press_canvas(at(10.0, 10.0)));
        assert_eq!(sketch.composite_plan(), Err(SketchError::BackgroundNotReady));
    }

    #[test]
    fn select_mode_moves_overlay_but_never_paints() {
        let mut sketch = ready(Some(NecklineStyle::Round));
        assert!(!sketch.press_canvas(at(10.0, 10.0)));
        assert!(sketch.press_overlay(at(100.0, 80.0)));
        assert_eq!(
            sketch.drag(at(110.0, 90.0), &mut Half),
            Motion::Overlay(Rect::new(95.0, 75.0, 130.0, 70.0))
        );
        sketch.release();
        assert_eq!(sketch.drag(at(0.0, 0.0), &mut Half), Motion::None);
    }

    #[test]
    fn brush_mode_paints_and_locks_overlay() {
        let mut sketch = ready(Some(NecklineStyle::Round));
        sketch.set_tool(Tool::Brush);
        assert!(!sketch.press_overlay(at(100.0, 80.0)));
        assert!(!sketch.press_handle(ScaleAxis::Both, at(215.0, 135.0)));
        assert!(sketch.press_canvas(at(10.0, 10.0)));
        match sketch.drag(at(12.0, 14.0), &mut Half) {
            Motion::Paint(marks) => assert_eq!(marks.len(), 1),
            other => panic!("unexpected motion {other:?}"),
        }
    }

    #[test]
    fn composite_skips_overlay_without_neckline() {
        let sketch = ready(None);
        assert_eq!(
            sketch.composite_plan(),
            Ok(vec![Layer::Background, Layer::Drawing])
        );
        let sketch = ready(Some(NecklineStyle::Square));
        assert_eq!(sketch.composite_plan(), Ok(LAYER_STACK.to_vec()));
    }

    #[test]
    fn pending_neckline_blocks_save() {
        let mut sketch = ready(None);
        let request = sketch.set_neckline(Some(NecklineStyle::Heart)).unwrap();
        assert_eq!(sketch.composite_plan(), Err(SketchError::OverlayLoading));
        sketch.neckline_settled(request.ticket, false);
        assert_eq!(sketch.composite_plan(), Err(SketchError::OverlayUnavailable));
        assert!(sketch.set_neckline(None).is_none());
        assert!(sketch.can_save());
    }

    #[test]
    fn failed_neckline_hides_its_art() {
        let mut sketch = ready(Some(NecklineStyle::Round));
        assert!(sketch.shows_neckline_art());
        let request = sketch.set_neckline(Some(NecklineStyle::VNeck)).unwrap();
        assert!(!sketch.shows_neckline_art());
        assert!(sketch.neckline_settled(request.ticket, false));
        assert!(!sketch.shows_neckline_art());
        assert!(sketch.overlay().is_visible());
    }

    #[test]
    fn eraser_drag_cuts_through_the_drawing() {
        let mut sketch = ready(None);
        sketch.set_tool(Tool::Eraser);
        assert!(sketch.press_canvas(at(20.0, 20.0)));
        let Motion::Paint(marks) = sketch.drag(at(30.0, 25.0), &mut Half) else {
            panic!("eraser did not paint");
        };
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].composite, Composite::DestinationOut);
        match &marks[0].shape {
            Shape::Line { from, to, width, .. } => {
                assert_eq!((*from, *to), (at(20.0, 20.0), at(30.0, 25.0)));
                assert_eq!(*width, sketch.brush().width * ERASER_SCALE);
            }
            other => panic!("unexpected eraser shape {other:?}"),
        }
    }

    #[test]
    fn skirt_change_reloads_silhouette_and_keeps_the_drawing() {
        let mut sketch = ready(None);
        sketch.set_tool(Tool::Brush);
        sketch.set_color("#0000ff");
        assert!(sketch.press_canvas(at(10.0, 10.0)));
        assert!(matches!(sketch.drag(at(15.0, 12.0), &mut Half), Motion::Paint(_)));
        sketch.release();

        let request = sketch.set_skirt(Some(SkirtStyle::ALine)).unwrap();
        assert_eq!(request.asset, Asset::Silhouette);
        assert_eq!(request.url, "/images/dress-aline.png");
        assert!(!sketch.can_paint());
        assert!(sketch.settled(request.asset, request.ticket, true));

        assert_eq!(sketch.tool(), Tool::Brush);
        assert_eq!(sketch.brush().color, "#0000ff");
        assert_eq!(
            sketch.composite_plan(),
            Ok(vec![Layer::Background, Layer::Drawing])
        );
        assert!(sketch.press_canvas(at(15.0, 12.0)));
        assert!(sketch.set_skirt(Some(SkirtStyle::ALine)).is_none());
    }

    #[test]
    fn neckline_cleared_mid_load_drops_the_late_image() {
        let mut sketch = ready(None);
        let request = sketch.set_neckline(Some(NecklineStyle::OpenShoulder)).unwrap();
        assert!(sketch.set_neckline(None).is_none());
        assert!(!sketch.settled(request.asset, request.ticket, true));
        assert_eq!(sketch.neckline_art(), AssetState::Idle);
        assert!(!sketch.overlay().is_visible());
        assert_eq!(
            sketch.composite_plan(),
            Ok(vec![Layer::Background, Layer::Drawing])
        );
    }

    #[test]
    fn picking_a_color_returns_to_solid() {
        let mut sketch = ready(None);
        sketch.set_brush_kind(BrushKind::SilverStrong);
        sketch.set_color("#0000ff");
        assert_eq!(sketch.brush().kind, BrushKind::Solid);
        assert_eq!(sketch.brush().color, "#0000ff");
    }

    #[test]
    fn stored_sketch_name_uses_dress_name() {
        assert_eq!(stored_sketch_file_name("드레스 1"), "드레스 1-sketch.png");
    }
}
