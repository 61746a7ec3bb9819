use crate::geometry::{clamp, Point, Rect, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::model::NecklineStyle;

pub const MIN_WIDTH: f64 = 50.0;
pub const MAX_WIDTH: f64 = 200.0;
pub const MIN_HEIGHT: f64 = 40.0;
pub const MAX_HEIGHT: f64 = 160.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    Both,
    X,
    Y,
}

impl ScaleAxis {
    pub fn from_handle(name: &str) -> Option<Self> {
        match name {
            "both" => Some(ScaleAxis::Both),
            "x" => Some(ScaleAxis::X),
            "y" => Some(ScaleAxis::Y),
            _ => None,
        }
    }

    pub fn handle(self) -> &'static str {
        match self {
            ScaleAxis::Both => "both",
            ScaleAxis::X => "x",
            ScaleAxis::Y => "y",
        }
    }

    fn scales_x(self) -> bool {
        matches!(self, ScaleAxis::Both | ScaleAxis::X)
    }

    fn scales_y(self) -> bool {
        matches!(self, ScaleAxis::Both | ScaleAxis::Y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayMode {
    Idle,
    Move { grab: Point },
    Scale { axis: ScaleAxis, start: Point, origin: Rect },
}

/// Asset name shared by the overlay image and its default placement.
pub fn neckline_key(style: NecklineStyle) -> &'static str {
    match style {
        NecklineStyle::Round => "round",
        NecklineStyle::Square => "square",
        NecklineStyle::VNeck => "v-neck",
        NecklineStyle::OpenShoulder => "open-shoulder",
        NecklineStyle::Straight => "straight",
        NecklineStyle::Heart => "heart",
        NecklineStyle::Halter => "halter",
    }
}

pub fn neckline_image(style: NecklineStyle) -> String {
    format!("/images/necklines/{}.png", neckline_key(style))
}

pub fn default_placement(style: NecklineStyle) -> Rect {
    match style {
        NecklineStyle::OpenShoulder | NecklineStyle::Round => Rect::new(85.0, 65.0, 130.0, 70.0),
        NecklineStyle::VNeck => Rect::new(90.0, 70.0, 120.0, 80.0),
        NecklineStyle::Halter => Rect::new(88.0, 60.0, 124.0, 75.0),
        NecklineStyle::Heart => Rect::new(87.0, 68.0, 126.0, 72.0),
        NecklineStyle::Straight => Rect::new(82.0, 62.0, 136.0, 68.0),
        NecklineStyle::Square => Rect::new(88.0, 66.0, 124.0, 74.0),
    }
}

/// The movable, resizable neckline rectangle over the sketch canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    neckline: Option<NecklineStyle>,
    rect: Rect,
    mode: OverlayMode,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Overlay {
    pub fn new(neckline: Option<NecklineStyle>) -> Self {
        Self {
            neckline,
            rect: default_placement(neckline.unwrap_or(NecklineStyle::Round)),
            mode: OverlayMode::Idle,
        }
    }

    pub fn neckline(&self) -> Option<NecklineStyle> {
        self.neckline
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn is_visible(&self) -> bool {
        self.neckline.is_some()
    }

    /// Switching style snaps the rectangle back to that style's placement.
    /// Returns whether the selection changed.
    pub fn select(&mut self, neckline: Option<NecklineStyle>) -> bool {
        if neckline == self.neckline {
            return false;
        }
        self.neckline = neckline;
        self.mode = OverlayMode::Idle;
        if let Some(style) = neckline {
            self.rect = default_placement(style);
        }
        true
    }

    /// Starts a move when the pointer lands on the rectangle.
    pub fn begin_move(&mut self, point: Point) -> bool {
        if !self.is_visible() || !self.rect.contains(point) {
            return false;
        }
        self.mode = OverlayMode::Move {
            grab: Point {
                x: point.x - self.rect.x,
                y: point.y - self.rect.y,
            },
        };
        true
    }

    pub fn begin_scale(&mut self, axis: ScaleAxis, point: Point) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.mode = OverlayMode::Scale {
            axis,
            start: point,
            origin: self.rect,
        };
        true
    }

    /// Applies a pointer sample to the active gesture. Returns whether the rectangle moved.
    pub fn update(&mut self, point: Point) -> bool {
        let next = match self.mode {
            OverlayMode::Idle => return false,
            OverlayMode::Move { grab } => Rect {
                x: clamp(point.x - grab.x, 0.0, CANVAS_WIDTH - self.rect.width),
                y: clamp(point.y - grab.y, 0.0, CANVAS_HEIGHT - self.rect.height),
                ..self.rect
            },
            OverlayMode::Scale {
                axis,
                start,
                origin,
            } => {
                let mut next = self.rect;
                if axis.scales_x() {
                    let max = MAX_WIDTH.min(CANVAS_WIDTH - origin.x);
                    next.width = clamp(origin.width + point.x - start.x, MIN_WIDTH, max);
                }
                if axis.scales_y() {
                    let max = MAX_HEIGHT.min(CANVAS_HEIGHT - origin.y);
                    next.height = clamp(origin.height + point.y - start.y, MIN_HEIGHT, max);
                }
                next
            }
        };
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    pub fn end(&mut self) {
        self.mode = OverlayMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn selecting_a_style_resets_placement() {
        let mut overlay = Overlay::new(Some(NecklineStyle::Round));
        assert!(overlay.begin_move(at(100.0, 80.0)));
        overlay.update(at(10.0, 10.0));
        overlay.end();
        assert_ne!(overlay.rect(), default_placement(NecklineStyle::Round));

        assert!(overlay.select(Some(NecklineStyle::VNeck)));
        assert_eq!(overlay.rect(), Rect::new(90.0, 70.0, 120.0, 80.0));
        assert!(!overlay.select(Some(NecklineStyle::VNeck)));
    }

    #[test]
    fn hidden_overlay_ignores_pointer() {
        let mut overlay = Overlay::new(Some(NecklineStyle::Heart));
        overlay.select(None);
        assert!(!overlay.is_visible());
        assert!(!overlay.begin_move(at(100.0, 80.0)));
        assert!(!overlay.begin_scale(ScaleAxis::Both, at(100.0, 80.0)));
        assert!(!overlay.update(at(0.0, 0.0)));
    }

    #[test]
    fn move_keeps_grab_offset_and_clamps() {
        let mut overlay = Overlay::new(Some(NecklineStyle::Round));
        assert!(!overlay.begin_move(at(10.0, 10.0)));
        assert!(overlay.begin_move(at(95.0, 75.0)));
        overlay.update(at(105.0, 85.0));
        assert_eq!(overlay.rect(), Rect::new(95.0, 75.0, 130.0, 70.0));
        overlay.update(at(1000.0, -50.0));
        assert_eq!(overlay.rect(), Rect::new(170.0, 0.0, 130.0, 70.0));
    }

    #[test]
    fn width_handle_leaves_height_alone() {
        let mut overlay = Overlay::new(Some(NecklineStyle::Round));
        overlay.begin_scale(ScaleAxis::X, at(215.0, 100.0));
        overlay.update(at(500.0, 300.0));
        let rect = overlay.rect();
        assert_eq!(rect.width, MAX_WIDTH);
        assert_eq!(rect.height, 70.0);
        overlay.update(at(0.0, 0.0));
        assert_eq!(overlay.rect().width, MIN_WIDTH);
    }

    #[test]
    fn scale_never_pushes_past_the_canvas_edge() {
        let mut overlay = Overlay::new(Some(NecklineStyle::Round));
        overlay.begin_move(at(100.0, 80.0));
        overlay.update(at(300.0, 400.0));
        overlay.end();
        overlay.begin_scale(ScaleAxis::Both, at(300.0, 400.0));
        overlay.update(at(600.0, 800.0));
        assert!(overlay.rect().fits_canvas());
    }

    #[test]
    fn image_paths_use_asset_keys() {
        assert_eq!(
            neckline_image(NecklineStyle::OpenShoulder),
            "/images/necklines/open-shoulder.png"
        );
    }

    #[derive(Clone, Debug)]
    enum Step {
        Move(f64, f64, f64, f64),
        Scale(u8, f64, f64, f64, f64),
        Select(usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        let coord = -100.0f64..700.0;
        prop_oneof![
            (coord.clone(), coord.clone(), coord.clone(), coord.clone())
                .prop_map(|(a, b, c, d)| Step::Move(a, b, c, d)),
            (0u8..3, coord.clone(), coord.clone(), coord.clone(), coord)
                .prop_map(|(axis, a, b, c, d)| Step::Scale(axis, a, b, c, d)),
            (0usize..8).prop_map(Step::Select),
        ]
    }

    proptest! {
        #[test]
        fn rectangle_stays_on_canvas_within_limits(steps in proptest::collection::vec(step(), 0..40)) {
            let mut overlay = Overlay::new(Some(NecklineStyle::Round));
            for step in steps {
                match step {
                    Step::Move(x0, y0, x1, y1) => {
                        overlay.begin_move(at(x0, y0));
                        overlay.update(at(x1, y1));
                    }
                    Step::Scale(axis, x0, y0, x1, y1) => {
                        let axis = [ScaleAxis::Both, ScaleAxis::X, ScaleAxis::Y][axis as usize];
                        overlay.begin_scale(axis, at(x0, y0));
                        overlay.update(at(x1, y1));
                    }
                    Step::Select(index) => {
                        overlay.select(NecklineStyle::ALL.get(index).copied());
                    }
                }
                overlay.end();
                let rect = overlay.rect();
                prop_assert!(rect.fits_canvas());
                prop_assert!((MIN_WIDTH..=MAX_WIDTH).contains(&rect.width));
                prop_assert!((MIN_HEIGHT..=MAX_HEIGHT).contains(&rect.height));
            }
        }
    }
}
