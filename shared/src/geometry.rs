pub const CANVAS_WIDTH: f64 = 300.0;
pub const CANVAS_HEIGHT: f64 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rectangle lies entirely on the canvas.
    pub fn fits_canvas(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= CANVAS_WIDTH
            && self.bottom() <= CANVAS_HEIGHT
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

/// Maps a position measured against the displayed canvas box onto backing pixels.
pub fn display_to_backing(offset: Point, display_width: f64, display_height: f64) -> Option<Point> {
    if display_width <= 0.0 || display_height <= 0.0 {
        return None;
    }
    normalize_point(Point {
        x: offset.x * CANVAS_WIDTH / display_width,
        y: offset.y * CANVAS_HEIGHT / display_height,
    })
}

/// Clamp that tolerates an inverted range by preferring the lower bound.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_offsets_scale_to_backing_pixels() {
        let point = display_to_backing(Point { x: 75.0, y: 100.0 }, 150.0, 200.0).unwrap();
        assert_eq!(point, Point { x: 150.0, y: 200.0 });
    }

    #[test]
    fn collapsed_display_box_yields_nothing() {
        assert!(display_to_backing(Point { x: 1.0, y: 1.0 }, 0.0, 200.0).is_none());
        assert!(display_to_backing(Point { x: f64::NAN, y: 1.0 }, 300.0, 400.0).is_none());
    }

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point { x: 30.0, y: 10.0 }));
        assert!(!rect.contains(Point { x: 30.5, y: 10.0 }));
    }
}
