use std::f64::consts::PI;

use crate::geometry::Point;

pub const BRUSH_WIDTHS: [f64; 5] = [2.0, 4.0, 8.0, 12.0, 16.0];
pub const TEXTURE_SIZES: [f64; 5] = [6.0, 8.0, 12.0, 16.0, 20.0];
pub const ERASER_SCALE: f64 = 8.0;

pub const SOLID_PALETTE: [(&str, &str); 6] = [
    ("#ff0000", "빨강"),
    ("#0000ff", "파랑"),
    ("#00ff00", "초록"),
    ("#ffff00", "노랑"),
    ("#ff00ff", "분홍"),
    ("#000000", "검정"),
];

const LACE_FILL: &str = "#faf9f7";
const LACE_THREAD: &str = "#f0ede8";
const FLOWER_WHITE: &str = "#fefcff";
const GLINT: &str = "#ffffff";

/// Radial gradient stops of a sparkle, from its center outward.
pub const SPARKLE_STOPS: [(f64, &str); 5] = [
    (0.0, "#ffffff"),
    (0.3, "#f0f0f0"),
    (0.6, "#d0d0d0"),
    (0.8, "#b0b0b0"),
    (1.0, "transparent"),
];

/// Source of uniform samples in `[0, 1)` for sparkle placement.
pub trait Jitter {
    fn sample(&mut self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrushKind {
    Solid,
    Lace,
    LaceFlower,
    SilverWeak,
    SilverStrong,
}

impl BrushKind {
    pub const TEXTURES: [BrushKind; 4] = [
        BrushKind::Lace,
        BrushKind::LaceFlower,
        BrushKind::SilverWeak,
        BrushKind::SilverStrong,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BrushKind::Solid => "solid",
            BrushKind::Lace => "lace",
            BrushKind::LaceFlower => "lace-flower",
            BrushKind::SilverWeak => "silver-weak",
            BrushKind::SilverStrong => "silver-strong",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [BrushKind::Solid]
            .into_iter()
            .chain(Self::TEXTURES)
            .find(|kind| kind.key() == key)
    }

    pub fn button_label(self) -> &'static str {
        match self {
            BrushKind::Solid => "일반 색상",
            BrushKind::Lace => "🕸️ 레이스 질감",
            BrushKind::LaceFlower => "🌸 꽃무늬 레이스",
            BrushKind::SilverWeak => "✨ 실버 반짝이 (약함)",
            BrushKind::SilverStrong => "💎 실버 반짝이 (강함)",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            BrushKind::Solid => "일반 색상 브러시",
            BrushKind::Lace => "흩날리는 레이스 질감 🕸️✨",
            BrushKind::LaceFlower => "꽃무늬 레이스 질감 🌸✨",
            BrushKind::SilverWeak => "얇은 큐빅 반짝이 (약함) 💎",
            BrushKind::SilverStrong => "다이아몬드 반짝이 (강함) 💎✨",
        }
    }

    pub fn is_texture(self) -> bool {
        self != BrushKind::Solid
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrushSettings {
    pub kind: BrushKind,
    pub color: String,
    pub width: f64,
    pub texture_size: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::Solid,
            color: SOLID_PALETTE[0].0.to_string(),
            width: BRUSH_WIDTHS[0],
            texture_size: TEXTURE_SIZES[1],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    DestinationOut,
}

impl Composite {
    pub fn operation(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::DestinationOut => "destination-out",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: &'static str,
    pub blur: f64,
    pub offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

impl LineCap {
    pub fn name(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
        cap: LineCap,
    },
    Square {
        center: Point,
        size: f64,
        color: &'static str,
    },
    Ring {
        center: Point,
        radius: f64,
        color: &'static str,
        width: f64,
    },
    /// Two perpendicular strokes through `center`, turned by `rotation`.
    Cross {
        center: Point,
        half: f64,
        rotation: f64,
        color: &'static str,
        width: f64,
    },
    Dot {
        center: Point,
        radius: f64,
        color: &'static str,
    },
    /// Filled and outlined ellipse, major axis along `rotation`.
    Petal {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        color: &'static str,
        width: f64,
    },
    /// Diamond filled with `SPARKLE_STOPS`, half-height `size`, half-width `0.7 * size`.
    Sparkle {
        center: Point,
        size: f64,
        rotation: f64,
    },
}

/// One drawing instruction for the sketch layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub composite: Composite,
    pub alpha: f64,
    pub shadow: Option<Shadow>,
    pub shape: Shape,
}

impl Mark {
    fn plain(alpha: f64, shape: Shape) -> Self {
        Self {
            composite: Composite::SourceOver,
            alpha,
            shadow: None,
            shape,
        }
    }

    fn shadowed(alpha: f64, shadow: Shadow, shape: Shape) -> Self {
        Self {
            shadow: Some(shadow),
            ..Self::plain(alpha, shape)
        }
    }
}

/// Marks for one pointer sample of a brush stroke. Solid strokes join the
/// previous sample; textures stamp at `to` only.
pub fn brush_marks(
    settings: &BrushSettings,
    from: Point,
    to: Point,
    jitter: &mut dyn Jitter,
) -> Vec<Mark> {
    match settings.kind {
        BrushKind::Solid => vec![Mark::plain(
            1.0,
            Shape::Line {
                from,
                to,
                color: settings.color.clone(),
                width: settings.width,
                cap: LineCap::Round,
            },
        )],
        BrushKind::Lace => lace_stamp(to, settings.texture_size),
        BrushKind::LaceFlower => flower_stamp(to, settings.texture_size),
        BrushKind::SilverWeak => sparkle_stamp(to, settings.texture_size, 4, 0.3, jitter),
        BrushKind::SilverStrong => sparkle_stamp(to, settings.texture_size, 5, 0.5, jitter),
    }
}

pub fn eraser_marks(settings: &BrushSettings, from: Point, to: Point) -> Vec<Mark> {
    vec![Mark {
        composite: Composite::DestinationOut,
        alpha: 1.0,
        shadow: None,
        shape: Shape::Line {
            from,
            to,
            color: "#000000".to_string(),
            width: settings.width * ERASER_SCALE,
            cap: LineCap::Round,
        },
    }]
}

fn lace_stamp(center: Point, size: f64) -> Vec<Mark> {
    let alpha = 0.3;
    let shadow = Shadow {
        color: "#000000",
        blur: 4.0,
        offset: 3.0,
    };
    let corner = size / 3.0;
    let mut marks = vec![
        Mark::plain(
            alpha,
            Shape::Square {
                center,
                size,
                color: LACE_FILL,
            },
        ),
        Mark::shadowed(
            alpha,
            shadow,
            Shape::Ring {
                center,
                radius: size / 4.0,
                color: LACE_THREAD,
                width: 2.0,
            },
        ),
        Mark::shadowed(
            alpha,
            shadow,
            Shape::Cross {
                center,
                half: size / 2.0,
                rotation: 0.0,
                color: LACE_THREAD,
                width: 2.0,
            },
        ),
    ];
    for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        marks.push(Mark::shadowed(
            alpha,
            shadow,
            Shape::Dot {
                center: Point {
                    x: center.x + dx * corner,
                    y: center.y + dy * corner,
                },
                radius: size / 8.0,
                color: LACE_THREAD,
            },
        ));
    }
    marks
}

fn flower_stamp(center: Point, size: f64) -> Vec<Mark> {
    let alpha = 0.2;
    let shadow = Shadow {
        color: "#777777",
        blur: 2.0,
        offset: 1.0,
    };
    let mut marks = vec![Mark::shadowed(
        alpha,
        shadow,
        Shape::Dot {
            center,
            radius: size / 6.0,
            color: FLOWER_WHITE,
        },
    )];
    for petal in 0..5 {
        let angle = f64::from(petal) * 2.0 * PI / 5.0;
        let tip = Point {
            x: center.x + angle.cos() * size / 3.0,
            y: center.y + angle.sin() * size / 3.0,
        };
        marks.push(Mark::shadowed(
            alpha,
            shadow,
            Shape::Petal {
                center: tip,
                radius_x: size / 6.0,
                radius_y: size / 12.0,
                rotation: angle,
                color: FLOWER_WHITE,
                width: 2.0,
            },
        ));
        marks.push(Mark::shadowed(
            alpha,
            shadow,
            Shape::Line {
                from: center,
                to: tip,
                color: FLOWER_WHITE.to_string(),
                width: 2.0,
                cap: LineCap::Butt,
            },
        ));
    }
    marks
}

fn sparkle_stamp(
    center: Point,
    size: f64,
    count: usize,
    particle: f64,
    jitter: &mut dyn Jitter,
) -> Vec<Mark> {
    let mut marks = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let at = Point {
            x: center.x + (jitter.sample() - 0.5) * size * 1.5,
            y: center.y + (jitter.sample() - 0.5) * size * 1.5,
        };
        let sparkle = size * particle + jitter.sample() * size * particle;
        let rotation = jitter.sample() * PI;
        let alpha = 0.3 + jitter.sample() * 0.2;
        marks.push(Mark::plain(
            alpha,
            Shape::Sparkle {
                center: at,
                size: sparkle,
                rotation,
            },
        ));
        marks.push(Mark::plain(
            0.4,
            Shape::Cross {
                center: at,
                half: sparkle,
                rotation,
                color: GLINT,
                width: 0.5,
            },
        ));
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f64>, usize);

    impl Jitter for Fixed {
        fn sample(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    fn settings(kind: BrushKind) -> BrushSettings {
        BrushSettings {
            kind,
            ..BrushSettings::default()
        }
    }

    const A: Point = Point { x: 10.0, y: 10.0 };
    const B: Point = Point { x: 20.0, y: 30.0 };

    #[test]
    fn defaults_match_toolbar() {
        let settings = BrushSettings::default();
        assert_eq!(settings.color, "#ff0000");
        assert_eq!(settings.width, 2.0);
        assert_eq!(settings.texture_size, 8.0);
    }

    #[test]
    fn solid_joins_previous_sample() {
        let marks = brush_marks(&settings(BrushKind::Solid), A, B, &mut Fixed(vec![0.5], 0));
        assert_eq!(marks.len(), 1);
        match &marks[0].shape {
            Shape::Line { from, to, cap, .. } => {
                assert_eq!((*from, *to, *cap), (A, B, LineCap::Round));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn eraser_cuts_at_eight_times_width() {
        let mut wide = settings(BrushKind::Lace);
        wide.width = 4.0;
        let marks = eraser_marks(&wide, A, B);
        assert_eq!(marks[0].composite, Composite::DestinationOut);
        assert!(matches!(marks[0].shape, Shape::Line { width, .. } if width == 32.0));
    }

    #[test]
    fn lace_stamps_square_ring_cross_and_four_dots_at_current_point() {
        let marks = brush_marks(&settings(BrushKind::Lace), A, B, &mut Fixed(vec![0.5], 0));
        assert_eq!(marks.len(), 7);
        assert!(marks.iter().all(|mark| mark.alpha == 0.3));
        assert!(marks[0].shadow.is_none());
        assert!(matches!(marks[0].shape, Shape::Square { center, size, .. } if center == B && size == 8.0));
        let dots = marks
            .iter()
            .filter(|mark| matches!(mark.shape, Shape::Dot { .. }))
            .count();
        assert_eq!(dots, 4);
    }

    #[test]
    fn flower_has_center_and_five_petals_with_spokes() {
        let marks = brush_marks(&settings(BrushKind::LaceFlower), A, B, &mut Fixed(vec![0.5], 0));
        let petals: Vec<f64> = marks
            .iter()
            .filter_map(|mark| match mark.shape {
                Shape::Petal { rotation, .. } => Some(rotation),
                _ => None,
            })
            .collect();
        assert_eq!(marks.len(), 11);
        assert_eq!(petals.len(), 5);
        assert!((petals[1] - 72f64.to_radians()).abs() < 1e-9);
        assert!(marks.iter().all(|mark| mark.alpha == 0.2));
    }

    #[test]
    fn silver_strength_sets_count_and_particle_size() {
        let weak = brush_marks(&settings(BrushKind::SilverWeak), A, B, &mut Fixed(vec![0.0], 0));
        let strong = brush_marks(&settings(BrushKind::SilverStrong), A, B, &mut Fixed(vec![0.0], 0));
        assert_eq!(weak.len(), 8);
        assert_eq!(strong.len(), 10);
        let size = |marks: &[Mark]| match marks[0].shape {
            Shape::Sparkle { size, .. } => size,
            _ => f64::NAN,
        };
        assert!((size(&weak) - 2.4).abs() < 1e-9);
        assert!((size(&strong) - 4.0).abs() < 1e-9);
        assert_eq!(weak[0].alpha, 0.3);
        assert_eq!(weak[1].alpha, 0.4);
    }

    #[test]
    fn sparkles_scatter_around_current_point() {
        let marks = brush_marks(&settings(BrushKind::SilverWeak), A, B, &mut Fixed(vec![1.0, 0.0], 0));
        match marks[0].shape {
            Shape::Sparkle { center, .. } => {
                assert_eq!(center, Point { x: 26.0, y: 24.0 });
            }
            _ => panic!("expected sparkle"),
        }
    }

    #[test]
    fn brush_keys_round_trip() {
        for kind in [BrushKind::Solid].into_iter().chain(BrushKind::TEXTURES) {
            assert_eq!(BrushKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(BrushKind::from_key("glitter"), None);
    }
}
