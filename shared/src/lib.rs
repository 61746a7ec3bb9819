pub mod brush;
pub mod catalog;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod model;
pub mod overlay;
pub mod report;
pub mod scoring;
pub mod sketch;
pub mod storage;

pub use catalog::{Catalog, DressChange, Edit, ShopPatch};
pub use error::{CatalogError, GateError, ModelError, SketchError, StoreError};
pub use geometry::{Point, Rect, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use model::{
    Detail, DetailField, Dress, DressDetails, NecklineStyle, PriceTier, Score, ScoreCategory,
    Scores, Shop, ShopDraft, SkirtStyle,
};
