use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("score {0} is outside 1..=5")]
    ScoreOutOfRange(u8),
    #[error("unknown detail field: {0}")]
    UnknownField(String),
    #[error("unknown option {value:?} for {field}")]
    UnknownOption { field: &'static str, value: String },
    #[error("unknown score category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("업체명을 입력해주세요.")]
    BlankShopName,
    #[error("shop {0} already exists")]
    DuplicateShop(String),
    #[error("unknown shop: {0}")]
    UnknownShop(String),
    #[error("unknown dress {dress_id} in shop {shop_id}")]
    UnknownDress { shop_id: String, dress_id: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("잘못된 비밀번호입니다.")]
    Rejected,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SketchError {
    #[error("dress silhouette is not loaded")]
    BackgroundNotReady,
    #[error("neckline image is still loading")]
    OverlayLoading,
    #[error("neckline image failed to load")]
    OverlayUnavailable,
}
