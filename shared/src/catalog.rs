use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{
    dress_id, Detail, Dress, PriceTier, Score, ScoreCategory, Shop, ShopDraft,
    BLANK_DRESSES_PER_SHOP,
};

/// The ordered list of shops. Edits never mutate in place; `apply` returns the next catalog.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    shops: Vec<Shop>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShopPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DressChange {
    Name(String),
    PriceRange(Option<PriceTier>),
    Memo(String),
    Detail(Detail),
    Score(ScoreCategory, Score),
    Sketch(Option<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    AddShop {
        id: String,
        draft: ShopDraft,
    },
    UpdateShop {
        shop_id: String,
        patch: ShopPatch,
    },
    DeleteShop {
        shop_id: String,
    },
    AddDress {
        shop_id: String,
    },
    UpdateDress {
        shop_id: String,
        dress_id: String,
        change: DressChange,
    },
    DeleteDress {
        shop_id: String,
        dress_id: String,
    },
}

impl Catalog {
    pub fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    /// The two shops offered on first launch.
    pub fn seed() -> Self {
        let shop = |id: &str, name: &str, description: &str, color: &str, emoji: &str| Shop {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            emoji: emoji.to_string(),
            dresses: blank_dresses(id),
        };
        Self {
            shops: vec![
                shop(
                    "meraki",
                    "메라키",
                    "독특한 디자인 드레스, 디자이너 있음, 신상샵이라 저렴한 편",
                    "#3b82f6",
                    "🎨",
                ),
                shop(
                    "edeline",
                    "에델린",
                    "신상샵, 비즈 드레스 유명한 곳",
                    "#ef4444",
                    "✨",
                ),
            ],
        }
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    pub fn shop(&self, shop_id: &str) -> Option<&Shop> {
        self.shops.iter().find(|shop| shop.id == shop_id)
    }

    pub fn dress(&self, shop_id: &str, dress_id: &str) -> Option<&Dress> {
        self.shop(shop_id)?
            .dresses
            .iter()
            .find(|dress| dress.id == dress_id)
    }

    pub fn dress_count(&self) -> usize {
        self.shops.iter().map(|shop| shop.dresses.len()).sum()
    }

    pub fn apply(&self, edit: Edit) -> Result<Catalog, CatalogError> {
        match edit {
            Edit::AddShop { id, draft } => {
                let name = draft.name.trim();
                if name.is_empty() {
                    return Err(CatalogError::BlankShopName);
                }
                if self.shop(&id).is_some() {
                    return Err(CatalogError::DuplicateShop(id));
                }
                let mut shops = self.shops.clone();
                shops.push(Shop {
                    dresses: blank_dresses(&id),
                    id,
                    name: name.to_string(),
                    description: draft.description,
                    color: draft.color,
                    emoji: draft.emoji,
                });
                Ok(Catalog { shops })
            }
            Edit::UpdateShop { shop_id, patch } => self.map_shop(&shop_id, |shop| {
                let ShopPatch {
                    name,
                    description,
                    color,
                    emoji,
                } = patch;
                let name = match name {
                    Some(name) if name.trim().is_empty() => {
                        return Err(CatalogError::BlankShopName)
                    }
                    Some(name) => name.trim().to_string(),
                    None => shop.name.clone(),
                };
                Ok(Shop {
                    name,
                    description: description.unwrap_or_else(|| shop.description.clone()),
                    color: color.unwrap_or_else(|| shop.color.clone()),
                    emoji: emoji.unwrap_or_else(|| shop.emoji.clone()),
                    ..shop.clone()
                })
            }),
            Edit::DeleteShop { shop_id } => {
                self.require_shop(&shop_id)?;
                Ok(Catalog {
                    shops: self
                        .shops
                        .iter()
                        .filter(|shop| shop.id != shop_id)
                        .cloned()
                        .collect(),
                })
            }
            Edit::AddDress { shop_id } => self.map_shop(&shop_id, |shop| {
                let mut dresses = shop.dresses.clone();
                let id = next_free_dress_id(shop);
                dresses.push(Dress::blank(id, shop.dresses.len() + 1));
                Ok(Shop {
                    dresses,
                    ..shop.clone()
                })
            }),
            Edit::UpdateDress {
                shop_id,
                dress_id,
                change,
            } => self.map_shop(&shop_id, |shop| {
                let index = shop
                    .dresses
                    .iter()
                    .position(|dress| dress.id == dress_id)
                    .ok_or_else(|| CatalogError::UnknownDress {
                        shop_id: shop.id.clone(),
                        dress_id: dress_id.clone(),
                    })?;
                let mut dresses = shop.dresses.clone();
                dresses[index] = apply_dress_change(&shop.dresses[index], change);
                Ok(Shop {
                    dresses,
                    ..shop.clone()
                })
            }),
            Edit::DeleteDress { shop_id, dress_id } => self.map_shop(&shop_id, |shop| {
                if !shop.dresses.iter().any(|dress| dress.id == dress_id) {
                    return Err(CatalogError::UnknownDress {
                        shop_id: shop.id.clone(),
                        dress_id: dress_id.clone(),
                    });
                }
                Ok(Shop {
                    dresses: shop
                        .dresses
                        .iter()
                        .filter(|dress| dress.id != dress_id)
                        .cloned()
                        .collect(),
                    ..shop.clone()
                })
            }),
        }
    }

    fn require_shop(&self, shop_id: &str) -> Result<&Shop, CatalogError> {
        self.shop(shop_id)
            .ok_or_else(|| CatalogError::UnknownShop(shop_id.to_string()))
    }

    fn map_shop<F>(&self, shop_id: &str, update: F) -> Result<Catalog, CatalogError>
    where
        F: FnOnce(&Shop) -> Result<Shop, CatalogError>,
    {
        let index = self
            .shops
            .iter()
            .position(|shop| shop.id == shop_id)
            .ok_or_else(|| CatalogError::UnknownShop(shop_id.to_string()))?;
        let mut shops = self.shops.clone();
        shops[index] = update(&self.shops[index])?;
        Ok(Catalog { shops })
    }
}

fn blank_dresses(shop_id: &str) -> Vec<Dress> {
    (1..=BLANK_DRESSES_PER_SHOP)
        .map(|number| Dress::blank(dress_id(shop_id, number), number))
        .collect()
}

fn next_free_dress_id(shop: &Shop) -> String {
    (shop.dresses.len() + 1..)
        .map(|number| dress_id(&shop.id, number))
        .find(|id| !shop.dresses.iter().any(|dress| &dress.id == id))
        .unwrap_or_else(|| dress_id(&shop.id, shop.dresses.len() + 1))
}

fn apply_dress_change(dress: &Dress, change: DressChange) -> Dress {
    let mut next = dress.clone();
    match change {
        DressChange::Name(name) => next.name = name,
        DressChange::PriceRange(tier) => next.price_range = tier,
        DressChange::Memo(memo) => next.memo = memo,
        DressChange::Detail(detail) => next.details = dress.details.with(detail),
        DressChange::Score(category, score) => next.scores = dress.scores.with(category, score),
        DressChange::Sketch(data) => next.sketch_data = data,
    }
    next
}
