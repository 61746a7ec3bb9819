use std::collections::HashSet;

use dresstour_shared::{Catalog, ShopDraft};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tab {
    Manage,
    Shop(String),
    Summary,
}

impl Tab {
    pub fn key(&self) -> &str {
        match self {
            Tab::Manage => "manage",
            Tab::Summary => "summary",
            Tab::Shop(id) => id,
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "manage" => Tab::Manage,
            "summary" => Tab::Summary,
            id => Tab::Shop(id.to_string()),
        }
    }
}

/// Addresses one dress of one shop.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DressRef {
    pub shop_id: String,
    pub dress_id: String,
}

impl DressRef {
    pub fn new(shop_id: &str, dress_id: &str) -> Self {
        Self {
            shop_id: shop_id.to_string(),
            dress_id: dress_id.to_string(),
        }
    }
}

pub struct State {
    pub catalog: Catalog,
    pub unlocked: bool,
    pub gate_error: Option<String>,
    pub tab: Tab,
    pub adding_shop: bool,
    pub draft: ShopDraft,
    pub draft_error: Option<String>,
    pub editing_shop: Option<String>,
    pub expanded: HashSet<DressRef>,
    pub confirm_delete: Option<DressRef>,
}

impl State {
    /// A restored catalog opens on its first shop; a fresh one on the manage tab.
    pub fn new(catalog: Catalog, restored: bool) -> Self {
        let tab = match catalog.shops().first() {
            Some(shop) if restored => Tab::Shop(shop.id.clone()),
            _ => Tab::Manage,
        };
        Self {
            catalog,
            unlocked: false,
            gate_error: None,
            tab,
            adding_shop: false,
            draft: ShopDraft::default(),
            draft_error: None,
            editing_shop: None,
            expanded: HashSet::new(),
            confirm_delete: None,
        }
    }

    pub fn is_expanded(&self, target: &DressRef) -> bool {
        self.expanded.contains(target)
    }

    /// Installs the next catalog and drops view state pointing at removed shops or dresses.
    pub fn commit(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        if let Tab::Shop(id) = &self.tab {
            if self.catalog.shop(id).is_none() {
                self.tab = match self.catalog.shops().first() {
                    Some(shop) => Tab::Shop(shop.id.clone()),
                    None => Tab::Manage,
                };
            }
        }
        if let Some(id) = &self.editing_shop {
            if self.catalog.shop(id).is_none() {
                self.editing_shop = None;
            }
        }
        let catalog = &self.catalog;
        self.expanded
            .retain(|target| catalog.dress(&target.shop_id, &target.dress_id).is_some());
        if let Some(target) = &self.confirm_delete {
            if catalog.dress(&target.shop_id, &target.dress_id).is_none() {
                self.confirm_delete = None;
            }
        }
    }

    pub fn reset_draft(&mut self) {
        self.adding_shop = false;
        self.draft = ShopDraft::default();
        self.draft_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dresstour_shared::Edit;

    #[test]
    fn restored_catalog_opens_first_shop() {
        let state = State::new(Catalog::seed(), true);
        assert_eq!(state.tab, Tab::Shop("meraki".into()));
        let fresh = State::new(Catalog::seed(), false);
        assert_eq!(fresh.tab, Tab::Manage);
        assert!(!fresh.unlocked);
    }

    #[test]
    fn deleting_active_shop_moves_to_remaining_shop() {
        let mut state = State::new(Catalog::seed(), true);
        let next = state
            .catalog
            .apply(Edit::DeleteShop {
                shop_id: "meraki".into(),
            })
            .unwrap();
        state.commit(next);
        assert_eq!(state.tab, Tab::Shop("edeline".into()));

        let last = state
            .catalog
            .apply(Edit::DeleteShop {
                shop_id: "edeline".into(),
            })
            .unwrap();
        state.commit(last);
        assert_eq!(state.tab, Tab::Manage);
    }

    #[test]
    fn commit_forgets_removed_dresses() {
        let mut state = State::new(Catalog::seed(), true);
        let target = DressRef::new("meraki", "meraki_dress2");
        state.expanded.insert(target.clone());
        state.confirm_delete = Some(target.clone());
        let next = state
            .catalog
            .apply(Edit::DeleteDress {
                shop_id: target.shop_id.clone(),
                dress_id: target.dress_id.clone(),
            })
            .unwrap();
        state.commit(next);
        assert!(!state.is_expanded(&target));
        assert_eq!(state.confirm_delete, None);
    }

    #[test]
    fn tab_keys_round_trip() {
        for tab in [Tab::Manage, Tab::Summary, Tab::Shop("shop_1".into())] {
            assert_eq!(Tab::from_key(tab.key()), tab);
        }
    }
}
