use std::cell::RefCell;

use crate::catalog::Catalog;
use crate::error::StoreError;

pub const STORAGE_KEY: &str = "shops";

/// Key-value backend that holds the serialized catalog.
pub trait CatalogStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub fn encode_catalog(catalog: &Catalog) -> Result<String, StoreError> {
    Ok(serde_json::to_string(catalog)?)
}

pub fn decode_catalog(payload: &str) -> Result<Catalog, StoreError> {
    Ok(serde_json::from_str(payload)?)
}

/// Where the startup catalog came from.
#[derive(Debug)]
pub enum Loaded {
    Stored(Catalog),
    Seeded,
    Recovered(StoreError),
}

impl Loaded {
    pub fn into_catalog(self) -> Catalog {
        match self {
            Loaded::Stored(catalog) => catalog,
            Loaded::Seeded | Loaded::Recovered(_) => Catalog::seed(),
        }
    }
}

/// Reads the stored catalog, falling back to the seed shops when nothing
/// usable is stored.
pub fn load_catalog(store: &dyn CatalogStore) -> Loaded {
    match store.read(STORAGE_KEY) {
        Ok(Some(payload)) => match decode_catalog(&payload) {
            Ok(catalog) if !catalog.is_empty() => Loaded::Stored(catalog),
            Ok(_) => Loaded::Seeded,
            Err(error) => Loaded::Recovered(error),
        },
        Ok(None) => Loaded::Seeded,
        Err(error) => Loaded::Recovered(error),
    }
}

/// Writes the catalog. Returns `Ok(false)` when there was nothing to write.
pub fn save_catalog(store: &dyn CatalogStore, catalog: &Catalog) -> Result<bool, StoreError> {
    if catalog.is_empty() {
        return Ok(false);
    }
    store.write(STORAGE_KEY, &encode_catalog(catalog)?)?;
    Ok(true)
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<(String, String)>>,
    failing: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        store
    }
}

impl CatalogStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        Ok(self
            .entries
            .borrow()
            .iter()
            .find(|(stored, _)| stored == key)
            .map(|(_, value)| value.clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Write("memory store disabled".into()));
        }
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(stored, _)| stored == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DressChange, Edit};
    use crate::model::{Score, ScoreCategory};

    #[test]
    fn empty_store_loads_seed() {
        let loaded = load_catalog(&MemoryStore::default());
        assert!(matches!(loaded, Loaded::Seeded));
        assert_eq!(loaded.into_catalog(), Catalog::seed());
    }

    #[test]
    fn stored_catalog_survives_a_round_trip() {
        let store = MemoryStore::default();
        let catalog = Catalog::seed()
            .apply(Edit::UpdateDress {
                shop_id: "edeline".into(),
                dress_id: "edeline_dress3".into(),
                change: DressChange::Score(ScoreCategory::Comfort, Score::new(3).unwrap()),
            })
            .unwrap();
        assert!(save_catalog(&store, &catalog).unwrap());
        match load_catalog(&store) {
            Loaded::Stored(loaded) => assert_eq!(loaded, catalog),
            other => panic!("unexpected load result {other:?}"),
        }
    }

    #[test]
    fn empty_catalog_is_not_written() {
        let store = MemoryStore::default();
        assert!(!save_catalog(&store, &Catalog::default()).unwrap());
        assert_eq!(store.read(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn malformed_payload_recovers_with_seed() {
        let store = MemoryStore::with_entry(STORAGE_KEY, r#"[{"id":"x"}]"#);
        let loaded = load_catalog(&store);
        assert!(matches!(loaded, Loaded::Recovered(StoreError::Malformed(_))));
        assert_eq!(loaded.into_catalog().shops().len(), 2);
    }

    #[test]
    fn unknown_score_key_is_rejected_on_load() {
        let payload = r##"[{"id":"a","name":"A","color":"#fff","emoji":"🏢","dresses":[{"id":"a_dress1","name":"드레스 1","scores":{"sparkle":5}}]}]"##;
        assert!(decode_catalog(payload).is_err());
    }

    #[test]
    fn stored_document_uses_camel_case_field_names() {
        let json = encode_catalog(&Catalog::seed()).unwrap();
        assert!(json.starts_with(r#"[{"id":"meraki","name":"메라키""#));
        assert!(json.contains(r#""memo":"""#));
        assert!(!json.contains("sketchData"));
    }

    #[test]
    fn failing_store_reports_errors() {
        let store = MemoryStore::failing();
        assert!(matches!(load_catalog(&store), Loaded::Recovered(_)));
        assert!(save_catalog(&store, &Catalog::seed()).is_err());
    }
}
