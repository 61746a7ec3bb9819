use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlIFrameElement, Storage};

use dresstour_shared::error::StoreError;
use dresstour_shared::storage::CatalogStore;

/// `window.localStorage` behind the catalog store port.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl CatalogStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(describe(err)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write(describe(err)))
    }
}

/// Prints `html` through a hidden iframe, which is removed once printing returns.
/// The caller is told about setup failures; the frame never outlives them.
pub fn open_print_window(document: &Document, html: &str) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing document body"))?;
    let iframe = document
        .create_element("iframe")?
        .dyn_into::<HtmlIFrameElement>()
        .map_err(|_| JsValue::from_str("Invalid iframe element"))?;
    iframe.set_attribute(
        "style",
        "position:fixed;right:0;bottom:0;width:0;height:0;border:0;",
    )?;
    iframe.set_srcdoc(html);
    body.append_child(&iframe)?;

    let iframe_for_load = iframe.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        let printed = iframe_for_load
            .content_window()
            .ok_or_else(|| JsValue::from_str("Missing print window"))
            .and_then(|window| {
                window.focus()?;
                window.print()
            });
        iframe_for_load.remove();
        if let Err(err) = printed {
            log::error!("report printing failed: {err:?}");
            crate::dom::alert(crate::app::REPORT_FAILED);
        }
    });
    iframe.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    Ok(())
}
