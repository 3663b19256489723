//! `localStorage`-backed preference store.
use clearview_core::PreferenceStore;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum BrowserStoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<JsValue> for BrowserStoreError {
    fn from(value: JsValue) -> Self {
        Self::Storage(dom::js_error_message(&value))
    }
}

/// Web-specific preference storage using localStorage.
/// The handle is looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl PreferenceStore for BrowserStore {
    type Error = BrowserStoreError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(dom::local_storage()?.get_item(key)?)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        Ok(dom::local_storage()?.set_item(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        Ok(dom::local_storage()?.remove_item(key)?)
    }
}
