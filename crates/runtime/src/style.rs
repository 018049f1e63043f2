//! The page's root style scope, as seen by the loader.

use sitecfg_types::StyleTable;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Receives design tokens as CSS custom properties.
pub trait StyleSink: Send + Sync {
    fn set_property(&self, name: &str, value: &str);
}

/// Writes every entry of `table` to `sink`.
pub fn apply_styles(table: &StyleTable, sink: &dyn StyleSink) {
    for (name, value) in table.iter() {
        sink.set_property(name, value);
    }
}

/// Discards everything. Used when no page is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStyleSink;

impl StyleSink for NullStyleSink {
    fn set_property(&self, _name: &str, _value: &str) {}
}

/// Keeps the last value written for each property.
#[derive(Debug, Default)]
pub struct RecordingStyleSink {
    properties: Mutex<BTreeMap<String, String>>,
}

impl RecordingStyleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.properties.lock().ok()?.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.properties.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything written so far, as a style table.
    pub fn snapshot(&self) -> StyleTable {
        self.properties
            .lock()
            .map(|p| p.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }
}

impl StyleSink for RecordingStyleSink {
    fn set_property(&self, name: &str, value: &str) {
        if let Ok(mut properties) = self.properties.lock() {
            properties.insert(name.to_string(), value.to_string());
        }
    }
}
