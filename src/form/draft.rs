use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fields::FieldValues;

/// The subset of form state worth surviving a restart: identity, field
/// values, and the expanded/collapsed flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    pub user_id: Option<String>,
    pub fields_info: FieldValues,
    pub should_show_more_details: bool,
}

/// Storage key for one persistence scope.
pub fn draft_key(scope: &str) -> String {
    format!("user-edit-form-{scope}")
}

/// Durable draft storage. Failures never propagate: an unreadable or
/// corrupt draft reads as absent, and a failed write degrades the session
/// to in-memory operation.
pub trait DraftStore {
    fn load(&self, key: &str) -> Option<DraftPayload>;
    fn save(&self, key: &str, payload: &DraftPayload);
}

/// One JSON file per key under a caller-supplied directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let _ = fs::create_dir_all(&dir);
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> Option<DraftPayload> {
        let text = fs::read_to_string(self.path(key)).ok()?;
        serde_json::from_str(&text).ok()
    }

    fn save(&self, key: &str, payload: &DraftPayload) {
        if let Ok(text) = serde_json::to_string_pretty(payload) {
            let _ = fs::write(self.path(key), text);
        }
    }
}

/// In-memory store for tests and for sessions without a usable directory.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: RefCell<HashMap<String, DraftPayload>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(self, key: &str, payload: DraftPayload) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), payload);
        self
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, key: &str) -> Option<DraftPayload> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, payload: &DraftPayload) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.clone());
    }
}
