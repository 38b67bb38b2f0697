mod record;

#[cfg(test)]
mod tests;

pub use record::{content_id, ParentRef, Record, RecordKind, CONTENT_SUFFIX, TRASH_ID};

use crate::encoding::TextEncoding;
use crate::error::{ExportError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// One value of the top-level id → entry object
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    #[serde(rename = "parentId")]
    parent_id: Option<String>,
    text: Option<String>,
}

/// Immutable view of a StackEdit workspace dump: file/folder nodes plus the
/// text bodies of content entries.
#[derive(Debug, Default)]
pub struct Workspace {
    records: BTreeMap<String, Record>,
    contents: BTreeMap<String, String>,
}

impl Workspace {
    /// Read, decode and parse the dump at `path`
    pub fn load(path: &Path, encoding: &TextEncoding) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExportError::InputNotFound(path.to_path_buf()),
            _ => ExportError::io(path, e),
        })?;

        let text = encoding.decode(&bytes, path)?;
        let workspace = Self::from_json_str(&text).map_err(|e| match e {
            ExportError::MalformedInput(msg) => {
                ExportError::MalformedInput(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        debug!(
            path = %path.display(),
            records = workspace.len(),
            files = workspace.file_count(),
            "loaded workspace"
        );
        Ok(workspace)
    }

    /// Parse a workspace from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, RawEntry> = serde_json::from_str(json)
            .map_err(|e| ExportError::MalformedInput(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Parse a workspace from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let entries: BTreeMap<String, RawEntry> = serde_json::from_value(value)
            .map_err(|e| ExportError::MalformedInput(e.to_string()))?;
        Self::from_entries(entries)
    }

    fn from_entries(entries: BTreeMap<String, RawEntry>) -> Result<Self> {
        let mut workspace = Workspace::default();

        for (id, entry) in entries {
            if let Some(kind) = entry.kind.as_deref().and_then(RecordKind::from_type) {
                let name = entry.name.ok_or_else(|| {
                    ExportError::MalformedInput(format!("record {:?} has no name", id))
                })?;
                let parent = ParentRef::from_parent_id(entry.parent_id.as_deref());
                workspace.records.insert(
                    id.clone(),
                    Record {
                        id,
                        kind,
                        name,
                        parent,
                    },
                );
            } else if let Some(text) = entry.text {
                if id.ends_with(CONTENT_SUFFIX) {
                    workspace.contents.insert(id, text);
                }
            }
        }

        Ok(workspace)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// All nodes in id order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// File nodes in id order
    pub fn files(&self) -> impl Iterator<Item = &Record> {
        self.records.values().filter(|r| r.is_file())
    }

    /// Text of the `<id>/content` entry, if present
    pub fn content(&self, id: &str) -> Option<&str> {
        self.contents.get(&content_id(id)).map(String::as_str)
    }

    /// Number of file and folder nodes
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}
