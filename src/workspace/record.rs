/// Sentinel `parentId` for records sitting in the trash
pub const TRASH_ID: &str = "trash";

/// Suffix appended to a file id to find its content entry
pub const CONTENT_SUFFIX: &str = "/content";

/// A file or folder node from the workspace dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Opaque key from the dump
    pub id: String,
    pub kind: RecordKind,
    /// Own path segment
    pub name: String,
    pub parent: ParentRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    File,
    Folder,
}

/// Where a record hangs in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParentRef {
    /// Empty, null or missing `parentId`
    Root,
    /// The `"trash"` sentinel
    Trash,
    /// Another record's id
    Record(String),
}

impl RecordKind {
    /// Map a JSON `type` to a node kind; anything else is not a node
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "file" => Some(RecordKind::File),
            "folder" => Some(RecordKind::Folder),
            _ => None,
        }
    }
}

impl ParentRef {
    pub fn from_parent_id(parent_id: Option<&str>) -> Self {
        match parent_id {
            None | Some("") => ParentRef::Root,
            Some(TRASH_ID) => ParentRef::Trash,
            Some(id) => ParentRef::Record(id.to_string()),
        }
    }
}

impl Record {
    pub fn is_file(&self) -> bool {
        self.kind == RecordKind::File
    }

    /// Key of the entry holding this record's text
    pub fn content_id(&self) -> String {
        content_id(&self.id)
    }
}

pub fn content_id(id: &str) -> String {
    format!("{}{}", id, CONTENT_SUFFIX)
}
