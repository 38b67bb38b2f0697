use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level directory holding trashed records
pub const TRASH_DIR: &str = ".trash";

/// Extension given to every exported file
pub const MARKDOWN_EXTENSION: &str = "md";

/// Location of one file record relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePath {
    segments: Vec<String>,
    trashed: bool,
}

impl RelativePath {
    pub(crate) fn new(segments: Vec<String>, trashed: bool) -> Self {
        Self { segments, trashed }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True if the record sits under the trash pseudo-folder
    pub fn is_trashed(&self) -> bool {
        self.trashed
    }

    /// Join under `base` and append `.md` to the last segment
    pub fn to_destination(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        if let Some((last, parents)) = self.segments.split_last() {
            for segment in parents {
                path.push(segment);
            }
            path.push(format!("{}.{}", last, MARKDOWN_EXTENSION));
        }
        path
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Record id → destination file path, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    entries: BTreeMap<String, PathBuf>,
}

impl PathMapping {
    /// Build destinations for every resolved file under `base`
    pub fn from_relative(relative: &BTreeMap<String, RelativePath>, base: &Path) -> Self {
        relative
            .iter()
            .map(|(id, rel)| (id.clone(), rel.to_destination(base)))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Path> {
        self.entries.get(id).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(id, path)| (id.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every destination, keeping ids untouched. Stops at the first
    /// path `f` refuses.
    pub fn try_map_paths<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Path) -> Result<PathBuf>,
    {
        self.entries
            .iter()
            .map(|(id, path)| Ok((id.clone(), f(path)?)))
            .collect()
    }
}

impl FromIterator<(String, PathBuf)> for PathMapping {
    fn from_iter<I: IntoIterator<Item = (String, PathBuf)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
