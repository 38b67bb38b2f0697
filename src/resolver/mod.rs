mod relative;


pub use relative::{PathMapping, RelativePath, MARKDOWN_EXTENSION, TRASH_DIR};

use crate::error::{ExportError, Result};
use crate::security::NameGuard;
use crate::workspace::{ParentRef, Record, Workspace};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Resolves file records to paths with a single top-down walk over the
/// parent → children index built from the flat workspace.
pub struct PathResolver<'a> {
    workspace: &'a Workspace,
    roots: Vec<&'a Record>,
    trash: Vec<&'a Record>,
    children: HashMap<&'a str, Vec<&'a Record>>,
}

impl<'a> PathResolver<'a> {
    /// Group every record under its parent
    pub fn new(workspace: &'a Workspace) -> Self {
        let mut roots = Vec::new();
        let mut trash = Vec::new();
        let mut children: HashMap<&'a str, Vec<&'a Record>> = HashMap::new();

        for record in workspace.records() {
            match &record.parent {
                ParentRef::Root => roots.push(record),
                ParentRef::Trash => trash.push(record),
                ParentRef::Record(parent_id) => {
                    children.entry(parent_id.as_str()).or_default().push(record)
                }
            }
        }

        Self {
            workspace,
            roots,
            trash,
            children,
        }
    }

    /// Resolve every file record, keyed by id.
    ///
    /// Files not reachable from the root or the trash are diagnosed one by
    /// one: a dangling `parentId` is malformed input, anything else is a cycle.
    pub fn resolve_files(&self) -> Result<BTreeMap<String, RelativePath>> {
        let mut resolved = BTreeMap::new();

        // (record, ancestors from the top, under trash)
        let mut stack: Vec<(&'a Record, Vec<&'a Record>, bool)> = Vec::new();
        stack.extend(self.roots.iter().map(|r| (*r, Vec::new(), false)));
        stack.extend(self.trash.iter().map(|r| (*r, Vec::new(), true)));

        while let Some((record, mut chain, trashed)) = stack.pop() {
            chain.push(record);

            if record.is_file() {
                let path = build_path(&chain, trashed)?;
                debug!(id = %record.id, path = %path, "resolved file");
                resolved.insert(record.id.clone(), path);
            }

            if let Some(children) = self.children.get(record.id.as_str()) {
                for child in children {
                    stack.push((*child, chain.clone(), trashed));
                }
            }
        }

        for file in self.workspace.files() {
            if !resolved.contains_key(&file.id) {
                let path = resolve(self.workspace, &file.id)?;
                resolved.insert(file.id.clone(), path);
            }
        }

        Ok(resolved)
    }
}

/// Resolve a single record by walking its parents up to the root.
///
/// Root records resolve to their name, trashed records to `.trash/name`,
/// everything else to the parent's path followed by the name.
pub fn resolve(workspace: &Workspace, id: &str) -> Result<RelativePath> {
    let mut current = workspace
        .get(id)
        .ok_or_else(|| ExportError::MalformedInput(format!("unknown record {:?}", id)))?;

    // leaf first
    let mut chain: Vec<&Record> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    let trashed = loop {
        if !seen.insert(current.id.as_str()) {
            return Err(cycle_error(&chain, &current.id));
        }
        chain.push(current);

        match &current.parent {
            ParentRef::Root => break false,
            ParentRef::Trash => break true,
            ParentRef::Record(parent_id) => {
                let parent = workspace.get(parent_id).ok_or_else(|| {
                    ExportError::MalformedInput(format!(
                        "record {:?} references missing parent {:?}",
                        current.id, parent_id
                    ))
                })?;
                current = parent;
            }
        }
    };

    chain.reverse();
    build_path(&chain, trashed)
}

/// Resolve all files and place them under `base`
pub fn resolve_mapping(workspace: &Workspace, base: &Path) -> Result<PathMapping> {
    let relative = PathResolver::new(workspace).resolve_files()?;
    Ok(PathMapping::from_relative(&relative, base))
}

/// Turn a top-down ancestor chain into path segments
fn build_path(chain: &[&Record], trashed: bool) -> Result<RelativePath> {
    let mut segments = Vec::with_capacity(chain.len() + 1);
    if trashed {
        segments.push(TRASH_DIR.to_string());
    }
    for record in chain {
        for segment in NameGuard::segments(&record.id, &record.name)? {
            segments.push(segment.to_string());
        }
    }
    Ok(RelativePath::new(segments, trashed))
}

fn cycle_error(chain: &[&Record], repeated: &str) -> ExportError {
    let start = chain.iter().position(|r| r.id == repeated).unwrap_or(0);
    let mut ids: Vec<String> = chain[start..].iter().map(|r| r.id.clone()).collect();
    ids.push(repeated.to_string());
    ExportError::CyclicStructure(ids)
}
