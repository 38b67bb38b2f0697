
use crate::encoding::TextEncoding;
use crate::error::{ExportError, Result};
use crate::resolver::PathMapping;
use crate::workspace::{content_id, Workspace};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a successful materialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files written, including overwrites
    pub written: usize,
    /// Files that already existed and were replaced (update mode only)
    pub overwritten: usize,
    /// Parent directories that had to be created
    pub directories_created: usize,
    /// Destinations in write order
    pub paths: Vec<PathBuf>,
}

/// A write that passed planning
struct PlannedWrite<'a> {
    path: &'a Path,
    bytes: Vec<u8>,
    existed: bool,
}

/// Writes resolved files to disk behind the overwrite guard
pub struct Materializer {
    encoding: TextEncoding,
    update: bool,
}

impl Materializer {
    pub fn new(encoding: TextEncoding, update: bool) -> Self {
        Self { encoding, update }
    }

    /// Write every file in `mapping`.
    ///
    /// All content lookups, encodings and conflict checks happen before the
    /// first directory is created. Outside update mode, any destination that
    /// already exists or is claimed by two records aborts the run with every
    /// conflicting path listed.
    pub fn materialize(
        &self,
        workspace: &Workspace,
        mapping: &PathMapping,
    ) -> Result<MaterializeReport> {
        let plan = self.plan(workspace, mapping)?;
        let mut report = MaterializeReport::default();

        for write in plan {
            if let Some(dir) = write.path.parent() {
                if ensure_dir(dir)? {
                    report.directories_created += 1;
                }
            }

            fs::write(write.path, &write.bytes).map_err(|e| ExportError::io(write.path, e))?;
            debug!(path = %write.path.display(), bytes = write.bytes.len(), "wrote file");

            if write.existed {
                report.overwritten += 1;
            }
            report.written += 1;
            report.paths.push(write.path.to_path_buf());
        }

        info!(
            written = report.written,
            overwritten = report.overwritten,
            directories = report.directories_created,
            "materialized workspace"
        );
        Ok(report)
    }

    fn plan<'a>(
        &self,
        workspace: &Workspace,
        mapping: &'a PathMapping,
    ) -> Result<Vec<PlannedWrite<'a>>> {
        let mut planned = Vec::with_capacity(mapping.len());
        let mut claimed: HashSet<&Path> = HashSet::new();
        let mut conflicts = Vec::new();

        for (id, path) in mapping.iter() {
            let text = workspace.content(id).ok_or_else(|| {
                ExportError::MalformedInput(format!(
                    "file record {:?} has no {:?} entry with text",
                    id,
                    content_id(id)
                ))
            })?;
            let bytes = self.encoding.encode(text, path)?;

            let existed = path.try_exists().map_err(|e| ExportError::io(path, e))?;
            let duplicate = !claimed.insert(path);

            if !self.update && (existed || duplicate) {
                conflicts.push(path.to_path_buf());
            } else if duplicate {
                warn!(id, path = %path.display(), "several records share a destination, last one wins");
            }

            planned.push(PlannedWrite {
                path,
                bytes,
                existed,
            });
        }

        if !conflicts.is_empty() {
            return Err(ExportError::DestinationExists { paths: conflicts });
        }

        Ok(planned)
    }
}

/// Create `dir` and its ancestors if missing.
///
/// Returns whether anything was created. No handle on the directory is kept.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    Ok(true)
}
