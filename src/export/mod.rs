
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::materializer::Materializer;
use crate::resolver::{PathMapping, PathResolver};
use crate::security::IllegalCharFilter;
use crate::workspace::Workspace;
use std::path::PathBuf;
use tracing::info;

/// What a finished export did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File records found in the workspace
    pub files: usize,
    /// Of those, how many landed under `.trash`
    pub trashed: usize,
    pub written: usize,
    pub overwritten: usize,
    pub directories_created: usize,
    /// Absolute base directory of the tree
    pub output_dir: PathBuf,
}

/// Load, resolve, optionally sanitize, and materialize one workspace dump
pub fn run(config: &ExportConfig) -> Result<ExportSummary> {
    info!(
        input = %config.input.display(),
        output = %config.output_dir.display(),
        encoding = %config.encoding,
        update = config.update,
        remove_illegal_chars = config.remove_illegal_chars,
        "exporting workspace"
    );

    let workspace = Workspace::load(&config.input, &config.encoding)?;
    let output_dir = std::path::absolute(&config.output_dir)
        .map_err(|e| ExportError::io(&config.output_dir, e))?;

    let relative = PathResolver::new(&workspace).resolve_files()?;
    let trashed = relative.values().filter(|p| p.is_trashed()).count();
    info!(
        records = workspace.len(),
        files = relative.len(),
        trashed,
        "resolved paths"
    );

    let mut mapping = PathMapping::from_relative(&relative, &output_dir);
    if config.remove_illegal_chars {
        mapping = IllegalCharFilter::sanitize_mapping(&mapping)?;
    }

    let report = Materializer::new(config.encoding, config.update).materialize(&workspace, &mapping)?;

    Ok(ExportSummary {
        files: relative.len(),
        trashed,
        written: report.written,
        overwritten: report.overwritten,
        directories_created: report.directories_created,
        output_dir,
    })
}
