use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Cyclic folder structure: {}", .0.join(" -> "))]
    CyclicStructure(Vec<String>),

    #[error("{} already exists{}", first_conflict(.paths), more_conflicts(.paths.len()))]
    DestinationExists { paths: Vec<PathBuf> },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Content of {} cannot be encoded as {encoding}", .path.display())]
    Encoding { path: PathBuf, encoding: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

fn first_conflict(paths: &[PathBuf]) -> String {
    paths
        .first()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "Destination".to_string())
}

fn more_conflicts(count: usize) -> String {
    match count {
        0 | 1 => String::new(),
        n => format!(" (and {} more conflicting files)", n - 1),
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
