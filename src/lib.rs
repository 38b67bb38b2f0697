// Public API exports
pub mod config;
pub mod encoding;
pub mod error;
pub mod export;
pub mod materializer;
pub mod resolver;
pub mod security;
pub mod workspace;

// Re-export main types for convenience
pub use config::{ExportConfig, ExportConfigBuilder, DEFAULT_INPUT_NAME, DEFAULT_OUTPUT_DIR_NAME};
pub use encoding::TextEncoding;
pub use error::{ExportError, Result};
pub use export::{run, ExportSummary};

pub use workspace::{ParentRef, Record, RecordKind, Workspace};

pub use resolver::{
    resolve, resolve_mapping, PathMapping, PathResolver, RelativePath, MARKDOWN_EXTENSION,
    TRASH_DIR,
};

pub use security::{IllegalCharFilter, NameGuard, ILLEGAL_CHARS};

pub use materializer::{ensure_dir, MaterializeReport, Materializer};
