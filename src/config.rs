use crate::encoding::TextEncoding;
use std::path::{Path, PathBuf};

/// File name StackEdit gives its workspace export
pub const DEFAULT_INPUT_NAME: &str = "StackEdit workspace.json";

/// Directory created next to the input when no output is given
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "StackEdit";

/// Everything one export run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Workspace dump to read
    pub input: PathBuf,
    /// Base directory of the Markdown tree
    pub output_dir: PathBuf,
    /// Used for both the dump and the written files
    pub encoding: TextEncoding,
    /// Strip `>*|<"?:` from destination paths
    pub remove_illegal_chars: bool,
    /// Overwrite existing files instead of aborting
    pub update: bool,
}

/// Builder for [`ExportConfig`] with the defaults of a plain run
pub struct ExportConfigBuilder {
    input: PathBuf,
    output_dir: Option<PathBuf>,
    encoding: TextEncoding,
    remove_illegal_chars: bool,
    update: bool,
}

impl ExportConfig {
    /// Start a config for `input`, which may be the dump itself or the
    /// directory holding `StackEdit workspace.json`
    pub fn builder(input: impl Into<PathBuf>) -> ExportConfigBuilder {
        ExportConfigBuilder {
            input: input.into(),
            output_dir: None,
            encoding: TextEncoding::default(),
            remove_illegal_chars: cfg!(windows),
            update: false,
        }
    }
}

impl ExportConfigBuilder {
    /// Set the output base directory (default: `<input dir>/StackEdit`)
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Toggle illegal-character removal (default: on for Windows hosts)
    pub fn remove_illegal_chars(mut self, enabled: bool) -> Self {
        self.remove_illegal_chars = enabled;
        self
    }

    pub fn update(mut self, enabled: bool) -> Self {
        self.update = enabled;
        self
    }

    pub fn build(self) -> ExportConfig {
        let input = if self.input.is_dir() {
            self.input.join(DEFAULT_INPUT_NAME)
        } else {
            self.input
        };

        let output_dir = self
            .output_dir
            .unwrap_or_else(|| default_output_dir(&input));

        ExportConfig {
            input,
            output_dir,
            encoding: self.encoding,
            remove_illegal_chars: self.remove_illegal_chars,
            update: self.update,
        }
    }
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_OUTPUT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::builder("dumps/workspace.json").build();

        assert_eq!(config.input, PathBuf::from("dumps/workspace.json"));
        assert_eq!(config.output_dir, PathBuf::from("dumps/StackEdit"));
        assert_eq!(config.encoding, TextEncoding::utf8());
        assert_eq!(config.remove_illegal_chars, cfg!(windows));
        assert!(!config.update);
    }

    #[test]
    fn test_bare_file_name_outputs_next_to_it() {
        let config = ExportConfig::builder("workspace.json").build();
        assert_eq!(config.output_dir, PathBuf::from("StackEdit"));
    }

    #[test]
    fn test_directory_input_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::builder(dir.path()).build();

        assert_eq!(config.input, dir.path().join(DEFAULT_INPUT_NAME));
        assert_eq!(config.output_dir, dir.path().join(DEFAULT_OUTPUT_DIR_NAME));
    }

    #[test]
    fn test_overrides() {
        let config = ExportConfig::builder("in.json")
            .output_dir("/srv/notes")
            .encoding(TextEncoding::utf8_sig())
            .remove_illegal_chars(true)
            .update(true)
            .build();

        assert_eq!(config.output_dir, PathBuf::from("/srv/notes"));
        assert_eq!(config.encoding, TextEncoding::utf8_sig());
        assert!(config.remove_illegal_chars);
        assert!(config.update);
    }
}
