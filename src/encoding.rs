use crate::error::{ExportError, Result};
use encoding_rs::{Encoding, UTF_8};
use std::fmt;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding applied to both the workspace dump and the Markdown output.
///
/// Decoding always tolerates a leading byte-order mark and never keeps it in
/// the decoded text. Encoding writes a BOM only for the `utf-8-sig` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    write_bom: bool,
}

impl TextEncoding {
    /// Plain UTF-8, no BOM on write
    pub fn utf8() -> Self {
        Self {
            encoding: UTF_8,
            write_bom: false,
        }
    }

    /// UTF-8 that prefixes written files with a BOM
    pub fn utf8_sig() -> Self {
        Self {
            encoding: UTF_8,
            write_bom: true,
        }
    }

    /// Look up an encoding by label.
    ///
    /// Accepts WHATWG labels (`utf-8`, `latin1`, `windows-1252`, `shift_jis`, ...)
    /// plus `utf-8-sig`. Underscores are accepted in place of dashes.
    pub fn from_label(label: &str) -> Result<Self> {
        let trimmed = label.trim().to_ascii_lowercase();
        let dashed = trimmed.replace('_', "-");

        if matches!(dashed.as_str(), "utf-8-sig" | "utf8-sig") {
            return Ok(Self::utf8_sig());
        }

        Encoding::for_label(trimmed.as_bytes())
            .or_else(|| Encoding::for_label(dashed.as_bytes()))
            .map(|encoding| Self {
                encoding,
                write_bom: false,
            })
            .ok_or_else(|| ExportError::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn writes_bom(&self) -> bool {
        self.write_bom
    }

    /// Decode `bytes` read from `path`, consuming a BOM if one is present
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        let (text, actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            return Err(ExportError::MalformedInput(format!(
                "{} is not valid {} text",
                path.display(),
                actual.name()
            )));
        }
        Ok(text.into_owned())
    }

    /// Encode `text` destined for `path`
    pub fn encode(&self, text: &str, path: &Path) -> Result<Vec<u8>> {
        let (bytes, actual, unmappable) = self.encoding.encode(text);
        if unmappable {
            return Err(ExportError::Encoding {
                path: path.to_path_buf(),
                encoding: actual.name().to_string(),
            });
        }

        if self.write_bom && actual == UTF_8 {
            let mut out = Vec::with_capacity(UTF8_BOM.len() + bytes.len());
            out.extend_from_slice(UTF8_BOM);
            out.extend_from_slice(&bytes);
            Ok(out)
        } else {
            Ok(bytes.into_owned())
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.write_bom {
            write!(f, "{} (with BOM)", self.name())
        } else {
            f.write_str(self.name())
        }
    }
}
