use crate::error::{ExportError, Result};
use crate::resolver::PathMapping;
use std::path::{Component, Path, PathBuf};

/// Characters Windows refuses in file names
pub const ILLEGAL_CHARS: [char; 7] = ['>', '*', '|', '<', '"', '?', ':'];

pub struct IllegalCharFilter;

impl IllegalCharFilter {
    /// Remove every illegal character from a single segment
    pub fn strip_segment(segment: &str) -> String {
        segment
            .chars()
            .filter(|c| !ILLEGAL_CHARS.contains(c))
            .collect()
    }

    /// Strip illegal characters from every segment of `path` except its
    /// drive or volume prefix.
    ///
    /// The prefix is recognised both as a native `Component::Prefix` and
    /// textually on the first component (exactly `X:`, or `\\server\share`),
    /// so Windows-style paths keep their drive on any host. Segments that end
    /// up empty are dropped. A segment that strips down to `.` or `..` would
    /// move the file out of its folder and is rejected.
    pub fn sanitize(path: &Path) -> Result<PathBuf> {
        let mut out = PathBuf::new();

        for (index, component) in path.components().enumerate() {
            match component {
                Component::Normal(part) => match part.to_str() {
                    Some(segment) => {
                        let (drive, rest) = if index == 0 {
                            split_drive(segment)
                        } else {
                            ("", segment)
                        };
                        let cleaned = format!("{}{}", drive, Self::strip_segment(rest));
                        if cleaned == "." || cleaned == ".." {
                            return Err(ExportError::MalformedInput(format!(
                                "name {:?} in {} becomes {:?} without illegal characters",
                                segment,
                                path.display(),
                                cleaned
                            )));
                        }
                        if !cleaned.is_empty() {
                            out.push(cleaned);
                        }
                    }
                    // Only the caller-supplied base can be non-UTF-8; leave it alone
                    None => out.push(part),
                },
                other => out.push(other.as_os_str()),
            }
        }

        Ok(out)
    }

    /// Apply [`IllegalCharFilter::sanitize`] to every destination, keeping ids
    pub fn sanitize_mapping(mapping: &PathMapping) -> Result<PathMapping> {
        mapping.try_map_paths(Self::sanitize)
    }
}

/// Split a bare `X:` drive or `\\server\share` UNC prefix off `segment`
fn split_drive(segment: &str) -> (&str, &str) {
    let bytes = segment.as_bytes();

    if bytes.len() == 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return (segment, "");
    }

    if let Some(rest) = segment.strip_prefix(r"\\") {
        let server_end = match rest.find('\\') {
            Some(i) => i,
            None => return (segment, ""),
        };
        let share = &rest[server_end + 1..];
        let share_end = share.find('\\').unwrap_or(share.len());
        return segment.split_at(2 + server_end + 1 + share_end);
    }

    ("", segment)
}
