use crate::error::{ExportError, Result};
use std::path::{is_separator, Component, Path};

pub struct NameGuard;

impl NameGuard {
    /// Split a record name into path segments that stay inside the output tree.
    ///
    /// A name may contain separators (StackEdit allows `/` in names), which
    /// produce nested directories. Rejects:
    /// - empty names or empty segments (`a//b`, leading `/`)
    /// - `.` and `..` segments
    /// - drive or root prefixes (`C:`, `\\server`)
    pub fn segments<'a>(id: &str, name: &'a str) -> Result<Vec<&'a str>> {
        if name.is_empty() {
            return Err(ExportError::MalformedInput(format!(
                "record {:?} has an empty name",
                id
            )));
        }

        name.split(is_separator)
            .map(|part| {
                if Self::is_plain_segment(part) {
                    Ok(part)
                } else {
                    Err(ExportError::MalformedInput(format!(
                        "record {:?} has a name that escapes the output directory: {:?}",
                        id, name
                    )))
                }
            })
            .collect()
    }

    /// True if `part` is exactly one normal path component
    fn is_plain_segment(part: &str) -> bool {
        let mut components = Path::new(part).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }
}
