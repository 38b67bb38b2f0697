mod illegal_chars;
mod path;


pub use illegal_chars::{IllegalCharFilter, ILLEGAL_CHARS};
pub use path::NameGuard;
