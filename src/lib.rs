pub mod config;
pub mod error;
pub mod guard;
pub mod jsonl;
pub mod text;

mod progress;

// re-export the everyday surface
pub use crate::config::{
    Buffering, DirectoryOptions, Encoding, ErrorMode, FileOptions, JsonReadOptions,
    JsonWriteOptions, LineOptions, Newline, TextOptions,
};
pub use crate::error::{EntryKind, Error, Result};
pub use crate::guard::{ensure_directory, ensure_file, reset_directory};
pub use crate::jsonl::{read_json_lines, write_json_lines, JsonLines};
pub use crate::text::{read_lines, write_lines, LineReader};
