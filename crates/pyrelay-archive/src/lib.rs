//! Zip archive probing for launcher-wrapped console scripts.
//!
//! # Architecture
//!
//! - `detect.rs` - Is a file a zip archive (prepended data allowed)
//! - `header.rs` - Bytes in front of the archive and shebang isolation

pub use detect::is_zip;
pub use error::{Error, Result};
pub use header::{MAX_HEADER_LEN, ZipHeader};

mod detect;
mod error;
mod header;
