//! Filesystem permission primitives used by the pyrelay script detector.
//!
//! - [`is_executable`] - may the current user execute this file
//! - [`chmod_plus_x`] - grant execute wherever read is granted

mod error;
mod permissions;

pub use error::{Error, Result};
pub use permissions::{chmod_plus_x, is_executable, plus_x_mode};
