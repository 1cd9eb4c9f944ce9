//! Style data describing font faces and font requests.
//!
//! The font manager layer never interprets these values; they are passed
//! through to backends, which use them to pick the closest face.

pub mod font;
pub mod legacy;

pub use font::{FontSlant, FontStyle, FontWeight, FontWidth};
pub use legacy::LegacyStyle;

use thiserror::Error;

/// Errors that can occur while parsing style values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}
