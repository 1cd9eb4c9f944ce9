//! The font manager contract and its always-available backends.
//!
//! - [`FontManager`]: the handle callers use; forwards to a backend and keeps
//!   results null-safe
//! - [`FontManagerBackend`] / [`StyleSet`]: the seams backend authors implement
//! - [`EmptyFontManager`] / [`EmptyStyleSet`]: the "nothing installed" variants
//! - [`InMemoryFontManager`]: typefaces registered up front

pub mod empty;
pub mod error;
pub mod manager;
pub mod memory;
pub mod stream;
pub mod style_set;
pub mod typeface;

pub use empty::EmptyFontManager;
pub use error::FontError;
pub use manager::{FontManager, FontManagerBackend};
pub use memory::{InMemoryFontManager, TypefaceStyleSet};
pub use stream::{FontStream, MemoryFontStream, read_stream};
pub use style_set::{EmptyStyleSet, SharedStyleSet, StyleSet, closest_style};
pub use typeface::{FontData, SharedTypeface, Typeface, TypefaceId};

pub use fontmgr_style::{FontSlant, FontStyle, FontWeight, FontWidth, LegacyStyle};
