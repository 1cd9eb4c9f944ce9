//! # fontmgr
//!
//! Discover and obtain typefaces through one font manager contract, with a
//! backend that degrades to "nothing installed" instead of failing.
//!
//! - **traits**: the [`FontManager`] handle, the backend hook set, and the
//!   empty and in-memory backends
//! - **style_types**: font style data passed through to backends
//! - **resource**: filesystem font streams
//! - **system**: the fontdb backend (feature `system-fonts`)
//!
//! ```ignore
//! let manager = fontmgr::ref_default();
//! let family = manager.match_family(Some("Arial"));
//! if family.count() == 0 {
//!     // not installed, or no font backend at all
//! }
//! ```

// Re-export foundation crates
pub use fontmgr_resource as resource;
pub use fontmgr_style as style_types;
pub use fontmgr_traits as traits;

#[cfg(feature = "system-fonts")]
pub use fontmgr_system as system;

pub mod config;
pub mod default_manager;
pub mod error;

pub use config::{BackendKind, FontManagerConfig};
pub use default_manager::{
    DefaultManager, PlatformFactory, create_platform_manager, platform_factory, ref_default,
};
pub use error::ConfigError;

pub use resource::{FileFontStream, FontDirectory};
pub use style_types::{FontSlant, FontStyle, FontWeight, FontWidth, LegacyStyle};
pub use traits::{
    EmptyFontManager, EmptyStyleSet, FontData, FontError, FontManager, FontManagerBackend,
    FontStream, InMemoryFontManager, MemoryFontStream, SharedStyleSet, SharedTypeface, StyleSet,
    Typeface,
};

#[cfg(feature = "system-fonts")]
pub use system::{SystemFontManager, SystemFontOptions};
