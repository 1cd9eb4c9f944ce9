//! Filesystem font resources for fontmgr.
//!
//! This crate provides platform-specific implementations of the
//! `FontStream` trait from fontmgr-traits.
//!
//! ## Available Types
//!
//! - [`FileFontStream`]: Reads a font file from the local filesystem
//! - [`FontDirectory`]: Lists the font files under a directory tree
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory stream from fontmgr-traits:
//! - [`MemoryFontStream`]: Bytes already in memory

mod directory;
mod file;

pub use directory::FontDirectory;
pub use file::FileFontStream;

pub use fontmgr_traits::MemoryFontStream;
