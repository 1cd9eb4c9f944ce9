use std::path::{Path, PathBuf};

use fontmgr::FontData;
use std::sync::Arc;

/// Directory holding the font fixtures shared by every crate's tests.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("crates/traits/tests/fixtures")
}

/// Path of a single-face TrueType font (family "Tuffy", weight 500).
pub fn tuffy_path() -> PathBuf {
    fixtures_dir().join("Tuffy.ttf")
}

/// A two-face collection built from the same font.
pub fn tuffy_collection_path() -> PathBuf {
    fixtures_dir().join("Tuffy.ttc")
}

pub fn tuffy_data() -> FontData {
    Arc::new(std::fs::read(tuffy_path()).expect("Tuffy.ttf fixture"))
}
