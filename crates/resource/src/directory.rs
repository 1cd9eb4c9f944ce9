//! Font files found under a directory tree.

use std::path::{Path, PathBuf};

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];

#[derive(Debug, Clone)]
pub struct FontDirectory {
    base_path: PathBuf,
}

impl FontDirectory {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Font files in the directory and its subdirectories, sorted by path.
    ///
    /// Unreadable directories are skipped, so a missing base yields an
    /// empty list. Symlinked directories are not followed.
    pub fn font_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let mut pending = vec![self.base_path.clone()];
        while let Some(dir) = pending.pop() {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("Cannot list font directory {}: {}", dir.display(), e);
                    continue;
                }
            };
            for entry in entries.flatten() {
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if has_font_extension(&path) && path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files
    }
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
