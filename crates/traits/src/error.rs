use thiserror::Error;

/// Error type for font loading operations.
///
/// These never cross the `FontManager` boundary: backends log them and
/// report absence instead.
#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data (face {face_index}): {message}")]
    InvalidData { face_index: u32, message: String },

    #[error("Face index {face_index} out of range (collection has {count} faces)")]
    FaceIndexOutOfRange { face_index: u32, count: u32 },

    #[error("Font store lock poisoned: {0}")]
    Poisoned(&'static str),
}
