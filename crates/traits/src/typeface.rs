//! Typeface handles.
//!
//! A `Typeface` is one concrete face: its bytes, the index of the face
//! inside a collection file, and the metadata backends match against.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use fontmgr_style::{FontSlant, FontStyle, FontWeight, FontWidth};
use ttf_parser::name_id;

use crate::error::FontError;

/// Shared font file bytes.
pub type FontData = Arc<Vec<u8>>;

/// Typefaces are handed out as shared references.
pub type SharedTypeface = Arc<Typeface>;

/// Process-unique identifier assigned to every typeface at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypefaceId(u32);

impl TypefaceId {
    fn next() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        TypefaceId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

pub struct Typeface {
    id: TypefaceId,
    family_name: String,
    postscript_name: Option<String>,
    style: FontStyle,
    data: FontData,
    face_index: u32,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeface")
            .field("id", &self.id)
            .field("family_name", &self.family_name)
            .field("postscript_name", &self.postscript_name)
            .field("style", &self.style)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Typeface {
    /// Describes an already-known face without parsing its bytes.
    pub fn new(
        family_name: impl Into<String>,
        style: FontStyle,
        data: FontData,
        face_index: u32,
    ) -> Self {
        Self {
            id: TypefaceId::next(),
            family_name: family_name.into(),
            postscript_name: None,
            style,
            data,
            face_index,
        }
    }

    pub fn with_postscript_name(mut self, name: impl Into<String>) -> Self {
        self.postscript_name = Some(name.into());
        self
    }

    /// Parses face `face_index` of `data` and reads its naming and style metadata.
    ///
    /// # Errors
    ///
    /// Returns `FontError::FaceIndexOutOfRange` if `data` is a collection with
    /// fewer faces, and `FontError::InvalidData` if the face cannot be parsed.
    pub fn from_data(data: FontData, face_index: u32) -> Result<Self, FontError> {
        if let Some(count) = ttf_parser::fonts_in_collection(&data)
            && face_index >= count
        {
            return Err(FontError::FaceIndexOutOfRange { face_index, count });
        }

        let face =
            ttf_parser::Face::parse(&data, face_index).map_err(|e| FontError::InvalidData {
                face_index,
                message: e.to_string(),
            })?;

        let family_name = find_name(&face, name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| find_name(&face, name_id::FAMILY))
            .unwrap_or_else(|| "Unknown".to_string());
        let postscript_name = find_name(&face, name_id::POST_SCRIPT_NAME);

        let slant = if face.is_italic() {
            FontSlant::Italic
        } else if face.is_oblique() {
            FontSlant::Oblique
        } else {
            FontSlant::Upright
        };
        let style = FontStyle::new(
            FontWeight::from_numeric(face.weight().to_number()),
            FontWidth::from_numeric(face.width().to_number()),
            slant,
        );

        log::debug!(
            "Parsed typeface '{}' (ps: {:?}, face {}): {:?}",
            family_name,
            postscript_name,
            face_index,
            style
        );

        Ok(Self {
            id: TypefaceId::next(),
            family_name,
            postscript_name,
            style,
            data,
            face_index,
        })
    }

    pub fn id(&self) -> TypefaceId {
        self.id
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn postscript_name(&self) -> Option<&str> {
        self.postscript_name.as_deref()
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn data(&self) -> &FontData {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Whether the face's character map has a glyph for `ch`.
    ///
    /// Faces whose bytes cannot be parsed cover nothing.
    pub fn has_glyph(&self, ch: char) -> bool {
        ttf_parser::Face::parse(&self.data, self.face_index)
            .map(|face| face.glyph_index(ch).is_some())
            .unwrap_or(false)
    }
}

fn find_name(face: &ttf_parser::Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == id)
        .find_map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let data: FontData = Arc::new(Vec::new());
        let a = Typeface::new("A", FontStyle::normal(), data.clone(), 0);
        let b = Typeface::new("A", FontStyle::normal(), data, 0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_from_data_rejects_garbage() {
        let result = Typeface::from_data(Arc::new(b"definitely not a font".to_vec()), 0);
        assert!(matches!(result, Err(FontError::InvalidData { face_index: 0, .. })));
    }

    #[test]
    fn test_from_data_rejects_empty() {
        assert!(Typeface::from_data(Arc::new(Vec::new()), 0).is_err());
    }

    #[test]
    fn test_unparseable_face_covers_nothing() {
        let face = Typeface::new("Fake", FontStyle::bold(), Arc::new(vec![0u8; 16]), 0)
            .with_postscript_name("Fake-Bold");
        assert!(!face.has_glyph('A'));
        assert_eq!(face.postscript_name(), Some("Fake-Bold"));
        assert_eq!(face.style(), FontStyle::bold());
    }

    const TUFFY: &[u8] = include_bytes!("../tests/fixtures/Tuffy.ttf");
    const TUFFY_COLLECTION: &[u8] = include_bytes!("../tests/fixtures/Tuffy.ttc");

    #[test]
    fn test_from_data_reads_names_and_style() {
        let face = Typeface::from_data(Arc::new(TUFFY.to_vec()), 0).unwrap();
        assert_eq!(face.family_name(), "Tuffy");
        assert_eq!(face.postscript_name(), Some("Tuffy"));
        assert_eq!(face.face_index(), 0);
        assert_eq!(
            face.style(),
            FontStyle::new(FontWeight::Medium, FontWidth::Normal, FontSlant::Upright)
        );
        assert_eq!(face.data().len(), TUFFY.len());
    }

    #[test]
    fn test_has_glyph_uses_cmap() {
        let face = Typeface::from_data(Arc::new(TUFFY.to_vec()), 0).unwrap();
        assert!(face.has_glyph('A'));
        assert!(face.has_glyph('é'));
        assert!(face.has_glyph('Ж'));
        assert!(!face.has_glyph('字'));
    }

    #[test]
    fn test_from_data_collection_bounds() {
        let data: FontData = Arc::new(TUFFY_COLLECTION.to_vec());
        let second = Typeface::from_data(data.clone(), 1).unwrap();
        assert_eq!(second.family_name(), "Tuffy");
        assert_eq!(second.face_index(), 1);
        assert!(second.has_glyph('A'));

        let result = Typeface::from_data(data, 2);
        assert!(matches!(
            result,
            Err(FontError::FaceIndexOutOfRange { face_index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_from_data_single_font_has_one_face() {
        let result = Typeface::from_data(Arc::new(TUFFY.to_vec()), 1);
        assert!(matches!(result, Err(FontError::InvalidData { face_index: 1, .. })));
    }

    #[test]
    fn test_debug_omits_bytes() {
        let face = Typeface::new("Fake", FontStyle::normal(), Arc::new(vec![7u8; 1024]), 0);
        let rendered = format!("{:?}", face);
        assert!(rendered.contains("data_len: 1024"));
        assert!(rendered.contains("Fake"));
    }
}
