//! An in-memory font backend.
//!
//! Typefaces are registered up front and must be added before use. This is
//! the simplest backend and works in any environment including WASM.

use std::path::Path;
use std::sync::{Arc, RwLock};

use fontmgr_style::{FontStyle, LegacyStyle};

use crate::error::FontError;
use crate::manager::FontManagerBackend;
use crate::stream::{FontStream, read_stream};
use crate::style_set::{SharedStyleSet, StyleSet, closest_style};
use crate::typeface::{FontData, SharedTypeface, Typeface};

/// A style set over a fixed list of typefaces from one family.
#[derive(Debug, Clone)]
pub struct TypefaceStyleSet {
    family: String,
    faces: Vec<SharedTypeface>,
}

impl TypefaceStyleSet {
    pub fn new(family: impl Into<String>, faces: Vec<SharedTypeface>) -> Self {
        Self {
            family: family.into(),
            faces,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn face(&self, index: usize) -> &SharedTypeface {
        match self.faces.get(index) {
            Some(face) => face,
            None => panic!(
                "style index {index} out of range for family '{}' ({} styles)",
                self.family,
                self.faces.len()
            ),
        }
    }
}

impl StyleSet for TypefaceStyleSet {
    fn count(&self) -> usize {
        self.faces.len()
    }

    fn style(&self, index: usize) -> (FontStyle, Option<String>) {
        let face = self.face(index);
        (face.style(), face.postscript_name().map(str::to_string))
    }

    fn create_typeface(&self, index: usize) -> Option<SharedTypeface> {
        Some(self.face(index).clone())
    }

    fn match_style(&self, pattern: &FontStyle) -> Option<SharedTypeface> {
        closest_style(self.faces.iter().map(|f| f.style()), pattern)
            .map(|i| self.faces[i].clone())
    }
}

/// A font backend over typefaces registered in memory.
#[derive(Debug, Default)]
pub struct InMemoryFontManager {
    typefaces: RwLock<Vec<SharedTypeface>>,
}

impl InMemoryFontManager {
    pub fn new() -> Self {
        Self {
            typefaces: RwLock::new(Vec::new()),
        }
    }

    /// Registers an already-built typeface.
    ///
    /// # Errors
    ///
    /// Returns `FontError::Poisoned` if the internal lock is poisoned.
    pub fn add_typeface(&self, typeface: SharedTypeface) -> Result<(), FontError> {
        let mut typefaces = self
            .typefaces
            .write()
            .map_err(|_| FontError::Poisoned("typeface store"))?;
        log::debug!(
            "Registering typeface '{}' {:?}",
            typeface.family_name(),
            typeface.style()
        );
        typefaces.push(typeface);
        Ok(())
    }

    /// Parses face `face_index` of `data` and registers it.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the bytes are not a usable font face.
    pub fn add_font_data(
        &self,
        data: FontData,
        face_index: u32,
    ) -> Result<SharedTypeface, FontError> {
        let typeface = Arc::new(Typeface::from_data(data, face_index)?);
        self.add_typeface(typeface.clone())?;
        Ok(typeface)
    }

    /// Registers every face of a font file or collection. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Fails on the first face that cannot be parsed; faces before it stay registered.
    pub fn add_font_collection(&self, data: FontData) -> Result<usize, FontError> {
        let count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
        for face_index in 0..count {
            self.add_font_data(data.clone(), face_index)?;
        }
        Ok(count as usize)
    }

    /// Number of registered typefaces. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.typefaces.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.typefaces.read().map(|t| t.is_empty()).unwrap_or(true)
    }

    /// Does nothing if the lock is poisoned.
    pub fn clear(&self) {
        if let Ok(mut typefaces) = self.typefaces.write() {
            typefaces.clear();
        }
    }

    fn snapshot(&self) -> Vec<SharedTypeface> {
        match self.typefaces.read() {
            Ok(typefaces) => typefaces.clone(),
            Err(_) => {
                log::warn!("InMemoryFontManager: typeface store lock poisoned");
                Vec::new()
            }
        }
    }

    /// Unique family names, sorted case-insensitively. The first registered
    /// spelling of a name wins.
    fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = Vec::new();
        for face in self.snapshot() {
            if !families.iter().any(|f| f.eq_ignore_ascii_case(face.family_name())) {
                families.push(face.family_name().to_string());
            }
        }
        families.sort_by_key(|f| f.to_lowercase());
        families
    }

    fn family_at(&self, index: usize) -> String {
        let families = self.families();
        match families.get(index) {
            Some(name) => name.clone(),
            None => panic!("family index {index} out of range ({} families)", families.len()),
        }
    }

    fn family_faces(&self, family: &str) -> Vec<SharedTypeface> {
        self.snapshot()
            .into_iter()
            .filter(|face| face.family_name().eq_ignore_ascii_case(family))
            .collect()
    }

    /// Resolves `None` to the first family.
    fn resolve_family(&self, family: Option<&str>) -> Option<String> {
        match family {
            Some(name) => Some(name.to_string()),
            None => self.families().into_iter().next(),
        }
    }

    fn style_set(&self, family: &str) -> Option<SharedStyleSet> {
        let faces = self.family_faces(family);
        if faces.is_empty() {
            return None;
        }
        Some(Arc::new(TypefaceStyleSet::new(family, faces)))
    }

    fn parse(&self, data: FontData, face_index: u32, source: &str) -> Option<SharedTypeface> {
        match Typeface::from_data(data, face_index) {
            Ok(typeface) => Some(Arc::new(typeface)),
            Err(e) => {
                log::debug!(
                    "InMemoryFontManager: could not create typeface from {}: {}",
                    source,
                    e
                );
                None
            }
        }
    }
}

/// Orders `faces` by closeness to `style`, closest first.
fn by_distance(mut faces: Vec<SharedTypeface>, style: &FontStyle) -> Vec<SharedTypeface> {
    faces.sort_by_key(|face| style.distance(&face.style()));
    faces
}

impl FontManagerBackend for InMemoryFontManager {
    fn count_families(&self) -> usize {
        self.families().len()
    }

    fn family_name(&self, index: usize) -> String {
        self.family_at(index)
    }

    fn create_style_set(&self, index: usize) -> Option<SharedStyleSet> {
        let family = self.family_at(index);
        self.style_set(&family)
    }

    fn match_family(&self, family: Option<&str>) -> Option<SharedStyleSet> {
        let family = self.resolve_family(family)?;
        self.style_set(&family)
    }

    fn match_family_style(
        &self,
        family: Option<&str>,
        style: &FontStyle,
    ) -> Option<SharedTypeface> {
        let family = self.resolve_family(family)?;
        by_distance(self.family_faces(&family), style).into_iter().next()
    }

    /// Registered typefaces carry no language metadata, so `locales` only
    /// shows up in logs here. The requested family is searched first, then
    /// every other family in name order.
    fn match_family_style_character(
        &self,
        family: Option<&str>,
        style: &FontStyle,
        locales: &[&str],
        character: char,
    ) -> Option<SharedTypeface> {
        log::debug!(
            "InMemoryFontManager: looking for U+{:04X} (family {:?}, locales {:?})",
            character as u32,
            family,
            locales
        );
        let requested = self.resolve_family(family);
        let mut order: Vec<String> = requested.iter().cloned().collect();
        order.extend(
            self.families()
                .into_iter()
                .filter(|f| !requested.as_deref().is_some_and(|r| r.eq_ignore_ascii_case(f))),
        );

        order
            .iter()
            .flat_map(|family| by_distance(self.family_faces(family), style))
            .find(|face| face.has_glyph(character))
    }

    fn match_face_style(&self, face: &Typeface, style: &FontStyle) -> Option<SharedTypeface> {
        self.match_family_style(Some(face.family_name()), style)
    }

    fn create_from_data(&self, data: FontData, face_index: u32) -> Option<SharedTypeface> {
        self.parse(data, face_index, "data")
    }

    fn create_from_stream(
        &self,
        stream: Box<dyn FontStream>,
        face_index: u32,
    ) -> Option<SharedTypeface> {
        let name = stream.name().to_string();
        match read_stream(stream) {
            Ok(data) => self.parse(data, face_index, &name),
            Err(e) => {
                log::debug!("InMemoryFontManager: {}", e);
                None
            }
        }
    }

    fn create_from_file(&self, path: &Path, face_index: u32) -> Option<SharedTypeface> {
        match std::fs::read(path) {
            Ok(bytes) => self.parse(Arc::new(bytes), face_index, &path.display().to_string()),
            Err(e) => {
                log::debug!("InMemoryFontManager: failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn legacy_create_typeface(
        &self,
        family: Option<&str>,
        style: LegacyStyle,
    ) -> Option<SharedTypeface> {
        self.match_family_style(family, &FontStyle::from_legacy(style))
    }

    fn name(&self) -> &'static str {
        "InMemoryFontManager"
    }
}
