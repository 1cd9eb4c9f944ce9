//! System font backend for fontmgr.
//!
//! [`SystemFontManager`] exposes the faces found by `fontdb` (system font
//! directories plus any extra directories) through the `FontManagerBackend`
//! contract. The database is built once and never mutated afterwards;
//! typefaces created from data, streams or files are not registered in it.

mod coverage;
mod locale;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use fontdb::{Database, FaceInfo, ID};
use fontmgr_resource::{FileFontStream, FontDirectory};
use fontmgr_traits::{
    FontData, FontManagerBackend, FontSlant, FontStream, FontStyle, FontWeight, FontWidth,
    LegacyStyle, SharedStyleSet, SharedTypeface, StyleSet, Typeface, closest_style, read_stream,
};

use crate::coverage::Coverage;
use crate::locale::{face_languages, locale_rank, requested_subtags};

/// Where the system backend looks for fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFontOptions {
    /// Scan the platform's standard font directories.
    pub load_system_fonts: bool,
    /// Extra directories whose font files are loaded as well.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for SystemFontOptions {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Family {
    name: String,
    faces: Vec<ID>,
}

/// Per-face data the matching paths need on every call.
#[derive(Debug)]
struct FaceEntry {
    id: ID,
    style: FontStyle,
    languages: Vec<&'static str>,
    /// Filled the first time a character lookup reaches this face.
    coverage: OnceLock<Coverage>,
}

pub struct SystemFontManager {
    db: Arc<Database>,
    families: Vec<Family>,
    faces: Vec<FaceEntry>,
    face_index: HashMap<ID, usize>,
}

impl fmt::Debug for SystemFontManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFontManager")
            .field("faces", &self.faces.len())
            .field("families", &self.families.len())
            .finish()
    }
}

impl SystemFontManager {
    pub fn new(options: &SystemFontOptions) -> Self {
        let mut db = Database::new();
        if options.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &options.font_dirs {
            for path in FontDirectory::new(dir).font_files() {
                if let Err(e) = db.load_font_file(&path) {
                    log::warn!("Failed to load font file {}: {}", path.display(), e);
                }
            }
        }
        Self::from_database(db)
    }

    /// Wraps a database the caller has already populated.
    pub fn from_database(db: Database) -> Self {
        let families = group_families(&db);
        let faces: Vec<FaceEntry> = db
            .faces()
            .map(|face| FaceEntry {
                id: face.id,
                style: face_style(face),
                languages: face_languages(face),
                coverage: OnceLock::new(),
            })
            .collect();
        let face_index = faces
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id, index))
            .collect();
        log::debug!(
            "SystemFontManager: {} faces in {} families",
            faces.len(),
            families.len()
        );
        Self {
            db: Arc::new(db),
            families,
            faces,
            face_index,
        }
    }

    fn family_at(&self, index: usize) -> &Family {
        match self.families.get(index) {
            Some(family) => family,
            None => panic!(
                "family index {index} out of range ({} families)",
                self.families.len()
            ),
        }
    }

    fn find_family(&self, name: &str) -> Option<&Family> {
        self.families
            .iter()
            .find(|family| family.name.eq_ignore_ascii_case(name))
    }

    /// The family behind the `sans-serif` generic, else the first family.
    fn default_family(&self) -> Option<&Family> {
        self.db
            .query(&fontdb::Query {
                families: &[fontdb::Family::SansSerif],
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
            .and_then(|id| self.db.face(id))
            .and_then(primary_family_name)
            .and_then(|name| self.find_family(name))
            .or_else(|| self.families.first())
    }

    /// Every named lookup goes through here, so all hooks agree on which
    /// family a name refers to. `None` is the default family.
    fn resolve_family(&self, family: Option<&str>) -> Option<&Family> {
        match family {
            Some(name) => self.find_family(name),
            None => self.default_family(),
        }
    }

    fn style_set(&self, family: &Family) -> SharedStyleSet {
        Arc::new(SystemStyleSet {
            db: self.db.clone(),
            family: family.name.clone(),
            faces: family.faces.clone(),
        })
    }

    /// Best face of `family` for `style`. fontdb's CSS matching is queried
    /// with the family's own spelling; faces grouped under another spelling
    /// fall back to style distance.
    fn best_in_family(&self, family: &Family, style: &FontStyle) -> Option<ID> {
        let families = [fontdb::Family::Name(&family.name)];
        self.db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight(style.weight.numeric_value()),
                stretch: to_stretch(style.width),
                style: to_fontdb_style(style.slant),
            })
            .filter(|id| family.faces.contains(id))
            .or_else(|| self.by_distance(&family.faces, style).into_iter().next())
    }

    fn entry(&self, id: ID) -> Option<&FaceEntry> {
        self.face_index.get(&id).map(|index| &self.faces[*index])
    }

    fn by_distance(&self, faces: &[ID], style: &FontStyle) -> Vec<ID> {
        let mut ordered = faces.to_vec();
        ordered.sort_by_key(|id| {
            self.entry(*id)
                .map(|entry| style.distance(&entry.style))
                .unwrap_or(u32::MAX)
        });
        ordered
    }

    fn covers(&self, id: ID, character: char) -> bool {
        let Some(entry) = self.entry(id) else {
            return false;
        };
        entry
            .coverage
            .get_or_init(|| {
                self.db
                    .with_face_data(id, |data, index| {
                        ttf_parser::Face::parse(data, index)
                            .map(|face| Coverage::from_face(&face))
                            .unwrap_or_default()
                    })
                    .unwrap_or_default()
            })
            .contains(character)
    }

    fn parse(&self, data: FontData, face_index: u32, source: &str) -> Option<SharedTypeface> {
        match Typeface::from_data(data, face_index) {
            Ok(typeface) => Some(Arc::new(typeface)),
            Err(e) => {
                log::debug!(
                    "SystemFontManager: could not create typeface from {}: {}",
                    source,
                    e
                );
                None
            }
        }
    }
}

impl FontManagerBackend for SystemFontManager {
    fn count_families(&self) -> usize {
        self.families.len()
    }

    fn family_name(&self, index: usize) -> String {
        self.family_at(index).name.clone()
    }

    fn create_style_set(&self, index: usize) -> Option<SharedStyleSet> {
        Some(self.style_set(self.family_at(index)))
    }

    fn match_family(&self, family: Option<&str>) -> Option<SharedStyleSet> {
        self.resolve_family(family)
            .map(|family| self.style_set(family))
    }

    fn match_family_style(
        &self,
        family: Option<&str>,
        style: &FontStyle,
    ) -> Option<SharedTypeface> {
        let family = self.resolve_family(family)?;
        let id = self.best_in_family(family, style)?;
        load_typeface(&self.db, id)
    }

    /// Candidates are tried in this order: the best match in the requested
    /// family, the rest of that family, then every face ranked by locale
    /// preference and style distance. The first face whose character map
    /// covers `character` wins.
    fn match_family_style_character(
        &self,
        family: Option<&str>,
        style: &FontStyle,
        locales: &[&str],
        character: char,
    ) -> Option<SharedTypeface> {
        let mut candidates: Vec<ID> = Vec::new();
        if let Some(requested) = self.resolve_family(family) {
            candidates.extend(self.best_in_family(requested, style));
            candidates.extend(self.by_distance(&requested.faces, style));
        }

        let wanted = requested_subtags(locales);
        let mut rest: Vec<&FaceEntry> = self.faces.iter().collect();
        rest.sort_by_key(|entry| {
            (
                locale_rank(&entry.languages, &wanted),
                style.distance(&entry.style),
            )
        });
        candidates.extend(rest.iter().map(|entry| entry.id));

        let mut seen = HashSet::new();
        let id = candidates
            .into_iter()
            .filter(|id| seen.insert(*id))
            .find(|id| self.covers(*id, character))?;
        log::debug!(
            "SystemFontManager: U+{:04X} covered by face {:?}",
            character as u32,
            id
        );
        load_typeface(&self.db, id)
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
                log::debug!("SystemFontManager: {}", e);
                None
            }
        }
    }

    fn create_from_file(&self, path: &Path, face_index: u32) -> Option<SharedTypeface> {
        match FileFontStream::open(path) {
            Ok(stream) => self.create_from_stream(Box::new(stream), face_index),
            Err(e) => {
                log::debug!("SystemFontManager: {}", e);
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
        "SystemFontManager"
    }
}

/// The styles of one fontdb family.
struct SystemStyleSet {
    db: Arc<Database>,
    family: String,
    faces: Vec<ID>,
}

impl fmt::Debug for SystemStyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemStyleSet")
            .field("family", &self.family)
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl SystemStyleSet {
    fn face(&self, index: usize) -> ID {
        match self.faces.get(index) {
            Some(id) => *id,
            None => panic!(
                "style index {index} out of range for family '{}' ({} styles)",
                self.family,
                self.faces.len()
            ),
        }
    }
}

impl StyleSet for SystemStyleSet {
    fn count(&self) -> usize {
        self.faces.len()
    }

    fn style(&self, index: usize) -> (FontStyle, Option<String>) {
        let id = self.face(index);
        match self.db.face(id) {
            Some(face) => (face_style(face), Some(face.post_script_name.clone())),
            None => (FontStyle::normal(), None),
        }
    }

    fn create_typeface(&self, index: usize) -> Option<SharedTypeface> {
        load_typeface(&self.db, self.face(index))
    }

    fn match_style(&self, pattern: &FontStyle) -> Option<SharedTypeface> {
        let styles = self
            .faces
            .iter()
            .map(|id| self.db.face(*id).map(face_style).unwrap_or_default());
        let index = closest_style(styles, pattern)?;
        load_typeface(&self.db, self.faces[index])
    }
}

fn primary_family_name(face: &FaceInfo) -> Option<&str> {
    face.families.first().map(|(name, _)| name.as_str())
}

/// Groups faces by their primary family name (case-insensitive), sorted by name.
fn group_families(db: &Database) -> Vec<Family> {
    let mut families: Vec<Family> = Vec::new();
    for face in db.faces() {
        let Some(name) = primary_family_name(face) else {
            log::debug!("Skipping face {:?} without a family name", face.id);
            continue;
        };
        match families.iter_mut().find(|f| f.name.eq_ignore_ascii_case(name)) {
            Some(family) => family.faces.push(face.id),
            None => families.push(Family {
                name: name.to_string(),
                faces: vec![face.id],
            }),
        }
    }
    families.sort_by_key(|f| f.name.to_lowercase());
    families
}

fn load_typeface(db: &Database, id: ID) -> Option<SharedTypeface> {
    let result = db.with_face_data(id, |data, index| {
        Typeface::from_data(Arc::new(data.to_vec()), index)
    })?;
    match result {
        Ok(typeface) => Some(Arc::new(typeface)),
        Err(e) => {
            log::warn!("Face {:?} is listed by fontdb but failed to load: {}", id, e);
            None
        }
    }
}

fn face_style(face: &FaceInfo) -> FontStyle {
    let slant = match face.style {
        fontdb::Style::Normal => FontSlant::Upright,
        fontdb::Style::Italic => FontSlant::Italic,
        fontdb::Style::Oblique => FontSlant::Oblique,
    };
    FontStyle::new(
        FontWeight::from_numeric(face.weight.0),
        FontWidth::from_numeric(face.stretch.to_number()),
        slant,
    )
}

fn to_fontdb_style(slant: FontSlant) -> fontdb::Style {
    match slant {
        FontSlant::Upright => fontdb::Style::Normal,
        FontSlant::Italic => fontdb::Style::Italic,
        FontSlant::Oblique => fontdb::Style::Oblique,
    }
}

fn to_stretch(width: FontWidth) -> fontdb::Stretch {
    match width {
        FontWidth::UltraCondensed => fontdb::Stretch::UltraCondensed,
        FontWidth::ExtraCondensed => fontdb::Stretch::ExtraCondensed,
        FontWidth::Condensed => fontdb::Stretch::Condensed,
        FontWidth::SemiCondensed => fontdb::Stretch::SemiCondensed,
        FontWidth::Normal => fontdb::Stretch::Normal,
        FontWidth::SemiExpanded => fontdb::Stretch::SemiExpanded,
        FontWidth::Expanded => fontdb::Stretch::Expanded,
        FontWidth::ExtraExpanded => fontdb::Stretch::ExtraExpanded,
        FontWidth::UltraExpanded => fontdb::Stretch::UltraExpanded,
    }
}
