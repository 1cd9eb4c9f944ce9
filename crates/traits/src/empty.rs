use std::path::Path;

use fontmgr_style::{FontStyle, LegacyStyle};

use crate::manager::FontManagerBackend;
use crate::stream::FontStream;
use crate::style_set::{EmptyStyleSet, SharedStyleSet};
use crate::typeface::{FontData, SharedTypeface, Typeface};

/// The backend used when no font system is available.
///
/// It has no families, and every creation hook reports absence. From a
/// caller's point of view it is indistinguishable from a real backend with
/// nothing installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyFontManager;

impl FontManagerBackend for EmptyFontManager {
    fn count_families(&self) -> usize {
        0
    }

    fn family_name(&self, index: usize) -> String {
        panic!("family_name({index}) called on a font manager with no families");
    }

    fn create_style_set(&self, index: usize) -> Option<SharedStyleSet> {
        panic!("create_style_set({index}) called on a font manager with no families");
    }

    fn match_family(&self, _family: Option<&str>) -> Option<SharedStyleSet> {
        Some(EmptyStyleSet::shared())
    }

    fn match_family_style(
        &self,
        _family: Option<&str>,
        _style: &FontStyle,
    ) -> Option<SharedTypeface> {
        None
    }

    fn match_family_style_character(
        &self,
        _family: Option<&str>,
        _style: &FontStyle,
        _locales: &[&str],
        _character: char,
    ) -> Option<SharedTypeface> {
        None
    }

    fn match_face_style(&self, _face: &Typeface, _style: &FontStyle) -> Option<SharedTypeface> {
        None
    }

    fn create_from_data(&self, _data: FontData, _face_index: u32) -> Option<SharedTypeface> {
        None
    }

    fn create_from_stream(
        &self,
        stream: Box<dyn FontStream>,
        _face_index: u32,
    ) -> Option<SharedTypeface> {
        log::debug!("EmptyFontManager: releasing stream '{}' unread", stream.name());
        drop(stream);
        None
    }

    fn create_from_file(&self, _path: &Path, _face_index: u32) -> Option<SharedTypeface> {
        None
    }

    fn legacy_create_typeface(
        &self,
        _family: Option<&str>,
        _style: LegacyStyle,
    ) -> Option<SharedTypeface> {
        None
    }

    fn name(&self) -> &'static str {
        "EmptyFontManager"
    }
}
