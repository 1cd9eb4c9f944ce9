//! The font manager contract.
//!
//! Backend authors implement [`FontManagerBackend`]. Callers only ever use
//! [`FontManager`], which forwards every call to the installed backend and
//! applies the null-safety rules:
//!
//! - style-set lookups never come back missing; an empty set stands in;
//! - creation calls with an absent resource return `None` without touching the backend;
//! - a stream handed to `create_from_stream` is always consumed.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fontmgr_style::{FontStyle, LegacyStyle};

use crate::empty::EmptyFontManager;
use crate::stream::FontStream;
use crate::style_set::{EmptyStyleSet, SharedStyleSet};
use crate::typeface::{FontData, SharedTypeface, Typeface};

/// The hook set a concrete font backend implements.
///
/// `None` from any hook means absence ("not found", "unsupported"), never an
/// error. Indices passed to `family_name` and `create_style_set` outside
/// `0..count_families()` are caller bugs; backends panic on them.
pub trait FontManagerBackend: Send + Sync + fmt::Debug {
    fn count_families(&self) -> usize;

    fn family_name(&self, index: usize) -> String;

    fn create_style_set(&self, index: usize) -> Option<SharedStyleSet>;

    /// `None` for `family` asks for the backend's default family.
    fn match_family(&self, family: Option<&str>) -> Option<SharedStyleSet>;

    fn match_family_style(
        &self,
        family: Option<&str>,
        style: &FontStyle,
    ) -> Option<SharedTypeface>;

    /// Like `match_family_style`, restricted to faces covering `character`.
    /// `locales` are BCP-47 tags in order of preference.
    fn match_family_style_character(
        &self,
        family: Option<&str>,
        style: &FontStyle,
        locales: &[&str],
        character: char,
    ) -> Option<SharedTypeface>;

    fn match_face_style(&self, face: &Typeface, style: &FontStyle) -> Option<SharedTypeface>;

    fn create_from_data(&self, data: FontData, face_index: u32) -> Option<SharedTypeface>;

    /// Takes ownership of `stream` and must release it on every path.
    fn create_from_stream(
        &self,
        stream: Box<dyn FontStream>,
        face_index: u32,
    ) -> Option<SharedTypeface>;

    fn create_from_file(&self, path: &Path, face_index: u32) -> Option<SharedTypeface>;

    fn legacy_create_typeface(
        &self,
        family: Option<&str>,
        style: LegacyStyle,
    ) -> Option<SharedTypeface>;

    /// Returns a human-readable name for this backend (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A shared handle to a font backend.
///
/// Cloning the handle takes another reference to the same backend.
#[derive(Clone)]
pub struct FontManager {
    backend: Arc<dyn FontManagerBackend>,
}

impl fmt::Debug for FontManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontManager")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: FontManagerBackend + 'static> From<Arc<B>> for FontManager {
    fn from(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

impl FontManager {
    pub fn new(backend: impl FontManagerBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A manager with no families at all.
    pub fn empty() -> Self {
        Self::new(EmptyFontManager)
    }

    /// Whether both handles refer to the same backend instance.
    pub fn ptr_eq(a: &FontManager, b: &FontManager) -> bool {
        Arc::ptr_eq(&a.backend, &b.backend)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn count_families(&self) -> usize {
        self.backend.count_families()
    }

    /// Name of the family at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count_families()`.
    pub fn family_name(&self, index: usize) -> String {
        self.backend.family_name(index)
    }

    /// Style set of the family at `index`; empty if the backend has none to give.
    pub fn create_style_set(&self, index: usize) -> SharedStyleSet {
        empty_on_none(self.backend.create_style_set(index))
    }

    /// Style set of the family best matching `family`, or of the default
    /// family when `family` is `None`. Never missing.
    pub fn match_family(&self, family: Option<&str>) -> SharedStyleSet {
        empty_on_none(self.backend.match_family(family))
    }

    pub fn match_family_style(
        &self,
        family: Option<&str>,
        style: &FontStyle,
    ) -> Option<SharedTypeface> {
        self.backend.match_family_style(family, style)
    }

    pub fn match_family_style_character(
        &self,
        family: Option<&str>,
        style: &FontStyle,
        locales: &[&str],
        character: char,
    ) -> Option<SharedTypeface> {
        self.backend
            .match_family_style_character(family, style, locales, character)
    }

    pub fn match_face_style(&self, face: &Typeface, style: &FontStyle) -> Option<SharedTypeface> {
        self.backend.match_face_style(face, style)
    }

    pub fn create_from_data(
        &self,
        data: Option<FontData>,
        face_index: u32,
    ) -> Option<SharedTypeface> {
        let data = data?;
        self.backend.create_from_data(data, face_index)
    }

    /// Builds a typeface from `stream`. The stream is consumed whether or not
    /// a typeface comes back.
    pub fn create_from_stream(
        &self,
        stream: Option<Box<dyn FontStream>>,
        face_index: u32,
    ) -> Option<SharedTypeface> {
        let stream = stream?;
        self.backend.create_from_stream(stream, face_index)
    }

    pub fn create_from_file(
        &self,
        path: Option<&Path>,
        face_index: u32,
    ) -> Option<SharedTypeface> {
        let path = path?;
        self.backend.create_from_file(path, face_index)
    }

    pub fn legacy_create_typeface(
        &self,
        family: Option<&str>,
        style: LegacyStyle,
    ) -> Option<SharedTypeface> {
        self.backend.legacy_create_typeface(family, style)
    }
}

fn empty_on_none(set: Option<SharedStyleSet>) -> SharedStyleSet {
    set.unwrap_or_else(|| {
        log::debug!("Backend returned no style set; substituting an empty one");
        EmptyStyleSet::shared()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryFontStream;
    use crate::style_set::StyleSet;
    use std::io::Read;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every hook invocation and reports absence for all of them.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingBackend {
        fn record(&self, hook: &'static str) {
            self.calls.lock().unwrap().push(hook);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FontManagerBackend for RecordingBackend {
        fn count_families(&self) -> usize {
            self.record("count_families");
            2
        }

        fn family_name(&self, index: usize) -> String {
            self.record("family_name");
            format!("Family{index}")
        }

        fn create_style_set(&self, _index: usize) -> Option<SharedStyleSet> {
            self.record("create_style_set");
            None
        }

        fn match_family(&self, _family: Option<&str>) -> Option<SharedStyleSet> {
            self.record("match_family");
            None
        }

        fn match_family_style(
            &self,
            _family: Option<&str>,
            _style: &FontStyle,
        ) -> Option<SharedTypeface> {
            self.record("match_family_style");
            None
        }

        fn match_family_style_character(
            &self,
            _family: Option<&str>,
            _style: &FontStyle,
            _locales: &[&str],
            _character: char,
        ) -> Option<SharedTypeface> {
            self.record("match_family_style_character");
            None
        }

        fn match_face_style(
            &self,
            _face: &Typeface,
            _style: &FontStyle,
        ) -> Option<SharedTypeface> {
            self.record("match_face_style");
            None
        }

        fn create_from_data(&self, _data: FontData, _face_index: u32) -> Option<SharedTypeface> {
            self.record("create_from_data");
            None
        }

        fn create_from_stream(
            &self,
            stream: Box<dyn FontStream>,
            _face_index: u32,
        ) -> Option<SharedTypeface> {
            self.record("create_from_stream");
            drop(stream);
            None
        }

        fn create_from_file(&self, _path: &Path, _face_index: u32) -> Option<SharedTypeface> {
            self.record("create_from_file");
            None
        }

        fn legacy_create_typeface(
            &self,
            _family: Option<&str>,
            _style: LegacyStyle,
        ) -> Option<SharedTypeface> {
            self.record("legacy_create_typeface");
            None
        }

        fn name(&self) -> &'static str {
            "RecordingBackend"
        }
    }

    #[derive(Debug)]
    struct CountedStream {
        inner: MemoryFontStream,
        drops: Arc<AtomicUsize>,
    }

    impl Read for CountedStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl FontStream for CountedStream {
        fn name(&self) -> &str {
            "counted"
        }
    }

    impl Drop for CountedStream {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_style_set_lookups_never_missing() {
        let backend = Arc::new(RecordingBackend::default());
        let manager = FontManager::from(backend.clone());

        for index in 0..manager.count_families() {
            assert_eq!(manager.create_style_set(index).count(), 0);
        }
        assert_eq!(manager.match_family(Some("Arial")).count(), 0);
        assert_eq!(manager.match_family(None).count(), 0);
        assert_eq!(manager.match_family(Some("")).count(), 0);

        assert_eq!(
            backend.calls(),
            vec![
                "count_families",
                "create_style_set",
                "create_style_set",
                "match_family",
                "match_family",
                "match_family",
            ]
        );
    }

    #[test]
    fn test_absent_resources_skip_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let manager = FontManager::from(backend.clone());

        assert!(manager.create_from_data(None, 0).is_none());
        assert!(manager.create_from_stream(None, 0).is_none());
        assert!(manager.create_from_file(None, 0).is_none());

        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_present_resources_reach_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let manager = FontManager::from(backend.clone());

        manager.create_from_data(Some(Arc::new(vec![0u8; 4])), 0);
        let stream = MemoryFontStream::from_vec(vec![1]);
        manager.create_from_stream(Some(Box::new(stream)), 0);
        manager.create_from_file(Some(Path::new("/no/such/font.ttf")), 1);

        assert_eq!(
            backend.calls(),
            vec!["create_from_data", "create_from_stream", "create_from_file"]
        );
    }

    #[test]
    fn test_stream_released_exactly_once() {
        let manager = FontManager::new(RecordingBackend::default());
        let drops = Arc::new(AtomicUsize::new(0));
        let stream = CountedStream {
            inner: MemoryFontStream::from_vec(b"not a font".to_vec()),
            drops: drops.clone(),
        };

        assert!(manager.create_from_stream(Some(Box::new(stream)), 0).is_none());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_match_calls_forward() {
        let backend = Arc::new(RecordingBackend::default());
        let manager = FontManager::from(backend.clone());
        let face = Typeface::new("Any", FontStyle::normal(), Arc::new(Vec::new()), 0);

        assert_eq!(manager.family_name(1), "Family1");
        assert!(
            manager
                .match_family_style(Some("Any"), &FontStyle::bold())
                .is_none()
        );
        assert!(
            manager
                .match_family_style_character(None, &FontStyle::normal(), &["en-US", "ja"], 'あ')
                .is_none()
        );
        assert!(manager.match_face_style(&face, &FontStyle::italic()).is_none());
        assert!(
            manager
                .legacy_create_typeface(Some("Any"), LegacyStyle::BOLD)
                .is_none()
        );

        assert_eq!(
            backend.calls(),
            vec![
                "family_name",
                "match_family_style",
                "match_family_style_character",
                "match_face_style",
                "legacy_create_typeface",
            ]
        );
    }

    #[test]
    fn test_handle_identity() {
        let manager = FontManager::new(RecordingBackend::default());
        let other_ref = manager.clone();
        assert!(FontManager::ptr_eq(&manager, &other_ref));
        assert!(!FontManager::ptr_eq(&manager, &FontManager::empty()));
        assert_eq!(
            format!("{:?}", manager),
            "FontManager { backend: \"RecordingBackend\" }"
        );
    }
}
