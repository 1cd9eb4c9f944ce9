#![allow(dead_code)]

pub mod fixtures;

use fontmgr::{
    FontData, FontManagerBackend, FontStream, FontStyle, LegacyStyle, MemoryFontStream,
    SharedStyleSet, SharedTypeface, Typeface,
};
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A backend that records which hooks ran.
///
/// It reports two families but never hands out style sets, and it succeeds
/// at stream creation whenever the stream is non-empty.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingBackend {
    fn record(&self, hook: &'static str) {
        self.calls.lock().unwrap().push(hook);
    }

    pub fn calls(&self) -> Vec<&'static str> {
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
        format!("Recorded {index}")
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

    fn match_face_style(&self, _face: &Typeface, _style: &FontStyle) -> Option<SharedTypeface> {
        self.record("match_face_style");
        None
    }

    fn create_from_data(&self, _data: FontData, _face_index: u32) -> Option<SharedTypeface> {
        self.record("create_from_data");
        None
    }

    fn create_from_stream(
        &self,
        mut stream: Box<dyn FontStream>,
        face_index: u32,
    ) -> Option<SharedTypeface> {
        self.record("create_from_stream");
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).ok()?;
        if bytes.is_empty() {
            return None;
        }
        Some(Arc::new(Typeface::new(
            "Streamed",
            FontStyle::normal(),
            Arc::new(bytes),
            face_index,
        )))
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

/// A stream that counts how many times it has been released.
#[derive(Debug)]
pub struct DropCountingStream {
    inner: MemoryFontStream,
    drops: Arc<AtomicUsize>,
}

impl DropCountingStream {
    pub fn new(bytes: &[u8]) -> (Self, Arc<AtomicUsize>) {
        let drops = Arc::new(AtomicUsize::new(0));
        let stream = Self {
            inner: MemoryFontStream::from_vec(bytes.to_vec()),
            drops: drops.clone(),
        };
        (stream, drops)
    }
}

impl Read for DropCountingStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl FontStream for DropCountingStream {
    fn name(&self) -> &str {
        "drop-counting"
    }
}

impl Drop for DropCountingStream {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn released(drops: &AtomicUsize) -> usize {
    drops.load(Ordering::SeqCst)
}
