//! Readable font resources that are moved into creation calls.
//!
//! A `Box<dyn FontStream>` passed to `FontManager::create_from_stream` belongs
//! to the callee from then on. Whatever the outcome, the callee drops it.

use std::fmt::Debug;
use std::io::{self, Read};
use std::sync::Arc;

use crate::error::FontError;
use crate::typeface::FontData;

pub trait FontStream: Read + Send + Debug {
    /// A label for logs, typically a path or "memory".
    fn name(&self) -> &str;

    /// Total length in bytes, if known up front.
    fn length(&self) -> Option<usize> {
        None
    }
}

/// Drains `stream` into shared font bytes, releasing the stream on every path.
///
/// # Errors
///
/// Returns `FontError::LoadFailed` if reading fails part way.
pub fn read_stream(mut stream: Box<dyn FontStream>) -> Result<FontData, FontError> {
    let mut bytes = Vec::with_capacity(stream.length().unwrap_or(0));
    stream
        .read_to_end(&mut bytes)
        .map_err(|e| FontError::LoadFailed {
            path: stream.name().to_string(),
            message: e.to_string(),
        })?;
    Ok(Arc::new(bytes))
}

/// A stream over bytes already in memory.
#[derive(Debug, Clone)]
pub struct MemoryFontStream {
    data: FontData,
    position: usize,
}

impl MemoryFontStream {
    pub fn new(data: FontData) -> Self {
        Self { data, position: 0 }
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self::new(Arc::new(bytes))
    }
}

impl Read for MemoryFontStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let start = self.position.min(self.data.len());
        let remaining = &self.data[start..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position = start + n;
        Ok(n)
    }
}

impl FontStream for MemoryFontStream {
    fn name(&self) -> &str {
        "memory"
    }

    fn length(&self) -> Option<usize> {
        Some(self.data.len())
    }
}
