use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use fontmgr_traits::{FontError, FontStream};

/// A font stream reading from a file on disk.
///
/// The file handle is closed when the stream is dropped.
#[derive(Debug)]
pub struct FileFontStream {
    path: PathBuf,
    label: String,
    length: Option<usize>,
    reader: BufReader<File>,
}

impl FileFontStream {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LoadFailed` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| FontError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let length = file.metadata().ok().map(|m| m.len() as usize);
        log::debug!("Opened font stream {} ({:?} bytes)", path.display(), length);
        Ok(Self {
            label: path.display().to_string(),
            path,
            length,
            reader: BufReader::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for FileFontStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl FontStream for FileFontStream {
    fn name(&self) -> &str {
        &self.label
    }

    fn length(&self) -> Option<usize> {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontmgr_traits::read_stream;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_stream_reads_contents() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("face.ttf");
        fs::write(&file_path, b"\x00\x01\x00\x00rest").unwrap();

        let stream = FileFontStream::open(&file_path).unwrap();
        assert_eq!(stream.length(), Some(8));
        assert_eq!(stream.path(), file_path.as_path());

        let data = read_stream(Box::new(stream)).unwrap();
        assert_eq!(&*data, b"\x00\x01\x00\x00rest");
    }

    #[test]
    fn test_file_stream_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileFontStream::open(dir.path().join("missing.otf"));
        assert!(matches!(result, Err(FontError::LoadFailed { .. })));
    }
}
