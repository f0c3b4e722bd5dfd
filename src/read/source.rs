use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where the lines of a `LineSource` come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    /// A reader opened (and owned) by the caller, such as standard input.
    OpenHandle,
    /// A named pipe, opened by the source.
    PipePath(PathBuf),
    /// A regular file, opened by the source.
    FilePath(PathBuf),
}

enum Reader<'a> {
    Borrowed(&'a mut dyn BufRead),
    Owned(BufReader<File>),
}

/// A forward-only reader of text lines over a file, a named pipe or an
/// already open reader.
///
/// Sources opened from a path own their file and close it exactly once:
/// either when the last line has been read or when `release` is called,
/// whatever happens first.  Borrowed readers are never closed.
pub struct LineSource<'a> {
    name: String,
    kind: SourceKind,
    reader: Option<Reader<'a>>,
    line_no: usize,
    buf: String,
}

impl<'a> LineSource<'a> {
    /// Wraps a reader the caller already opened.
    pub fn from_reader(name: &str, reader: &'a mut dyn BufRead) -> Self {
        Self::new(name.to_string(), SourceKind::OpenHandle, Reader::Borrowed(reader))
    }

    /// Opens `path`, telling apart named pipes from regular files.
    pub fn open(path: &Path) -> Result<LineSource<'static>> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let kind = if is_fifo(&metadata) {
            SourceKind::PipePath(path.to_path_buf())
        } else {
            SourceKind::FilePath(path.to_path_buf())
        };
        let fd = File::open(path).map_err(|e| Error::io(path, e))?;
        debug!("Opened {} as {:?}", path.display(), kind);
        Ok(LineSource::new(
            path.display().to_string(),
            kind,
            Reader::Owned(BufReader::new(fd)),
        ))
    }

    fn new(name: String, kind: SourceKind, reader: Reader<'a>) -> Self {
        LineSource {
            name,
            kind,
            reader: Some(reader),
            line_no: 0,
            buf: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    /// Number of lines read so far, which is also the 1-based number of the
    /// last line returned.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Whether the source has been exhausted or released.
    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }

    /// Returns the next line without its line terminator, or `None` at end of
    /// data.  Reaching the end releases the source.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };
        self.buf.clear();
        let read = match reader {
            Reader::Borrowed(r) => r.read_line(&mut self.buf),
            Reader::Owned(r) => r.read_line(&mut self.buf),
        };
        match read {
            Ok(0) => {
                self.release();
                Ok(None)
            }
            Ok(_) => {
                self.line_no += 1;
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                Ok(Some(self.buf.as_str()))
            }
            Err(error) => {
                self.release();
                Err(Error::io(&self.name, error))
            }
        }
    }

    /// Stops reading.  Files opened by this source are closed; calling this
    /// more than once does nothing.
    pub fn release(&mut self) {
        if let Some(reader) = self.reader.take() {
            if let Reader::Owned(_) = reader {
                debug!("Closing {}", self.name);
            }
        }
    }
}

impl Drop for LineSource<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(unix)]
fn is_fifo(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    metadata.file_type().is_fifo()
}

#[cfg(not(unix))]
fn is_fifo(_metadata: &fs::Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn collect(source: &mut LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line.to_string());
        }
        lines
    }

    #[test]
    fn reads_file_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1 2").unwrap();
        write!(file, "3 4\r\n5 6").unwrap();
        let mut source = LineSource::open(file.path()).unwrap();
        assert_eq!(source.kind(), &SourceKind::FilePath(file.path().to_path_buf()));
        assert_eq!(collect(&mut source), ["1 2", "3 4", "5 6"]);
        assert_eq!(source.line_no(), 3);
        assert!(source.is_released());
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn release_twice_is_noop() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1").unwrap();
        writeln!(file, "2").unwrap();
        let mut source = LineSource::open(file.path()).unwrap();
        assert_eq!(source.next_line().unwrap(), Some("1"));
        source.release();
        assert!(source.is_released());
        source.release();
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn borrowed_reader_survives_source() {
        let mut cursor = Cursor::new("a\nb\nc\n".as_bytes());
        {
            let mut source = LineSource::from_reader("<test>", &mut cursor);
            assert_eq!(source.kind(), &SourceKind::OpenHandle);
            assert_eq!(source.next_line().unwrap(), Some("a"));
            source.release();
            source.release();
        }
        // The reader is still usable by its owner
        let mut rest = String::new();
        cursor.read_line(&mut rest).unwrap();
        assert_eq!(rest, "b\n");
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match LineSource::open(&path) {
            Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
            _ => panic!("Opening a missing file should fail"),
        }
    }

    #[test]
    fn empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut source = LineSource::open(file.path()).unwrap();
        assert!(collect(&mut source).is_empty());
        assert_eq!(source.line_no(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn reads_named_pipe() {
        use std::fs::OpenOptions;
        use std::process::Command;
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.fifo");
        let status = Command::new("mkfifo").arg(&path).status().unwrap();
        assert!(status.success());
        let writer_path = path.clone();
        let writer = thread::spawn(move || {
            let mut fifo = OpenOptions::new().write(true).open(writer_path).unwrap();
            write!(fifo, "1 2\n3 4\n").unwrap();
        });
        let mut source = LineSource::open(&path).unwrap();
        assert_eq!(source.kind(), &SourceKind::PipePath(path.clone()));
        assert_eq!(source.next_line().unwrap(), Some("1 2"));
        assert_eq!(source.next_line().unwrap(), Some("3 4"));
        writer.join().unwrap();
        assert!(!source.is_released());
        assert!(source.next_line().unwrap().is_none());
        assert!(source.is_released());
    }
}
