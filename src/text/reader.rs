use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::config::{LineOptions, Newline};
use crate::error::{Error, Result};
use crate::progress::line_progress;
use crate::text::codec::decode;
use crate::text::strip;

/// Lazy, single-pass sequence of lines read from a file.
///
/// The file handle lives exactly as long as the reader: it is closed when the
/// reader is dropped, whether it ran to the end, hit an error, or was
/// abandoned early. After an error the reader yields nothing further.
pub struct LineReader {
    path: PathBuf,
    inner: BufReader<File>,
    options: LineOptions,
    progress: ProgressBar,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

/// Open `path` and stream its lines according to `options`.
pub fn read_lines(path: impl AsRef<Path>, options: &LineOptions) -> Result<LineReader> {
    LineReader::open(path.as_ref(), options)
}

impl LineReader {
    pub fn open(path: &Path, options: &LineOptions) -> Result<Self> {
        let capacity = options
            .text
            .buffering
            .capacity()
            .map_err(|source| Error::io("opening for read", path, source))?;
        let file = File::open(path).map_err(|source| Error::io("opening for read", path, source))?;
        let inner = match capacity {
            Some(capacity) => BufReader::with_capacity(capacity, file),
            None => BufReader::new(file),
        };
        tracing::debug!(path = %path.display(), encoding = %options.text.encoding, "reading lines");

        Ok(Self {
            path: path.to_path_buf(),
            inner,
            options: *options,
            progress: line_progress(options.progress, "read"),
            buf: Vec::new(),
            line: 0,
            done: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next record paired with its 0-based physical line index.
    pub fn next_indexed(&mut self) -> Option<Result<(usize, String)>> {
        while !self.done {
            let index = self.line;
            match self.read_record() {
                Ok(Some((content, terminator))) => {
                    self.line += 1;
                    self.progress.inc(1);
                    if let Some(record) = self.normalize(content, terminator) {
                        return Some(Ok((index, record)));
                    }
                }
                Ok(None) => {
                    self.done = true;
                    self.progress.finish();
                }
                Err(source) => {
                    self.done = true;
                    self.progress.abandon();
                    return Some(Err(Error::io_line(&self.path, index, source)));
                }
            }
        }
        None
    }

    fn normalize(&self, content: String, terminator: &'static str) -> Option<String> {
        if self.options.strip {
            let stripped = strip(&content);
            if self.options.skip_empty && stripped.is_empty() {
                return None;
            }
            return Some(stripped.to_string());
        }

        if self.options.skip_empty && content.is_empty() {
            return None;
        }
        let mut record = content;
        record.push_str(terminator);
        Some(record)
    }

    /// Decoded line content and the terminator to hand back with it.
    fn read_record(&mut self) -> io::Result<Option<(String, &'static str)>> {
        self.buf.clear();
        let newline = self.options.text.newline;
        let terminator = match newline {
            Newline::Universal | Newline::Untranslated => self.read_universal()?,
            Newline::Lf => {
                self.inner.read_until(b'\n', &mut self.buf)?;
                if self.buf.ends_with(b"\n") { "\n" } else { "" }
            }
            Newline::Cr => {
                self.inner.read_until(b'\r', &mut self.buf)?;
                if self.buf.ends_with(b"\r") { "\r" } else { "" }
            }
            Newline::CrLf => self.read_crlf()?,
        };

        if self.buf.is_empty() {
            return Ok(None);
        }

        let content = &self.buf[..self.buf.len() - terminator.len()];
        let content = decode(content, self.options.text.encoding, self.options.text.errors)?;
        let terminator = match (newline, terminator) {
            (Newline::Universal, "") => "",
            (Newline::Universal, _) => "\n",
            (_, terminator) => terminator,
        };
        Ok(Some((content, terminator)))
    }

    fn read_universal(&mut self) -> io::Result<&'static str> {
        loop {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                return Ok("");
            }
            match available.iter().position(|b| *b == b'\n' || *b == b'\r') {
                Some(at) => {
                    let found = available[at];
                    self.buf.extend_from_slice(&available[..=at]);
                    self.inner.consume(at + 1);
                    if found == b'\n' {
                        return Ok("\n");
                    }
                    // a lone \r may be split from its \n by the buffer boundary
                    if self.inner.fill_buf()?.first() == Some(&b'\n') {
                        self.inner.consume(1);
                        self.buf.push(b'\n');
                        return Ok("\r\n");
                    }
                    return Ok("\r");
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
    }

    fn read_crlf(&mut self) -> io::Result<&'static str> {
        loop {
            let read = self.inner.read_until(b'\n', &mut self.buf)?;
            if self.buf.ends_with(b"\r\n") {
                return Ok("\r\n");
            }
            if read == 0 || !self.buf.ends_with(b"\n") {
                return Ok("");
            }
        }
    }
}

impl Iterator for LineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_indexed()
            .map(|record| record.map(|(_, line)| line))
    }
}

impl Drop for LineReader {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.progress.abandon();
        }
    }
}
