use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::config::{Buffering, LineOptions, TextOptions};
use crate::error::{Error, Result};
use crate::progress::line_progress;
use crate::text::codec::encode;
use crate::text::strip;

/// Write `lines` to `path`, one record per line, truncating any previous content.
///
/// Each record is normalized like [`read_lines`](crate::text::read_lines) does
/// and followed by a single terminator. Returns the number of records written
/// once the file has been flushed and closed.
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I, options: &LineOptions) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sink = LineSink::create(path.as_ref(), &options.text, options.progress)?;

    for line in lines {
        let line = line.as_ref();
        let line = if options.strip { strip(line) } else { line };
        if options.skip_empty && line.is_empty() {
            continue;
        }
        sink.write_line(line)?;
    }

    sink.finish()
}

struct LineSink {
    path: PathBuf,
    out: BufWriter<File>,
    text: TextOptions,
    progress: ProgressBar,
    written: usize,
}

impl LineSink {
    fn create(path: &Path, text: &TextOptions, progress: bool) -> Result<Self> {
        // checked before File::create so a bad setting never truncates the target
        let capacity = text
            .buffering
            .capacity()
            .map_err(|source| Error::io("opening for write", path, source))?;
        let file = File::create(path).map_err(|source| Error::io("opening for write", path, source))?;
        let out = match capacity {
            Some(capacity) => BufWriter::with_capacity(capacity, file),
            None => BufWriter::new(file),
        };
        tracing::debug!(path = %path.display(), encoding = %text.encoding, "writing lines");

        Ok(Self {
            path: path.to_path_buf(),
            out,
            text: *text,
            progress: line_progress(progress, "write"),
            written: 0,
        })
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let terminator = self.text.newline.write_terminator();
        let mut record = if terminator == "\n" {
            line.to_string()
        } else {
            line.replace('\n', terminator)
        };
        record.push_str(terminator);

        let bytes = encode(&record, self.text.encoding, self.text.errors)
            .map_err(|source| Error::io_line(&self.path, self.written, source))?;
        self.out
            .write_all(&bytes)
            .map_err(|source| Error::io_line(&self.path, self.written, source))?;
        if self.text.buffering == Buffering::Line {
            self.out
                .flush()
                .map_err(|source| Error::io_line(&self.path, self.written, source))?;
        }

        self.written += 1;
        self.progress.inc(1);
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        self.out
            .flush()
            .map_err(|source| Error::io("flushing", &self.path, source))?;
        self.progress.finish();
        tracing::debug!(path = %self.path.display(), lines = self.written, "finished writing lines");
        Ok(self.written)
    }
}

impl Drop for LineSink {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.progress.abandon();
        }
    }
}
