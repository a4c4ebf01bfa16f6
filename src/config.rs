use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Character encoding used to decode and encode file contents.
///
/// Only ASCII-compatible encodings are supported, so line terminators can be
/// located on the raw bytes before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unsupported encoding: {}", other)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf-8"),
            Encoding::Ascii => f.write_str("ascii"),
            Encoding::Latin1 => f.write_str("latin-1"),
        }
    }
}

/// What to do with bytes or characters the encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Fail with an `InvalidData` I/O error.
    #[default]
    Strict,
    /// Substitute U+FFFD when decoding and `?` when encoding.
    Replace,
    /// Drop the offending input.
    Ignore,
}

impl FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ErrorMode::Strict),
            "replace" => Ok(ErrorMode::Replace),
            "ignore" => Ok(ErrorMode::Ignore),
            other => Err(format!("unsupported error mode: {}", other)),
        }
    }
}

/// Line terminator recognition and translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Newline {
    /// Read: `\n`, `\r` and `\r\n` end a line and are translated to `\n`.
    /// Write: `\n` becomes the platform line separator.
    #[default]
    Universal,
    /// Read: all three terminators are recognized but left as they are.
    /// Write: no translation.
    Untranslated,
    Lf,
    Cr,
    #[serde(alias = "crlf")]
    CrLf,
}

impl Newline {
    /// Terminator emitted for each `\n` on write.
    pub fn write_terminator(&self) -> &'static str {
        match self {
            Newline::Universal => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Newline::Untranslated | Newline::Lf => "\n",
            Newline::Cr => "\r",
            Newline::CrLf => "\r\n",
        }
    }
}

impl FromStr for Newline {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "universal" | "none" => Ok(Newline::Universal),
            "untranslated" | "" => Ok(Newline::Untranslated),
            "lf" | "\n" | "\\n" => Ok(Newline::Lf),
            "cr" | "\r" | "\\r" => Ok(Newline::Cr),
            "crlf" | "\r\n" | "\\r\\n" => Ok(Newline::CrLf),
            other => Err(format!("unsupported newline mode: {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Buffering {
    #[default]
    Default,
    /// Flush after every line on write; default buffer on read.
    Line,
    Size(usize),
}

impl Buffering {
    /// Explicit buffer capacity, if any. `Size(0)` is rejected with `InvalidInput`.
    pub fn capacity(&self) -> io::Result<Option<usize>> {
        match self {
            Buffering::Size(0) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "buffer size must be positive",
            )),
            Buffering::Size(capacity) => Ok(Some(*capacity)),
            Buffering::Default | Buffering::Line => Ok(None),
        }
    }
}

impl FromStr for Buffering {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "-1" => Ok(Buffering::Default),
            "line" | "1" => Ok(Buffering::Line),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .map(Buffering::Size)
                .ok_or_else(|| format!("invalid buffering: {}", other)),
        }
    }
}

/// Settings handed through to the text codec when a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub encoding: Encoding,
    pub errors: ErrorMode,
    pub newline: Newline,
    pub buffering: Buffering,
}

impl TextOptions {
    /// Load text defaults from a JSON file, e.g. `{"encoding": "latin1", "newline": "crlf"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| Error::io("reading config", path, source))?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Options for [`read_lines`](crate::text::read_lines) and [`write_lines`](crate::text::write_lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    pub text: TextOptions,
    /// Remove leading and trailing whitespace, terminator included.
    pub strip: bool,
    /// Drop records that are empty after the optional strip.
    pub skip_empty: bool,
    /// Draw a spinner on stderr while lines flow.
    pub progress: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            text: TextOptions::default(),
            strip: true,
            skip_empty: false,
            progress: false,
        }
    }
}

impl LineOptions {
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn text(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct JsonReadOptions {
    pub text: TextOptions,
    /// Drop records that decode to a falsy value.
    pub skip_empty: bool,
    /// Skip malformed lines instead of ending the stream with an error.
    pub ignore_errors: bool,
    /// Do not log malformed lines.
    pub silent: bool,
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonWriteOptions {
    pub text: TextOptions,
    pub skip_empty: bool,
    /// Escape every non-ASCII character as `\uXXXX`.
    pub ascii_only: bool,
    pub ignore_errors: bool,
    pub silent: bool,
    pub progress: bool,
}

impl Default for JsonWriteOptions {
    fn default() -> Self {
        Self {
            text: TextOptions::default(),
            skip_empty: false,
            ascii_only: true,
            ignore_errors: false,
            silent: false,
            progress: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectoryOptions {
    /// Fail unless the path already is a directory.
    pub exists: bool,
    /// Remove whatever is at the path and recreate it empty. Destructive.
    pub reset: bool,
    /// Create the directory and its parents when absent.
    pub touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileOptions {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codec_names() {
        assert_eq!("UTF8".parse::<Encoding>(), Ok(Encoding::Utf8));
        assert_eq!("iso_8859_1".parse::<Encoding>(), Ok(Encoding::Latin1));
        assert!("utf-16".parse::<Encoding>().is_err());
        assert_eq!("\r\n".parse::<Newline>(), Ok(Newline::CrLf));
        assert_eq!("".parse::<Newline>(), Ok(Newline::Untranslated));
        assert_eq!("4096".parse::<Buffering>(), Ok(Buffering::Size(4096)));
        assert!("0".parse::<Buffering>().is_err());
    }

    #[test]
    fn deserializes_partial_text_options() {
        let opts: TextOptions =
            serde_json::from_str(r#"{"encoding": "latin1", "newline": "cr_lf"}"#).unwrap();
        assert_eq!(opts.encoding, Encoding::Latin1);
        assert_eq!(opts.newline, Newline::CrLf);
        assert_eq!(opts.errors, ErrorMode::Strict);
        assert_eq!(opts.buffering, Buffering::Default);
    }

    #[test]
    fn malformed_config_file_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linekit.json");
        std::fs::write(&path, "{\n  \"encoding\": \"utf-16\"\n}\n").unwrap();

        match TextOptions::from_json_file(&path) {
            Err(Error::Config { source, .. }) => assert_eq!(source.line(), 2),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn zero_buffer_size_is_rejected() {
        let opts: TextOptions = serde_json::from_str(r#"{"buffering": {"size": 0}}"#).unwrap();
        let err = opts.buffering.capacity().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(Buffering::Size(64).capacity().unwrap(), Some(64));
        assert_eq!(Buffering::Line.capacity().unwrap(), None);
    }

    #[test]
    fn line_defaults_strip_but_keep_empty() {
        let opts = LineOptions::default();
        assert!(opts.strip);
        assert!(!opts.skip_empty);
        assert!(JsonWriteOptions::default().ascii_only);
    }
}
