use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{JsonReadOptions, LineOptions};
use crate::error::{Error, Result};
use crate::jsonl::is_falsy;
use crate::text::LineReader;

/// Lazy sequence of records decoded from a JSON Lines file.
pub struct JsonLines<T> {
    lines: LineReader,
    options: JsonReadOptions,
    done: bool,
    _record: PhantomData<fn() -> T>,
}

/// Stream one JSON value per non-blank line of `path`.
///
/// A malformed line is logged unless `silent` is set. It ends the sequence
/// with [`Error::Decode`] unless `ignore_errors` is set, in which case it is
/// skipped.
pub fn read_json_lines<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    options: &JsonReadOptions,
) -> Result<JsonLines<T>> {
    let line_options = LineOptions {
        text: options.text,
        strip: true,
        skip_empty: true,
        progress: options.progress,
    };
    Ok(JsonLines {
        lines: LineReader::open(path.as_ref(), &line_options)?,
        options: *options,
        done: false,
        _record: PhantomData,
    })
}

fn parse_record<T: DeserializeOwned>(
    line: &str,
    skip_empty: bool,
) -> std::result::Result<Option<T>, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    if skip_empty && is_falsy(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

impl<T: DeserializeOwned> Iterator for JsonLines<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let (index, line) = match self.lines.next_indexed()? {
                Ok(record) => record,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            match parse_record(&line, self.options.skip_empty) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(source) => {
                    if !self.options.silent {
                        tracing::warn!(
                            path = %self.lines.path().display(),
                            line = index,
                            content = %line,
                            error = %source,
                            "malformed JSON line"
                        );
                    }
                    if !self.options.ignore_errors {
                        self.done = true;
                        return Some(Err(Error::decode(self.lines.path(), index, source)));
                    }
                }
            }
        }
        None
    }
}
