use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::config::{JsonWriteOptions, LineOptions};
use crate::error::{Error, Result};
use crate::jsonl::is_falsy;
use crate::text::write_lines;

/// Write each record of `records` to `path` as one compact JSON line.
///
/// Returns the number of records written. A record that fails to serialize
/// is logged unless `silent` is set, and aborts the write with
/// [`Error::Encode`] unless `ignore_errors` is set. Lines encoded before the
/// failure remain in the file.
pub fn write_json_lines<T, I>(
    path: impl AsRef<Path>,
    records: I,
    options: &JsonWriteOptions,
) -> Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let path = path.as_ref();
    let mut failure: Option<Error> = None;

    let lines = records
        .into_iter()
        .enumerate()
        .map_while(|(index, record)| match encode_record(&record, options) {
            Ok(line) => Some(line),
            Err(source) => {
                if !options.silent {
                    tracing::warn!(
                        path = %path.display(),
                        index,
                        error = %source,
                        "cannot serialize record"
                    );
                }
                if options.ignore_errors {
                    Some(None)
                } else {
                    failure = Some(Error::encode(path, index, source));
                    None
                }
            }
        })
        .flatten();

    let line_options = LineOptions {
        text: options.text,
        strip: false,
        skip_empty: false,
        progress: options.progress,
    };
    let written = write_lines(path, lines, &line_options)?;

    match failure {
        Some(e) => Err(e),
        None => Ok(written),
    }
}

/// `Ok(None)` when the record is falsy and empty records are skipped.
fn encode_record<T: Serialize>(
    record: &T,
    options: &JsonWriteOptions,
) -> std::result::Result<Option<String>, serde_json::Error> {
    let line = serde_json::to_string(record)?;
    if options.skip_empty && is_falsy(&serde_json::from_str::<Value>(&line)?) {
        return Ok(None);
    }
    if options.ascii_only {
        return Ok(Some(escape_non_ascii(&line)));
    }
    Ok(Some(line))
}

/// Replace every non-ASCII character with its `\uXXXX` escape.
///
/// Non-ASCII text can only appear inside JSON strings, where the escape is
/// equivalent to the literal character.
fn escape_non_ascii(line: &str) -> String {
    if line.is_ascii() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 16);
    let mut units = [0u16; 2];
    for ch in line.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units).iter() {
            out.push_str(&format!("\\u{:04x}", unit));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_bmp_and_astral_characters() {
        assert_eq!(escape_non_ascii(r#"{"k":"中文"}"#), r#"{"k":"\u4e2d\u6587"}"#);
        assert_eq!(escape_non_ascii(r#""😀""#), r#""\ud83d\ude00""#);
        assert_eq!(escape_non_ascii("plain"), "plain");
    }

    #[test]
    fn falsy_records_are_dropped_only_when_asked() {
        let mut options = JsonWriteOptions::default();
        assert_eq!(encode_record(&Vec::<u8>::new(), &options).unwrap().as_deref(), Some("[]"));
        options.skip_empty = true;
        assert_eq!(encode_record(&Vec::<u8>::new(), &options).unwrap(), None);
        assert_eq!(encode_record(&vec![1], &options).unwrap().as_deref(), Some("[1]"));
    }
}
