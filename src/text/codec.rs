use std::io;

use crate::config::{Encoding, ErrorMode};

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Decode one line worth of bytes. The bytes never contain a line terminator.
pub(crate) fn decode(bytes: &[u8], encoding: Encoding, errors: ErrorMode) -> io::Result<String> {
    match encoding {
        Encoding::Utf8 => decode_utf8(bytes, errors),
        Encoding::Ascii => {
            let mut out = String::with_capacity(bytes.len());
            for (offset, byte) in bytes.iter().enumerate() {
                if byte.is_ascii() {
                    out.push(*byte as char);
                    continue;
                }
                match errors {
                    ErrorMode::Strict => {
                        return Err(invalid_data(format!(
                            "ascii codec can't decode byte 0x{:02x} at offset {}",
                            byte, offset
                        )))
                    }
                    ErrorMode::Replace => out.push(char::REPLACEMENT_CHARACTER),
                    ErrorMode::Ignore => {}
                }
            }
            Ok(out)
        }
        // every byte maps to the code point of the same value
        Encoding::Latin1 => Ok(bytes.iter().map(|b| *b as char).collect()),
    }
}

fn decode_utf8(bytes: &[u8], errors: ErrorMode) -> io::Result<String> {
    match errors {
        ErrorMode::Strict => String::from_utf8(bytes.to_vec())
            .map_err(|e| invalid_data(format!("utf-8 codec can't decode line: {}", e))),
        ErrorMode::Replace => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ErrorMode::Ignore => {
            let mut out = String::with_capacity(bytes.len());
            let mut rest = bytes;
            loop {
                match std::str::from_utf8(rest) {
                    Ok(valid) => {
                        out.push_str(valid);
                        return Ok(out);
                    }
                    Err(e) => {
                        let (valid, invalid) = rest.split_at(e.valid_up_to());
                        if let Ok(valid) = std::str::from_utf8(valid) {
                            out.push_str(valid);
                        }
                        let skip = e.error_len().unwrap_or(invalid.len());
                        rest = &invalid[skip..];
                    }
                }
            }
        }
    }
}

pub(crate) fn encode(text: &str, encoding: Encoding, errors: ErrorMode) -> io::Result<Vec<u8>> {
    let limit = match encoding {
        Encoding::Utf8 => return Ok(text.as_bytes().to_vec()),
        Encoding::Ascii => 0x7f,
        Encoding::Latin1 => 0xff,
    };

    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        if code <= limit {
            out.push(code as u8);
            continue;
        }
        match errors {
            ErrorMode::Strict => {
                return Err(invalid_data(format!(
                    "{} codec can't encode character {:?}",
                    encoding, ch
                )))
            }
            ErrorMode::Replace => out.push(b'?'),
            ErrorMode::Ignore => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_error_modes() {
        let bytes = b"ok\xffdone";
        assert!(decode(bytes, Encoding::Utf8, ErrorMode::Strict).is_err());
        assert_eq!(
            decode(bytes, Encoding::Utf8, ErrorMode::Replace).unwrap(),
            "ok\u{fffd}done"
        );
        assert_eq!(
            decode(bytes, Encoding::Utf8, ErrorMode::Ignore).unwrap(),
            "okdone"
        );
    }

    #[test]
    fn truncated_utf8_sequence_is_ignored() {
        // first two bytes of a three byte sequence
        let bytes = b"ab\xe4\xb8";
        assert_eq!(decode(bytes, Encoding::Utf8, ErrorMode::Ignore).unwrap(), "ab");
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(
            decode(b"caf\xe9", Encoding::Latin1, ErrorMode::Strict).unwrap(),
            "café"
        );
        assert_eq!(
            encode("café", Encoding::Latin1, ErrorMode::Strict).unwrap(),
            b"caf\xe9"
        );
        assert!(encode("中", Encoding::Latin1, ErrorMode::Strict).is_err());
    }

    #[test]
    fn ascii_replace_and_ignore() {
        assert_eq!(
            encode("naïve", Encoding::Ascii, ErrorMode::Replace).unwrap(),
            b"na?ve"
        );
        assert_eq!(
            encode("naïve", Encoding::Ascii, ErrorMode::Ignore).unwrap(),
            b"nave"
        );
        assert_eq!(
            decode(b"na\xefve", Encoding::Ascii, ErrorMode::Replace).unwrap(),
            "na\u{fffd}ve"
        );
        let err = decode(b"\x80", Encoding::Ascii, ErrorMode::Strict).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
