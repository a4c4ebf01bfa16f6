mod codec;
mod reader;
mod writer;

pub use reader::{read_lines, LineReader};
pub use writer::write_lines;

/// Trim surrounding whitespace, counting the ASCII separators `\x1c`..=`\x1f` as whitespace.
pub(crate) fn strip(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::strip;

    #[test]
    fn strip_removes_separators_and_unicode_space() {
        assert_eq!(strip("\x1c\x1d foo \x1e\x1f\r\n"), "foo");
        assert_eq!(strip("\u{3000}bar\u{a0}"), "bar");
        assert_eq!(strip("a\x1fb"), "a\x1fb");
    }
}
