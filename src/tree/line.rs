//! Parsing of individual scan lines: `<size><whitespace><path>[/]`

use std::sync::LazyLock;

use regex::Regex;

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\s+(.*)$").expect("line pattern is a valid regex")
});

/// The two fields of a scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLine<'a> {
    pub size: u64,
    /// Path with surrounding whitespace and one trailing `/` removed.
    pub path: &'a str,
}

/// Parse a full scan line. Returns `None` if it doesn't fit the grammar or the
/// size doesn't fit in a `u64`.
pub fn parse_line(line: &str) -> Option<ScanLine<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = LINE_PATTERN.captures(line)?;
    let size = caps.get(1)?.as_str().parse().ok()?;
    let path = caps.get(2)?.as_str().trim();
    let path = path.strip_suffix('/').unwrap_or(path).trim_end();
    Some(ScanLine { size, path })
}

/// Size from the leading digits of a line, without validating the rest.
///
/// Lines without leading digits count as 0; values too large for `u64`
/// saturate so they are never mistaken for small entries.
pub fn leading_size(line: &str) -> u64 {
    line.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
}

/// If `path` is `parent` followed by exactly one more segment (`/name`),
/// return that segment including its leading separator.
pub fn child_segment<'a>(path: &'a str, parent: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(parent)?;
    let name = rest.strip_prefix('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        assert_eq!(
            parse_line("35\t/a"),
            Some(ScanLine { size: 35, path: "/a" })
        );
        assert_eq!(
            parse_line("10 ./src/main.rs"),
            Some(ScanLine { size: 10, path: "./src/main.rs" })
        );
    }

    #[test]
    fn test_parse_strips_trailing_separator_and_cr() {
        assert_eq!(parse_line("8\t/a/b/"), Some(ScanLine { size: 8, path: "/a/b" }));
        assert_eq!(parse_line("8\t/a/b\r"), Some(ScanLine { size: 8, path: "/a/b" }));
        assert_eq!(parse_line("1024\t/"), Some(ScanLine { size: 1024, path: "" }));
    }

    #[test]
    fn test_parse_strips_separator_before_trailing_whitespace() {
        assert_eq!(parse_line("10 /a/b/ "), Some(ScanLine { size: 10, path: "/a/b" }));
        assert_eq!(parse_line("10 /a/b/\t\r"), Some(ScanLine { size: 10, path: "/a/b" }));
        assert_eq!(parse_line("3 / "), Some(ScanLine { size: 3, path: "" }));
    }

    #[test]
    fn test_parse_keeps_inner_spaces() {
        assert_eq!(
            parse_line("4\t./My Documents/a b.txt"),
            Some(ScanLine { size: 4, path: "./My Documents/a b.txt" })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("abc /a"), None);
        assert_eq!(parse_line("12/a"), None);
        assert_eq!(parse_line("-3 /a"), None);
        assert_eq!(parse_line("99999999999999999999999 /a"), None);
    }

    #[test]
    fn test_leading_size() {
        assert_eq!(leading_size("42\t/x"), 42);
        assert_eq!(leading_size("junk"), 0);
        assert_eq!(leading_size(""), 0);
        assert_eq!(leading_size("99999999999999999999999 /a"), u64::MAX);
    }

    #[test]
    fn test_child_segment() {
        assert_eq!(child_segment("/a/b", "/a"), Some("/b"));
        assert_eq!(child_segment("./x", "."), Some("/x"));
        assert_eq!(child_segment("/usr", ""), Some("/usr"));
        assert_eq!(child_segment("/a/b/x", "/a"), None);
        assert_eq!(child_segment("/ab", "/a"), None);
        assert_eq!(child_segment("/a", "/a"), None);
        assert_eq!(child_segment("/a/", "/a"), None);
        assert_eq!(child_segment("/b/c", "/a"), None);
    }
}
