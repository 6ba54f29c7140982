//! Line scanner for Markdown input.
//!
//! Splits on `\n`, `\r\n` and lone `\r`, using memchr to jump between
//! terminators instead of walking the input byte by byte.

use memchr::memchr2;

/// Iterator over the lines of a text buffer, terminators excluded.
///
/// A trailing terminator does not produce a final empty line, and an empty
/// input produces no lines at all.
///
/// # Example
/// ```
/// use ferropdf::Lines;
///
/// let lines: Vec<&str> = Lines::new("one\r\ntwo\n\nthree\n").collect();
/// assert_eq!(lines, ["one", "two", "", "three"]);
/// ```
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lines<'a> {
    /// Create a scanner over `input`.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Whether every line has been consumed.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.is_eof() {
            return None;
        }

        let rest = &self.input.as_bytes()[self.pos..];
        let start = self.pos;
        match memchr2(b'\n', b'\r', rest) {
            Some(idx) => {
                let end = start + idx;
                // Treat CRLF as a single terminator.
                let skip = if rest[idx] == b'\r' && rest.get(idx + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                self.pos = end + skip;
                // Terminators are ASCII, so both offsets sit on char boundaries.
                Some(&self.input[start..end])
            }
            None => {
                self.pos = self.input.len();
                Some(&self.input[start..])
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.input.len() - self.pos;
        (usize::from(remaining > 0), Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<&str> {
        Lines::new(input).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(lines("a\nb"), ["a", "b"]);
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        assert_eq!(lines("a\n"), ["a"]);
        assert_eq!(lines("\n"), [""]);
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(lines("a\r\nb\rc\nd"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(lines("a\n\n\nb"), ["a", "", "", "b"]);
        assert_eq!(lines("a\r\n\r\nb"), ["a", "", "b"]);
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(lines("héllo\nwörld"), ["héllo", "wörld"]);
    }

    #[test]
    fn test_scanner_exhausts() {
        let mut scanner = Lines::new("ab\ncd");
        assert_eq!(scanner.size_hint(), (1, Some(5)));
        assert_eq!(scanner.next(), Some("ab"));
        assert_eq!(scanner.size_hint(), (1, Some(2)));
        assert_eq!(scanner.next(), Some("cd"));
        assert!(scanner.is_eof());
        assert_eq!(scanner.size_hint(), (0, Some(0)));
        assert_eq!(scanner.next(), None);
    }
}
