//! Line terminator handling.
//!
//! All three terminator styles (`\n`, `\r\n`, `\r`) are recognized everywhere.
//! A `\r\n` pair always counts as a single terminator.

use serde::{Deserialize, Serialize};

/// The line ending a document uses at region boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// The style of the first terminator in `text`, or `Lf` if there is none.
    pub fn detect(text: &str) -> Self {
        match text.find(['\n', '\r']) {
            Some(idx) if text[idx..].starts_with("\r\n") => LineEnding::Crlf,
            Some(idx) if text.as_bytes()[idx] == b'\r' => LineEnding::Cr,
            _ => LineEnding::Lf,
        }
    }

    fn from_terminator(terminator: &str) -> Option<Self> {
        match terminator {
            "\n" => Some(LineEnding::Lf),
            "\r\n" => Some(LineEnding::Crlf),
            "\r" => Some(LineEnding::Cr),
            _ => None,
        }
    }
}

/// Returns true if `text` is exactly one line terminator.
pub fn is_terminator(text: &str) -> bool {
    LineEnding::from_terminator(text).is_some()
}

/// Returns true if `text` holds only non-terminator whitespace.
pub fn is_horizontal_whitespace(text: &str) -> bool {
    text.chars().all(|ch| ch.is_whitespace() && ch != '\n' && ch != '\r')
}

/// The text after the last line terminator in `text`.
pub fn last_line(text: &str) -> &str {
    match text.rfind(['\n', '\r']) {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}

/// Split a single trailing terminator off `text`.
pub fn strip_trailing_terminator(text: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = text.strip_suffix("\r\n") {
        (stripped, Some("\r\n"))
    } else if let Some(stripped) = text.strip_suffix('\n') {
        (stripped, Some("\n"))
    } else if let Some(stripped) = text.strip_suffix('\r') {
        (stripped, Some("\r"))
    } else {
        (text, None)
    }
}

/// Number of line terminators in `text`.
pub fn count_terminators(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

/// One line of text together with the terminator that ended it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// `None` for the final line, which runs to the end of the input.
    pub terminator: Option<&'a str>,
}

/// Iterator over the lines of a string, keeping each line's terminator.
///
/// Always yields at least one line: the empty string produces a single
/// empty line, and text ending in a terminator produces a trailing empty
/// line.
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        let rest = self.rest?;
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[idx + len..]);
                Some(Line {
                    text: &rest[..idx],
                    terminator: Some(&rest[idx..idx + len]),
                })
            }
            None => {
                self.rest = None;
                Some(Line {
                    text: rest,
                    terminator: None,
                })
            }
        }
    }
}

pub fn lines(text: &str) -> Lines<'_> {
    Lines { rest: Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(LineEnding::detect(""), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Cr);
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line(""), "");
        assert_eq!(last_line("  "), "  ");
        assert_eq!(last_line("x = 1\n  "), "  ");
        assert_eq!(last_line("x = 1\r\n\t"), "\t");
        assert_eq!(last_line("x\r"), "");
    }

    #[test]
    fn test_strip_trailing_terminator() {
        assert_eq!(strip_trailing_terminator("a\r\n"), ("a", Some("\r\n")));
        assert_eq!(strip_trailing_terminator("a\n\n"), ("a\n", Some("\n")));
        assert_eq!(strip_trailing_terminator("a\r"), ("a", Some("\r")));
        assert_eq!(strip_trailing_terminator("a"), ("a", None));
    }

    #[test]
    fn test_count_terminators() {
        assert_eq!(count_terminators(""), 0);
        assert_eq!(count_terminators("a\nb\r\nc\rd"), 3);
        assert_eq!(count_terminators("\r\n\r\n"), 2);
    }

    #[test]
    fn test_lines_keep_terminators() {
        let collected: Vec<_> = lines("a\r\nb\n").collect();
        assert_eq!(
            collected,
            vec![
                Line { text: "a", terminator: Some("\r\n") },
                Line { text: "b", terminator: Some("\n") },
                Line { text: "", terminator: None },
            ]
        );
        assert_eq!(lines("").count(), 1);
        assert_eq!(lines("one").next().map(|l| l.text), Some("one"));
    }

    #[test]
    fn test_whitespace_checks() {
        assert!(is_horizontal_whitespace(""));
        assert!(is_horizontal_whitespace(" \t "));
        assert!(!is_horizontal_whitespace(" \n"));
        assert!(!is_horizontal_whitespace(" a"));
        assert!(is_terminator("\r\n"));
        assert!(!is_terminator("\n\n"));
    }
}
