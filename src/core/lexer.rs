//! Doc Block Lexer
//!
//! Splits source text into code blocks and doc blocks without parsing the
//! language. It only has to know two things:
//! - where comments cannot be: strings, here-documents and template
//!   literals are always code;
//! - outside those, where inline and block comments start.
//!
//! A comment becomes a doc block when it is the only thing on its line and
//! its marker is followed by a space (or nothing at all). Everything else is
//! code.
//!
//! The lexer is total: unterminated strings, heredocs and template literals
//! swallow the rest of the input as code rather than producing an error.

use std::borrow::Cow;
use std::collections::HashMap;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::core::escape::{literal_alternation, pattern_literal};
use crate::core::language::{LanguageDescriptor, TemplateLiterals};
use crate::core::text;

// =============================================================================
// BLOCK TYPES
// =============================================================================

/// A comment classified as documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Whitespace preceding an inline comment marker on its line. `None` for
    /// block comments, which are not tied to a line.
    pub indent: Option<String>,
    /// The comment token that introduced this block.
    pub marker: String,
    /// A single space separated the marker from the text.
    pub spaced: bool,
    /// For inline comments, the comment minus marker and separator, including
    /// the line terminator. For block comments, the full comment with both
    /// delimiters.
    pub text: String,
}

impl DocBlock {
    /// An inline doc block whose marker was followed by a space.
    pub fn inline(indent: &str, text: &str, marker: &str) -> Self {
        Self {
            indent: Some(indent.to_string()),
            marker: marker.to_string(),
            spaced: true,
            text: text.to_string(),
        }
    }

    /// The exact source text this block was lexed from.
    pub fn source(&self) -> String {
        match &self.indent {
            Some(indent) => {
                let separator = if self.spaced { " " } else { "" };
                format!("{}{}{}{}", indent, self.marker, separator, self.text)
            }
            None => self.text.clone(),
        }
    }
}

/// A classified span of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Code(String),
    Doc(DocBlock),
}

impl Block {
    pub fn code(text: &str) -> Self {
        Block::Code(text.to_string())
    }

    pub fn doc(indent: &str, text: &str, marker: &str) -> Self {
        Block::Doc(DocBlock::inline(indent, text, marker))
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Block::Code(_))
    }

    /// The exact source text this block was lexed from.
    pub fn source(&self) -> Cow<'_, str> {
        match self {
            Block::Code(text) => Cow::Borrowed(text),
            Block::Doc(doc) => Cow::Owned(doc.source()),
        }
    }
}

/// Concatenate the original source of every block.
pub fn to_source(blocks: &[Block]) -> String {
    blocks.iter().map(|b| b.source()).collect()
}

// =============================================================================
// OUTPUT ACCUMULATOR
// =============================================================================

#[derive(Default)]
struct Output {
    blocks: Vec<Block>,
    /// Code seen since the last doc block.
    code: String,
    /// The last doc block ended at the start of a line.
    doc_ended_line: bool,
}

impl Output {
    fn new() -> Self {
        Self {
            doc_ended_line: true,
            ..Self::default()
        }
    }

    /// The indent an inline comment starting now would have, or `None` if
    /// something other than whitespace precedes it on its line.
    fn pending_indent(&self) -> Option<&str> {
        let line = text::last_line(&self.code);
        let at_line_start = line.len() < self.code.len() || self.doc_ended_line;
        (at_line_start && text::is_horizontal_whitespace(line)).then_some(line)
    }

    fn flush_code(&mut self) {
        if !self.code.is_empty() {
            trace!(len = self.code.len(), "code block");
            self.blocks.push(Block::Code(std::mem::take(&mut self.code)));
        }
    }

    fn push_doc(&mut self, doc: DocBlock) {
        self.flush_code();
        trace!(marker = %doc.marker, len = doc.text.len(), "doc block");
        self.doc_ended_line =
            doc.text.is_empty() || text::strip_trailing_terminator(&doc.text).1.is_some();
        self.blocks.push(Block::Doc(doc));
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_code();
        self.blocks
    }
}

// =============================================================================
// LEXER
// =============================================================================

const BLOCK_COMMENT: &str = "block";
const LONG_STRING: &str = "long";
const INLINE_COMMENT: &str = "inline";
const SHORT_STRING: &str = "short";
const TEMPLATE: &str = "template";

/// Classifies source text for one language.
pub struct Lexer<'a> {
    language: &'a LanguageDescriptor,
    /// Every construct that starts a comment or a no-comment zone. `None`
    /// when the language has none, in which case everything is code.
    classify: Option<Regex>,
    /// Closing scan for each short-string quote.
    short_strings: HashMap<&'static str, Regex>,
    /// `(rule index, opening group, delimiter group)` per heredoc rule.
    heredoc_groups: Vec<(usize, String, String)>,
}

impl<'a> Lexer<'a> {
    pub fn new(language: &'a LanguageDescriptor) -> Self {
        let mut alternatives = Vec::new();
        let mut heredoc_groups = Vec::new();

        // Alternation is leftmost-first, so block comments and long strings
        // must come before the inline comments and short strings that could
        // be a prefix of them.
        let block_opens = language.block_comments.iter().map(|(open, _)| *open);
        push_group(&mut alternatives, BLOCK_COMMENT, literal_alternation(block_opens));
        push_group(
            &mut alternatives,
            LONG_STRING,
            literal_alternation(language.long_strings.iter().copied()),
        );
        for (i, rule) in language.heredocs.iter().enumerate() {
            if rule.start_prefix.is_empty() {
                continue;
            }
            let (group, delimiter) = (format!("heredoc{i}"), format!("delimiter{i}"));
            alternatives.push(format!("(?P<{}>{})", group, rule.start_pattern(&delimiter)));
            heredoc_groups.push((i, group, delimiter));
        }
        push_group(
            &mut alternatives,
            INLINE_COMMENT,
            literal_alternation(language.inline_comments.iter().copied()),
        );
        push_group(
            &mut alternatives,
            SHORT_STRING,
            literal_alternation(language.short_strings.iter().copied()),
        );
        if language.template_literals != TemplateLiterals::Unsupported {
            alternatives.push(format!("(?P<{}>`)", TEMPLATE));
        }

        let classify = (!alternatives.is_empty()).then(|| {
            Regex::new(&alternatives.join("|")).expect("language descriptor patterns must compile")
        });

        let short_strings = language
            .short_strings
            .iter()
            .filter(|q| !q.is_empty())
            .map(|&quote| {
                let q = pattern_literal(quote);
                // Escaped newlines, escaped characters, or anything but the
                // quote, a backslash or a newline; ended by the quote or a raw
                // newline so an unterminated string stops at its own line.
                let pattern = format!(
                    r"\A(?:\\\r\n|\\\n|\\\r|\\[^\r\n]|[^\\{q}\r\n])*(?:{q}|\r\n|\n|\r)"
                );
                let re = Regex::new(&pattern).expect("short string pattern must compile");
                (quote, re)
            })
            .collect();

        Self {
            language,
            classify,
            short_strings,
            heredoc_groups,
        }
    }

    /// Split `source` into code and doc blocks.
    ///
    /// Concatenating the [`Block::source`] of the result reproduces `source`
    /// exactly. Two code blocks are never adjacent.
    pub fn classify(&self, source: &str) -> Vec<Block> {
        let mut out = Output::new();
        let mut pos = 0;

        while pos < source.len() {
            let Some(caps) = self
                .classify
                .as_ref()
                .and_then(|re| re.captures_at(source, pos))
            else {
                out.code.push_str(&source[pos..]);
                break;
            };
            let (start, end) = caps.get(0).map_or((pos, pos), |m| (m.start(), m.end()));
            out.code.push_str(&source[pos..start]);
            pos = self.dispatch(&caps, source, start, end, &mut out);
        }

        let blocks = out.finish();
        debug!(
            language = self.language.name,
            blocks = blocks.len(),
            "classified source"
        );
        blocks
    }

    /// Handle one match, returning the offset to resume scanning from.
    fn dispatch(
        &self,
        caps: &Captures<'_>,
        source: &str,
        start: usize,
        end: usize,
        out: &mut Output,
    ) -> usize {
        if let Some(open) = caps.name(BLOCK_COMMENT) {
            self.block_comment(source, start, open.as_str(), out)
        } else if let Some(delimiter) = caps.name(LONG_STRING) {
            let body = start + delimiter.len();
            let stop = find_after(source, body, delimiter.as_str());
            out.code.push_str(&source[start..stop]);
            stop
        } else if let Some(stop) = self.heredoc(caps, source, end) {
            out.code.push_str(&source[start..stop]);
            stop
        } else if let Some(marker) = caps.name(INLINE_COMMENT) {
            inline_comment(source, start, marker.as_str(), out)
        } else if let Some(quote) = caps.name(SHORT_STRING) {
            let body = start + quote.len();
            let stop = self
                .short_strings
                .get(quote.as_str())
                .and_then(|re| re.find(&source[body..]))
                .map_or(source.len(), |m| body + m.end());
            out.code.push_str(&source[start..stop]);
            stop
        } else if caps.name(TEMPLATE).is_some() {
            let stop = template_literal_end(source, end);
            out.code.push_str(&source[start..stop]);
            stop
        } else {
            unreachable!("classify pattern matched without a known group")
        }
    }

    /// A block comment runs to its close token. Reaching another open token
    /// first also ends it; nesting is not tracked.
    fn block_comment(&self, source: &str, start: usize, open: &str, out: &mut Output) -> usize {
        let close = self.language.block_comment_close(open).unwrap_or(open);
        let body = start + open.len();
        let stop = [close, open]
            .into_iter()
            .filter_map(|token| source[body..].find(token).map(|i| (i, token.len())))
            .min_by_key(|&(i, _)| i)
            .map_or(source.len(), |(i, len)| body + i + len);
        out.push_doc(DocBlock {
            indent: None,
            marker: open.to_string(),
            spaced: false,
            text: source[start..stop].to_string(),
        });
        stop
    }

    /// If a heredoc opened at this match, the offset just past its end.
    fn heredoc(&self, caps: &Captures<'_>, source: &str, end: usize) -> Option<usize> {
        let (rule, _, delimiter) = self
            .heredoc_groups
            .iter()
            .find(|(_, group, _)| caps.name(group).is_some())?;
        let delimiter = caps.name(delimiter).map_or("", |m| m.as_str());
        let stop = Regex::new(&self.language.heredocs[*rule].stop_pattern(delimiter))
            .expect("escaped heredoc terminator must compile");
        Some(stop.find_at(source, end).map_or(source.len(), |m| m.end()))
    }
}

fn push_group(alternatives: &mut Vec<String>, name: &str, pattern: Option<String>) {
    if let Some(pattern) = pattern {
        alternatives.push(format!("(?P<{}>{})", name, pattern));
    }
}

/// Offset just past the next `needle` at or after `from`, or the end of input.
fn find_after(source: &str, from: usize, needle: &str) -> usize {
    source[from..]
        .find(needle)
        .map_or(source.len(), |i| from + i + needle.len())
}

/// Offset just past the first line terminator at or after `from` that is not
/// escaped by a backslash, or the end of input.
fn comment_end(source: &str, from: usize) -> usize {
    let mut search = from;
    while let Some(idx) = source[search..].find(['\n', '\r']).map(|i| search + i) {
        let len = if source[idx..].starts_with("\r\n") { 2 } else { 1 };
        if !source[..idx].ends_with('\\') {
            return idx + len;
        }
        search = idx + len;
    }
    source.len()
}

fn inline_comment(source: &str, start: usize, marker: &str, out: &mut Output) -> usize {
    let stop = comment_end(source, start + marker.len());
    let candidate = &source[start..stop];
    let after = &candidate[marker.len()..];
    let spaced = after.starts_with(' ');
    let well_formed = spaced || after.is_empty() || text::is_terminator(after);

    match out.pending_indent().filter(|_| well_formed) {
        Some(indent) => {
            let indent = indent.to_string();
            let keep = out.code.len() - indent.len();
            out.code.truncate(keep);
            out.push_doc(DocBlock {
                indent: Some(indent),
                marker: marker.to_string(),
                spaced,
                text: after[usize::from(spaced)..].to_string(),
            });
        }
        None => out.code.push_str(candidate),
    }
    stop
}

/// Offset just past the backtick closing a template literal whose body
/// starts at `from`, or the end of input.
///
/// Tracks `${ ... }` holes and one level of template nested inside a hole.
/// Comments are never recognized in here.
fn template_literal_end(source: &str, from: usize) -> usize {
    let bytes = source.as_bytes();
    let mut mode = TemplateLiterals::TopLevel;
    let mut nested = false;
    let mut i = from;

    while i < bytes.len() {
        match (mode, bytes[i]) {
            (TemplateLiterals::NestedExpression, b'}') => mode = TemplateLiterals::TopLevel,
            (TemplateLiterals::NestedExpression, b'`') if !nested => {
                nested = true;
                mode = TemplateLiterals::TopLevel;
            }
            (TemplateLiterals::NestedExpression, _) => {}
            (_, b'\\') => i += 1,
            (_, b'`') if nested => {
                nested = false;
                mode = TemplateLiterals::NestedExpression;
            }
            (_, b'`') => return i + 1,
            (_, b'$') if bytes.get(i + 1) == Some(&b'{') => {
                mode = TemplateLiterals::NestedExpression;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    source.len()
}

/// Classify `source` with the rules of `language`.
pub fn classify(source: &str, language: &LanguageDescriptor) -> Vec<Block> {
    Lexer::new(language).classify(source)
}

// =============================================================================
// TESTS
// =============================================================================
