//! Block renderer.
//!
//! Turns classified blocks into editable regions, one per code block and one
//! per run of doc lines sharing an indent and marker, and emits the minimal
//! HTML structure an editing surface needs to attach its widgets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::escape::escape_html;
use crate::core::lexer::Block;
use crate::core::text;

/// How a document is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Read-only view of code and doc blocks.
    View,
    /// Like `View`; used for a table of contents embedded in other pages.
    Toc,
    /// Code and doc blocks are both editable.
    #[default]
    Edit,
    /// No classification: the whole source is one code region.
    Raw,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::View => "view",
            EditorMode::Toc => "toc",
            EditorMode::Edit => "edit",
            EditorMode::Raw => "raw",
        }
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, EditorMode::View | EditorMode::Toc)
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(EditorMode::View),
            "toc" => Ok(EditorMode::Toc),
            "edit" => Ok(EditorMode::Edit),
            "raw" => Ok(EditorMode::Raw),
            other => Err(format!("unknown editor mode: {}", other)),
        }
    }
}

/// Region type tag shared with editing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Code,
    Doc,
}

impl RegionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::Code => "code",
            RegionKind::Doc => "doc",
        }
    }
}

impl FromStr for RegionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(RegionKind::Code),
            "doc" => Ok(RegionKind::Doc),
            other => Err(format!("unrecognized region kind `{}`", other)),
        }
    }
}

/// One editable region of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    /// Line number of the region's first line, starting at 1.
    pub first_line: usize,
    /// Indent of a doc region. `None` for code and for doc-only documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    /// The region came from a block comment; saving writes it back as
    /// inline comments.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub block_comment: bool,
    /// Text without the region's final line terminator.
    pub content: String,
    /// The terminator stripped from `content`, if there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminator: Option<String>,
}

impl Region {
    fn code(first_line: usize, content: &str) -> Self {
        Self {
            kind: RegionKind::Code,
            first_line,
            indent: None,
            block_comment: false,
            content: content.to_string(),
            terminator: None,
        }
    }

    fn doc(first_line: usize, indent: Option<&str>, content: &str, block_comment: bool) -> Self {
        Self {
            kind: RegionKind::Doc,
            first_line,
            indent: indent.map(str::to_string),
            block_comment,
            content: content.to_string(),
            terminator: None,
        }
    }

    /// Move one trailing line terminator out of `content`. The region
    /// boundary stands in for it, so displaying it would add a blank line.
    fn strip_final_terminator(&mut self) {
        let (stripped, terminator) = text::strip_trailing_terminator(&self.content);
        let len = stripped.len();
        self.terminator = terminator.map(str::to_string);
        self.content.truncate(len);
    }
}

/// Group classified blocks into editable regions.
///
/// Consecutive inline doc blocks sharing an indent and marker become one doc
/// region; the terminators between them stay inside its content. Block
/// comments always get a region of their own.
pub fn render(blocks: &[Block]) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();
    let mut line = 1;
    // Indent and marker of the doc region still accepting lines.
    let mut open_doc: Option<(&str, &str)> = None;

    for block in blocks {
        match block {
            Block::Code(code) => {
                open_doc = None;
                regions.push(Region::code(line, code));
            }
            Block::Doc(doc) => match doc.indent.as_deref() {
                Some(indent) if open_doc == Some((indent, doc.marker.as_str())) => {
                    if let Some(region) = regions.last_mut() {
                        region.content.push_str(&doc.text);
                    }
                }
                Some(indent) => {
                    open_doc = Some((indent, doc.marker.as_str()));
                    regions.push(Region::doc(line, Some(indent), &doc.text, false));
                }
                None => {
                    open_doc = None;
                    regions.push(Region::doc(line, Some(""), &doc.text, true));
                }
            },
        }
        line += text::count_terminators(&block.source());
    }

    regions.iter_mut().for_each(Region::strip_final_terminator);
    debug!(regions = regions.len(), lines = line - 1, "rendered blocks");
    regions
}

/// The whole source as a single code region.
pub fn render_raw(source: &str) -> Vec<Region> {
    single_region(Region::code(1, source))
}

/// The whole source as a single doc region with no indent.
pub fn render_doc_only(source: &str) -> Vec<Region> {
    single_region(Region::doc(1, None, source, false))
}

fn single_region(mut region: Region) -> Vec<Region> {
    if region.content.is_empty() {
        return Vec::new();
    }
    region.strip_final_terminator();
    vec![region]
}

/// Whether typed or pasted text may be inserted into a doc indent.
pub fn accepts_indent_input(data: &str) -> bool {
    text::is_horizontal_whitespace(data)
}

// =============================================================================
// HTML
// =============================================================================

/// Emit one structural element per region.
///
/// Code is escaped; inline doc text is passed through since doc blocks hold
/// markup. Block comments are escaped because their delimiters are part of
/// the text.
pub fn to_html(regions: &[Region], mode: EditorMode) -> String {
    let read_only = if mode.is_read_only() { " data-read-only" } else { "" };
    let mut html = String::new();

    for region in regions {
        match (region.kind, region.indent.as_deref()) {
            (RegionKind::Code, _) => {
                html.push_str(&format!(
                    "<div class=\"litdoc-code\">\n    <div class=\"litdoc-code-editor\" data-first-line-number=\"{}\"{}>{}</div>\n</div>\n",
                    region.first_line,
                    read_only,
                    escape_html(&region.content)
                ));
            }
            (RegionKind::Doc, None) => {
                html.push_str(&format!(
                    "<div class=\"litdoc-doc-only\"{}>{}</div>\n",
                    read_only, region.content
                ));
            }
            (RegionKind::Doc, Some(indent)) => {
                let indent_cell = if mode == EditorMode::Edit {
                    " contenteditable data-whitespace-only"
                } else {
                    ""
                };
                let content = if region.block_comment {
                    escape_html(&region.content)
                } else {
                    region.content.clone()
                };
                html.push_str(&format!(
                    "<div class=\"litdoc-doc\"{}{}>\n    <table>\n        <tbody>\n            <tr>\n                <td class=\"litdoc-doc-indent\"{}>{}</td>\n                <td class=\"litdoc-doc-contents\">{}</td>\n            </tr>\n        </tbody>\n    </table>\n</div>\n",
                    if region.block_comment { " data-block-comment" } else { "" },
                    read_only,
                    indent_cell,
                    indent,
                    content
                ));
            }
        }
    }
    html
}
