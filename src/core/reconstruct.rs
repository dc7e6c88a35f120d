//! Block reconstructor.
//!
//! The inverse of the renderer: takes the edited contents of every region in
//! document order and writes source text back out. Doc regions are always
//! written as inline comments, including ones that were loaded from block
//! comments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{LitdocError, Result};
use crate::core::render::{Region, RegionKind};
use crate::core::text::{self, LineEnding};

/// A region as handed back by an editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedRegion {
    /// `"code"` or `"doc"`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    pub content: String,
    /// Terminator after the region's last line; the document's line ending
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminator: Option<String>,
}

impl EditedRegion {
    pub fn code(content: &str) -> Self {
        Self {
            kind: RegionKind::Code.as_str().to_string(),
            indent: None,
            content: content.to_string(),
            terminator: None,
        }
    }

    pub fn doc(indent: &str, content: &str) -> Self {
        Self {
            kind: RegionKind::Doc.as_str().to_string(),
            indent: Some(indent.to_string()),
            content: content.to_string(),
            terminator: None,
        }
    }
}

impl From<&Region> for EditedRegion {
    fn from(region: &Region) -> Self {
        Self {
            kind: region.kind.as_str().to_string(),
            indent: region.indent.clone(),
            content: region.content.clone(),
            terminator: region.terminator.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocStyle<'a> {
    /// `indent + marker + " " + line`.
    Inline(&'a str),
    /// Doc content is the document itself.
    Verbatim,
    /// The language has no inline comment to write doc lines with.
    Unavailable,
}

/// Writes edited regions back to source text.
#[derive(Debug, Clone, Copy)]
pub struct Reconstructor<'a> {
    doc: DocStyle<'a>,
    line_ending: LineEnding,
}

impl<'a> Reconstructor<'a> {
    /// Write doc lines prefixed with `marker`. An empty marker means doc
    /// regions cannot be saved.
    pub fn new(marker: &'a str) -> Self {
        let doc = if marker.is_empty() {
            DocStyle::Unavailable
        } else {
            DocStyle::Inline(marker)
        };
        Self {
            doc,
            line_ending: LineEnding::Lf,
        }
    }

    /// Write doc regions unchanged, as for documents that are all docs.
    pub fn verbatim() -> Self {
        Self {
            doc: DocStyle::Verbatim,
            line_ending: LineEnding::Lf,
        }
    }

    /// Terminator written after the last line of a region that does not
    /// carry its own.
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn reconstruct(&self, regions: &[EditedRegion]) -> Result<String> {
        let mut out = String::new();

        for (index, region) in regions.iter().enumerate() {
            let kind: RegionKind = region
                .kind
                .parse()
                .map_err(|reason| LitdocError::MalformedRegion { index, reason })?;
            let last = match region.terminator.as_deref() {
                Some(terminator) if text::is_terminator(terminator) => terminator,
                Some(terminator) => {
                    return Err(LitdocError::MalformedRegion {
                        index,
                        reason: format!("terminator {:?} is not a line ending", terminator),
                    });
                }
                None => self.line_ending.as_str(),
            };

            match (kind, self.doc) {
                (RegionKind::Code, _) | (RegionKind::Doc, DocStyle::Verbatim) => {
                    write_lines(&mut out, "", &region.content, last);
                }
                (RegionKind::Doc, DocStyle::Inline(marker)) => {
                    let indent = region.indent.as_deref().unwrap_or("");
                    if !text::is_horizontal_whitespace(indent) {
                        return Err(LitdocError::MalformedRegion {
                            index,
                            reason: format!("doc indent {:?} is not whitespace", indent),
                        });
                    }
                    let prefix = format!("{}{} ", indent, marker);
                    write_lines(&mut out, &prefix, &region.content, last);
                }
                (RegionKind::Doc, DocStyle::Unavailable) => {
                    return Err(LitdocError::MalformedRegion {
                        index,
                        reason: "language has no inline comment to save doc blocks with"
                            .to_string(),
                    });
                }
            }
        }

        debug!(regions = regions.len(), bytes = out.len(), "reconstructed source");
        Ok(out)
    }
}

/// Write `content` line by line, ending the unterminated last line with `last`.
fn write_lines(out: &mut String, prefix: &str, content: &str, last: &str) {
    for line in text::lines(content) {
        out.push_str(prefix);
        out.push_str(line.text);
        out.push_str(line.terminator.unwrap_or(last));
    }
}

/// Reconstruct source from edited regions, writing doc lines with `marker`.
pub fn reconstruct(regions: &[EditedRegion], marker: &str) -> Result<String> {
    Reconstructor::new(marker).reconstruct(regions)
}
