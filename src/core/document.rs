//! A loaded source file: its language, its classified blocks and the
//! regions presented for editing.

use tracing::{debug, info, warn};

use crate::core::error::Result;
use crate::core::language::{LanguageDescriptor, LanguageRegistry};
use crate::core::lexer::{Block, Lexer};
use crate::core::reconstruct::{EditedRegion, Reconstructor};
use crate::core::render::{self, EditorMode, Region};
use crate::core::text::LineEnding;

#[derive(Debug, Clone)]
pub struct Document {
    language: &'static LanguageDescriptor,
    mode: EditorMode,
    line_ending: LineEnding,
    blocks: Vec<Block>,
    regions: Vec<Region>,
}

impl Document {
    /// Resolve the language of `source` and split it into regions.
    ///
    /// Doc-only languages and raw mode skip classification.
    pub fn load(
        registry: &LanguageRegistry,
        source: &str,
        extension: &str,
        mode: EditorMode,
    ) -> Result<Self> {
        let language = registry.resolve_source(source, extension)?;
        Ok(Self::with_language(language, source, mode))
    }

    pub fn with_language(
        language: &'static LanguageDescriptor,
        source: &str,
        mode: EditorMode,
    ) -> Self {
        let (blocks, regions) = if language.doc_only {
            (Vec::new(), render::render_doc_only(source))
        } else if mode == EditorMode::Raw {
            (Vec::new(), render::render_raw(source))
        } else {
            let blocks = Lexer::new(language).classify(source);
            let regions = render::render(&blocks);
            (blocks, regions)
        };

        let block_comments = regions.iter().filter(|r| r.block_comment).count();
        if block_comments > 0 && mode == EditorMode::Edit {
            warn!(
                language = language.name,
                block_comments, "block comments will be saved as inline comments"
            );
        }

        info!(
            language = language.name,
            mode = mode.as_str(),
            regions = regions.len(),
            "loaded document"
        );

        Self {
            language,
            mode,
            line_ending: LineEnding::detect(source),
            blocks,
            regions,
        }
    }

    pub fn language(&self) -> &'static LanguageDescriptor {
        self.language
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Classified blocks. Empty for raw and doc-only documents.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The regions as an editing surface would hand them back unchanged.
    pub fn edited_regions(&self) -> Vec<EditedRegion> {
        self.regions.iter().map(EditedRegion::from).collect()
    }

    pub fn to_html(&self) -> String {
        render::to_html(&self.regions, self.mode)
    }

    /// Turn edited regions back into source text in this document's language
    /// and line ending.
    pub fn save(&self, regions: &[EditedRegion]) -> Result<String> {
        let reconstructor = if self.language.doc_only {
            Reconstructor::verbatim()
        } else {
            Reconstructor::new(self.language.save_marker().unwrap_or(""))
        };
        let source = reconstructor
            .line_ending(self.line_ending)
            .reconstruct(regions)?;
        debug!(language = self.language.name, bytes = source.len(), "saved document");
        Ok(source)
    }
}
