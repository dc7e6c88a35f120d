//! This module constitutes the core, headless engine of litdoc.
//! It resolves the language of a source file, splits the source into code
//! and doc blocks, groups them into editable regions and turns edited
//! regions back into source text.

pub mod document;
pub mod error;
pub mod escape;
pub mod language;
pub mod lexer;
pub mod reconstruct;
pub mod render;
pub mod text;

pub use document::Document;
pub use error::{LitdocError, Result};
pub use language::{LANGUAGES, LanguageDescriptor, LanguageRegistry};
pub use lexer::{Block, DocBlock, Lexer, classify};
pub use reconstruct::{EditedRegion, Reconstructor, reconstruct};
pub use render::{EditorMode, Region, RegionKind, render};
