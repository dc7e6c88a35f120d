//! Lexer Scenarios
//!
//! End-to-end classification checks through the public API: language
//! resolution from a file name or directive, then classification.

use litdoc::core::lexer::to_source;
use litdoc::core::{Block, LanguageRegistry, classify};

fn python(source: &str) -> Vec<Block> {
    let registry = LanguageRegistry::new();
    let language = registry.resolve(None, "py").unwrap();
    let blocks = classify(source, language);
    assert_eq!(to_source(&blocks), source);
    blocks
}

fn lex_file(source: &str, extension: &str) -> Vec<Block> {
    let registry = LanguageRegistry::new();
    let language = registry.resolve_source(source, extension).unwrap();
    let blocks = classify(source, language);
    assert_eq!(to_source(&blocks), source);
    blocks
}

// =============================================================================
// INLINE COMMENT LANGUAGE
// =============================================================================

#[test]
fn empty_and_blank_sources() {
    assert_eq!(python(""), vec![]);
    assert_eq!(python("\n"), vec![Block::code("\n")]);
}

#[test]
fn comment_at_line_start_is_doc() {
    assert_eq!(python("# Test"), vec![Block::doc("", "Test", "#")]);
    assert_eq!(
        python("\n# Test\n"),
        vec![Block::code("\n"), Block::doc("", "Test\n", "#")]
    );
}

#[test]
fn trailing_comment_stays_code() {
    assert_eq!(python("  a = 1 # Test"), vec![Block::code("  a = 1 # Test")]);
}

#[test]
fn escaped_newline_keeps_short_string_open() {
    assert_eq!(
        python("'\\\n# Test'\n"),
        vec![Block::code("'\\\n# Test'\n")]
    );
}

#[test]
fn escaped_backslash_lets_newline_close_string() {
    assert_eq!(
        python("'\\\\\n# Test'\n"),
        vec![Block::code("'\\\\\n"), Block::doc("", "Test'\n", "#")]
    );
}

#[test]
fn long_string_hides_comment() {
    let source = "\"\"\"\n# Test\n\"\"\"";
    assert_eq!(python(source), vec![Block::code(source)]);
}

#[test]
fn indented_doc_keeps_indent() {
    assert_eq!(
        python("def f():\n    # Returns one.\n    return 1\n"),
        vec![
            Block::code("def f():\n"),
            Block::doc("    ", "Returns one.\n", "#"),
            Block::code("    return 1\n"),
        ]
    );
}

// =============================================================================
// OTHER LANGUAGES
// =============================================================================

#[test]
fn javascript_template_literal_hides_comment() {
    let source = "let s = `\n// not doc ${ `inner ${x}` }\n`;\n// doc\n";
    assert_eq!(
        lex_file(source, "js"),
        vec![
            Block::code("let s = `\n// not doc ${ `inner ${x}` }\n`;\n"),
            Block::doc("", "doc\n", "//"),
        ]
    );
}

#[test]
fn directive_selects_language() {
    // As python this would be all code after the directive line.
    let source = "# litdoc-lexer: shell\ncat <<EOF\n# body\nEOF\n# doc\n";
    let blocks = lex_file(source, "py");
    assert_eq!(
        blocks,
        vec![
            Block::doc("", "litdoc-lexer: shell\n", "#"),
            Block::code("cat <<EOF\n# body\nEOF\n"),
            Block::doc("", "doc\n", "#"),
        ]
    );
}

#[test]
fn unknown_extension_is_an_error() {
    let registry = LanguageRegistry::new();
    assert!(registry.resolve_source("# x\n", "unknown").is_err());
}

#[test]
fn toml_and_rust_comments() {
    assert_eq!(
        lex_file("# Settings\nname = \"# not doc\"\n", "toml"),
        vec![Block::doc("", "Settings\n", "#"), Block::code("name = \"# not doc\"\n")]
    );
    assert_eq!(
        lex_file("fn main() {\n    // Entry.\n}\n", "rs"),
        vec![
            Block::code("fn main() {\n"),
            Block::doc("    ", "Entry.\n", "//"),
            Block::code("}\n"),
        ]
    );
}
