//! Round Trip Tests
//!
//! Load a source file into regions, hand the regions back unedited or after
//! edits, and verify the saved text.

use litdoc::config::Config;
use litdoc::core::{
    Document, EditedRegion, EditorMode, LANGUAGES, LanguageRegistry, RegionKind, reconstruct,
    render,
};
use litdoc::core::lexer::classify;
use litdoc::user_config;

fn load(source: &str, extension: &str) -> Document {
    Document::load(&LanguageRegistry::new(), source, extension, EditorMode::Edit).unwrap()
}

fn unedited(source: &str, extension: &str) -> String {
    let document = load(source, extension);
    document.save(&document.edited_regions()).unwrap()
}

// =============================================================================
// UNEDITED ROUND TRIPS
// =============================================================================

#[test]
fn python_module_round_trips() {
    let source = "\
# Module docs.
# Second paragraph.
import os

def f(x):
    # Explain the branch.
    if x:  # trailing
        return '''
# inside a string
'''
    return \"# also a string\"
";
    assert_eq!(unedited(source, "py"), source);
}

#[test]
fn every_inline_language_round_trips() {
    for language in LANGUAGES.iter().filter(|l| l.has_inline_comments()) {
        let marker = language.save_marker().unwrap();
        let source = format!(
            "{m} Header.\ncode line\n  {m} Indented.\n  {m} Still indented.\nmore code\n\n",
            m = marker
        );
        let document = Document::with_language(language, &source, EditorMode::Edit);
        let saved = document.save(&document.edited_regions()).unwrap();
        assert_eq!(saved, source, "language {}", language.name);
    }
}

#[test]
fn crlf_and_cr_sources_round_trip() {
    let crlf = "x = 1\r\n# a\r\n\r\n# b\r\ny = 2\r\n";
    assert_eq!(unedited(crlf, "py"), crlf);

    let cr = "x = 1\r# a\ry = 2\r";
    assert_eq!(unedited(cr, "py"), cr);
}

#[test]
fn mixed_line_endings_round_trip() {
    for source in [
        "a\r\n# b\nc\n",
        "a\n# b\r\n# c\r\nd\r",
        "// one\r\nfn f() {}\n    // two\n}\r\n",
    ] {
        let extension = if source.starts_with("//") { "rs" } else { "py" };
        assert_eq!(unedited(source, extension), source, "source {:?}", source);
    }
}

#[test]
fn bare_marker_line_gains_a_space() {
    assert_eq!(unedited("x = 1\n#\ny = 2\n", "py"), "x = 1\n# \ny = 2\n");
}

#[test]
fn reconstruct_inverts_render_directly() {
    let registry = LanguageRegistry::new();
    let language = registry.by_name("javascript").unwrap();
    let source = "// Docs.\nconst s = `// ${a}`;\n    // More.\nf();\n";

    let regions: Vec<EditedRegion> = render(&classify(source, language))
        .iter()
        .map(EditedRegion::from)
        .collect();
    assert_eq!(reconstruct(&regions, "//").unwrap(), source);
}

// =============================================================================
// EDITS
// =============================================================================

#[test]
fn edited_doc_region_is_reindented() {
    let document = load("fn f() {\n    // Old.\n}\n", "rs");
    let mut regions = document.edited_regions();
    assert_eq!(regions[1].kind, "doc");
    regions[1].indent = Some("\t".to_string());
    regions[1].content = "New first line.\nNew second line.".to_string();

    assert_eq!(
        document.save(&regions).unwrap(),
        "fn f() {\n\t// New first line.\n\t// New second line.\n}\n"
    );
}

#[test]
fn inserted_regions_are_saved_in_order() {
    let document = load("x = 1\n", "py");
    let mut regions = document.edited_regions();
    regions.insert(0, EditedRegion::doc("", "Added."));
    regions.push(EditedRegion::code("y = 2"));
    assert_eq!(document.save(&regions).unwrap(), "# Added.\nx = 1\ny = 2\n");
}

#[test]
fn block_comments_come_back_as_inline_comments() {
    let source = "/* Header. */\nint main() {}\n";
    let document = load(source, "c");
    let doc = &document.regions()[0];
    assert_eq!(doc.kind, RegionKind::Doc);
    assert!(doc.block_comment);

    let saved = document.save(&document.edited_regions()).unwrap();
    assert_eq!(saved, "// /* Header. */\n\nint main() {}\n");
}

#[test]
fn css_docs_can_be_viewed_but_not_saved() {
    let document = load("/* Styles. */\np { color: red; }\n", "css");
    assert!(document.to_html().contains("data-block-comment"));
    let err = document.save(&document.edited_regions()).unwrap_err();
    assert!(err.to_string().contains("no inline comment"));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn configured_aliases_and_mode() {
    let mut config = Config::default();
    user_config::configure(&mut config);
    config.set("mode", "view");

    let source = "// Header.\nstruct S {};\n";
    let document = Document::load(&config.registry(), source, "hpp", config.mode()).unwrap();
    assert_eq!(document.language().name, "c_cpp");
    assert!(document.to_html().contains("data-read-only"));
    assert_eq!(document.save(&document.edited_regions()).unwrap(), source);
}
