//! Inspection commands: `languages`, `classify`, `render` and `load`.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use litdoc::config::Config;
use litdoc::core::lexer::Block;
use litdoc::core::text::LineEnding;
use litdoc::core::{EditorMode, LanguageRegistry, Region};

use super::SourceFile;

/// The JSON document printed by `load` and accepted back by `save`.
#[derive(Serialize)]
struct Loaded<'a> {
    language: &'a str,
    mode: EditorMode,
    line_ending: LineEnding,
    regions: &'a [Region],
}

/// Run the `languages` command.
pub fn run_languages(
    registry: &LanguageRegistry,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for language in registry.languages() {
        let extensions: Vec<String> = language
            .extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect();
        let note = if language.doc_only {
            "  (doc only)"
        } else if !language.has_inline_comments() {
            "  (read only docs)"
        } else {
            ""
        };
        writeln!(out, "{:<12} {}{}", language.name, extensions.join(" "), note)?;
    }
    Ok(())
}

/// Run the `classify` command: one line per block.
pub fn run_classify(
    config: &Config,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = SourceFile::read(path)?;
    let document = file.load(config)?;
    debug!(path = %file.path.display(), blocks = document.blocks().len(), "classified");

    for block in document.blocks() {
        match block {
            Block::Code(code) => writeln!(out, "code {:?}", code)?,
            Block::Doc(doc) => match &doc.indent {
                Some(indent) => writeln!(
                    out,
                    "doc  indent={:?} marker={:?} {:?}",
                    indent, doc.marker, doc.text
                )?,
                None => writeln!(out, "doc  block {:?}", doc.text)?,
            },
        }
    }
    Ok(())
}

/// Run the `render` command.
pub fn run_render(
    config: &Config,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = SourceFile::read(path)?.load(config)?;
    out.write_all(document.to_html().as_bytes())?;
    Ok(())
}

/// Run the `load` command.
pub fn run_load(
    config: &Config,
    path: &Path,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = SourceFile::read(path)?.load(config)?;
    let loaded = Loaded {
        language: document.language().name,
        mode: document.mode(),
        line_ending: document.line_ending(),
        regions: document.regions(),
    };
    serde_json::to_writer_pretty(&mut *out, &loaded)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn output<F>(run: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), Box<dyn std::error::Error>>,
    {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_languages_lists_table() {
        let text = output(|out| run_languages(&LanguageRegistry::new(), out));
        assert!(text.lines().any(|l| l.starts_with("python") && l.contains(".py")));
        assert!(text.contains("(doc only)"));
        assert!(text.lines().any(|l| l.starts_with("css") && l.contains("(read only docs)")));
    }

    #[test]
    fn test_classify_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n# doc\n").unwrap();
        let config = Config::default();

        let text = output(|out| run_classify(&config, &file, out));
        assert_eq!(
            text,
            "code \"x = 1\\n\"\ndoc  indent=\"\" marker=\"#\" \"doc\\n\"\n"
        );

        let html = output(|out| run_render(&config, &file, out));
        assert!(html.contains("litdoc-doc-contents\">doc</td>"));
    }

    #[test]
    fn test_load_prints_regions_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n# doc\n").unwrap();

        let text = output(|out| run_load(&Config::default(), &file, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["language"], "python");
        assert_eq!(value["mode"], "edit");
        assert_eq!(value["line_ending"], "lf");
        assert_eq!(value["regions"][1]["kind"], "doc");
        assert_eq!(value["regions"][1]["first_line"], 2);
        assert_eq!(value["regions"][1]["content"], "doc");
    }
}
