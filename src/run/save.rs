//! The `save` command.

use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::info;

use litdoc::config::Config;
use litdoc::core::EditedRegion;

use super::{SourceFile, validate_file_path};

/// Either a bare list of regions or the object printed by `load`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegionsInput {
    List(Vec<EditedRegion>),
    Loaded { regions: Vec<EditedRegion> },
}

impl RegionsInput {
    fn into_regions(self) -> Vec<EditedRegion> {
        match self {
            RegionsInput::List(regions) | RegionsInput::Loaded { regions } => regions,
        }
    }
}

/// Run the `save` command.
///
/// Edited regions come from `regions` or, when that is `None`, from `input`.
/// The rebuilt source replaces `path` when `in_place` is set and is written
/// to `out` otherwise.
pub fn run_save(
    config: &Config,
    path: &Path,
    regions: Option<&Path>,
    in_place: bool,
    input: impl Read,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = SourceFile::read(path)?;
    let document = file.load(config)?;

    let json = match regions {
        Some(regions_path) => std::fs::read_to_string(validate_file_path(regions_path)?)?,
        None => {
            let mut json = String::new();
            io::BufReader::new(input).read_to_string(&mut json)?;
            json
        }
    };
    let edited = serde_json::from_str::<RegionsInput>(&json)
        .map_err(|e| format!("Invalid regions JSON: {}", e))?
        .into_regions();

    let source = document
        .save(&edited)
        .map_err(|e| format!("{}: {}", file.path.display(), e))?;

    if in_place {
        let parent = file
            .path
            .parent()
            .ok_or_else(|| -> Box<dyn std::error::Error> { "Invalid file path".into() })?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(source.as_bytes())?;
            writer.flush()?;
        }
        temp_file.as_file().sync_all()?;
        temp_file.persist(&file.path)?;
        info!(path = %file.path.display(), bytes = source.len(), "saved in place");
    } else {
        out.write_all(source.as_bytes())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const REGIONS: &str = r#"[
        {"kind": "code", "content": "x = 1"},
        {"kind": "doc", "indent": "", "content": "Edited\ndoc."}
    ]"#;

    #[test]
    fn test_save_from_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n# old\n").unwrap();

        let mut out = Vec::new();
        run_save(&Config::default(), &file, None, false, REGIONS.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x = 1\n# Edited\n# doc.\n");
        assert_eq!(fs::read_to_string(&file).unwrap(), "x = 1\n# old\n");
    }

    #[test]
    fn test_save_in_place_from_regions_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        let regions = dir.path().join("regions.json");
        fs::write(&file, "let x = 1;\n// old\n").unwrap();
        fs::write(&regions, r#"{"language": "rust", "regions": [{"kind": "doc", "indent": "", "content": "new"}]}"#).unwrap();

        let mut out = Vec::new();
        run_save(&Config::default(), &file, Some(&regions), true, io::empty(), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&file).unwrap(), "// new\n");
    }

    #[test]
    fn test_save_rejects_bad_regions() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n").unwrap();

        let mut out = Vec::new();
        let bad_kind = r#"[{"kind": "table", "content": ""}]"#;
        let err = run_save(&Config::default(), &file, None, false, bad_kind.as_bytes(), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("region 0 is malformed"));

        assert!(run_save(&Config::default(), &file, None, false, "{".as_bytes(), &mut out).is_err());
    }
}
