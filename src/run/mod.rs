//! Command runners for litdoc.
//!
//! Each runner reads its input files, drives the core engine and writes its
//! result to the given writer:
//! - `languages`, `classify`, `render` and `load` inspect a file
//! - `save` rebuilds a file from edited regions
//! - `check` verifies that an unedited load/save cycle is lossless

mod check;
mod load;
mod save;

use std::path::{Path, PathBuf};

use litdoc::config::Config;
use litdoc::core::Document;

pub use check::run_check;
pub use load::{run_classify, run_languages, run_load, run_render};
pub use save::run_save;

/// Validate and canonicalize an input path, rejecting device files and pipes.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let canonical = path
        .canonicalize()
        .map_err(|e| format!("Invalid path {}: {}", path.display(), e))?;

    // Reading these would hang or never finish
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(metadata) = std::fs::metadata(&canonical) {
            let ft = metadata.file_type();
            if ft.is_char_device() || ft.is_block_device() {
                return Err(format!("Cannot read device file {}", canonical.display()).into());
            }
            if ft.is_fifo() || ft.is_socket() {
                return Err(format!("Cannot read pipe or socket {}", canonical.display()).into());
            }
        }
    }

    if canonical.is_dir() {
        return Err(format!("{} is a directory", canonical.display()).into());
    }

    Ok(canonical)
}

/// A source file read from disk.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let path = validate_file_path(path)?;
        let source = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Ok(Self { path, source })
    }

    /// File extension without the dot; empty when there is none.
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }

    /// Load this file as a document using the configured registry and mode.
    pub fn load(&self, config: &Config) -> Result<Document, Box<dyn std::error::Error>> {
        let registry = config.registry();
        let document = Document::load(&registry, &self.source, self.extension(), config.mode())
            .map_err(|e| format!("{}: {}", self.path.display(), e))?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.py");
        fs::write(&file, "x = 1\n").unwrap();
        assert!(validate_file_path(&file).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_file_path(&dir.path().join("missing.py")).is_err());
        assert!(validate_file_path(dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_rejects_devices() {
        assert!(validate_file_path(Path::new("/dev/null")).is_err());
    }

    #[test]
    fn test_source_file_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.RS");
        fs::write(&file, "// a\n").unwrap();
        let source = SourceFile::read(&file).unwrap();
        assert_eq!(source.extension(), "RS");
        assert_eq!(source.load(&Config::default()).unwrap().language().name, "rust");
    }
}
