//! The `check` command.

use std::io::Write;
use std::path::PathBuf;

use similar::TextDiff;
use tracing::{debug, warn};

use litdoc::config::Config;

use super::SourceFile;

/// Run the `check` command.
///
/// Loads each file, saves its regions unedited and prints a unified diff for
/// every file that does not come back byte for byte. Returns whether all
/// files passed.
pub fn run_check(
    config: &Config,
    files: &[PathBuf],
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut passed = true;

    for path in files {
        let outcome = SourceFile::read(path).and_then(|file| {
            let document = file.load(config)?;
            let saved = document
                .save(&document.edited_regions())
                .map_err(|e| format!("{}: {}", file.path.display(), e))?;
            Ok((file, saved))
        });

        match outcome {
            Ok((file, saved)) if saved == file.source => {
                debug!(path = %path.display(), "round trip ok");
                writeln!(out, "ok      {}", path.display())?;
            }
            Ok((file, saved)) => {
                passed = false;
                warn!(path = %path.display(), "round trip changed the file");
                writeln!(out, "changed {}", path.display())?;
                let name = path.display().to_string();
                let diff = TextDiff::from_lines(&file.source, &saved);
                write!(
                    out,
                    "{}",
                    diff.unified_diff().header(&name, &format!("{} (saved)", name))
                )?;
            }
            Err(e) => {
                passed = false;
                writeln!(out, "error   {}: {}", path.display(), e)?;
            }
        }
    }

    Ok(passed)
}
