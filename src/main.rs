//! litdoc - split source files into code and doc blocks
//!
//! This is the main entry point. It parses CLI arguments, builds the
//! configuration and delegates to the matching command runner.

mod cli;
mod run;

use std::io::{self, Write};

use clap::Parser;
use litdoc::config::Config;
use litdoc::user_config;

use cli::{Cli, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::default();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);
    setup_tracing(config.verbose());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Languages => run::run_languages(&config.registry(), &mut out)?,
        Command::Classify { file } => run::run_classify(&config, file, &mut out)?,
        Command::Render { file } => run::run_render(&config, file, &mut out)?,
        Command::Load { file } => run::run_load(&config, file, &mut out)?,
        Command::Save {
            file,
            regions,
            in_place,
        } => run::run_save(
            &config,
            file,
            regions.as_deref(),
            *in_place,
            io::stdin().lock(),
            &mut out,
        )?,
        Command::Check { files } => {
            if !run::run_check(&config, files, &mut out)? {
                out.flush()?;
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to stderr so command output on stdout stays clean. `RUST_LOG` wins
/// over `--verbose`.
fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("litdoc=debug")
        } else {
            EnvFilter::new("litdoc=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
