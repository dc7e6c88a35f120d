//! Command-line argument parsing for litdoc.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and the subcommand to run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use litdoc::config::{Config, ConfigValue};

/// Command-line interface configuration.
#[derive(Parser, Debug)]
#[command(name = "litdoc")]
#[command(about = "Split source files into code and doc blocks and stitch them back together")]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Editor mode: edit, view, toc or raw
    #[arg(short, long, global = true, value_name = "MODE")]
    pub mode: Option<String>,

    /// Word introducing a language directive on a file's first line
    #[arg(short, long, global = true, value_name = "WORD")]
    pub directive: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the supported languages and their extensions
    Languages,

    /// Print the classified code and doc blocks of a file
    Classify { file: PathBuf },

    /// Print the editor markup for a file
    Render { file: PathBuf },

    /// Print the editable regions of a file as JSON
    Load { file: PathBuf },

    /// Rebuild a file from edited regions
    Save {
        file: PathBuf,

        /// JSON file holding the edited regions (stdin when omitted)
        #[arg(short, long, value_name = "JSON")]
        regions: Option<PathBuf>,

        /// Replace FILE instead of printing the result
        #[arg(short, long)]
        in_place: bool,
    },

    /// Verify that loading and saving each file unedited reproduces it
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if self.verbose {
            config.set("verbose", ConfigValue::Bool(true));
        }
        if let Some(mode) = &self.mode {
            config.set("mode", ConfigValue::String(mode.clone()));
        }
        if let Some(directive) = &self.directive {
            config.set("directive", ConfigValue::String(directive.clone()));
        }
    }
}
