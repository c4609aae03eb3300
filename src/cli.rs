//! Command-line argument parsing for the generator
//!
//! Supports:
//! - Choosing the config and overlay files
//! - Writing to stdout, a file, or an extension manifest
//! - Compact output and relaxed alias checking

use clap::Parser;
use std::path::PathBuf;

use crate::config::GeneratorConfig;

/// Compile the keybinding table into host editor keybindings
#[derive(Parser, Debug, Default)]
#[command(
    name = "chordmap",
    version,
    about = "Compile the keybinding table into host editor keybindings"
)]
pub struct CliArgs {
    /// Config file (default: ~/.config/chordmap/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra bindings YAML merged into the default table
    #[arg(long, value_name = "PATH")]
    pub overlay: Option<PathBuf>,

    /// Write the JSON array to PATH instead of stdout
    #[arg(short = 'o', long, value_name = "PATH", conflicts_with = "manifest")]
    pub output: Option<PathBuf>,

    /// Replace contributes.keybindings in this manifest file
    #[arg(short = 'm', long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Don't fail when alias expansion duplicates a key and condition
    #[arg(long)]
    pub allow_alias_collisions: bool,
}

/// Where the compiled records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
    Manifest(PathBuf),
}

/// Configuration for one run: config file values overridden by CLI flags
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: OutputTarget,
    pub overlay: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl CliArgs {
    /// Load the config file named by `--config`, or the default one
    pub fn load_config(&self) -> Result<GeneratorConfig, String> {
        match &self.config {
            Some(path) => GeneratorConfig::load_from(path),
            None => Ok(GeneratorConfig::load()),
        }
    }

    /// Merge parsed CLI args over a loaded config
    pub fn into_config(self, mut generator: GeneratorConfig) -> RunConfig {
        if self.compact {
            generator.pretty = false;
        }
        if self.allow_alias_collisions {
            generator.check_alias_collisions = false;
        }
        if self.overlay.is_some() {
            generator.overlay = self.overlay;
        }

        // Flags pick the target as a pair so a config manifest can't shadow --output
        let target = match (self.output, self.manifest) {
            (Some(path), _) => OutputTarget::File(path),
            (None, Some(path)) => OutputTarget::Manifest(path),
            (None, None) => match (&generator.output, &generator.manifest) {
                (_, Some(path)) => OutputTarget::Manifest(path.clone()),
                (Some(path), None) => OutputTarget::File(path.clone()),
                (None, None) => OutputTarget::Stdout,
            },
        };

        RunConfig {
            target,
            overlay: generator.overlay_path(),
            generator,
        }
    }
}
