//! Generator configuration
//!
//! Stores defaults for the binary in `~/.config/chordmap/config.yaml`:
//!
//! ```yaml
//! manifest: ~/src/groog/package.json
//! overlay: work.yaml
//! pretty: true
//! check_alias_collisions: true
//! ```
//!
//! A leading `~/` in a path expands to the home directory. Other relative
//! paths are resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::keymap::CompileOptions;

/// Generator configuration; every field may be omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Write the JSON array here instead of stdout
    pub output: Option<PathBuf>,
    /// Splice records into this extension manifest in place
    pub manifest: Option<PathBuf>,
    /// Extra bindings merged into the default table
    pub overlay: Option<PathBuf>,
    pub pretty: bool,
    /// Fail when alias expansion produces the same key and condition twice
    pub check_alias_collisions: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: None,
            manifest: None,
            overlay: None,
            pretty: true,
            check_alias_collisions: true,
        }
    }
}

impl GeneratorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path; any failure is an error
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;

        let config = Self::parse_relative_to(&content, path.parent())
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from a YAML string; an empty document yields defaults
    ///
    /// Only `~/` is expanded; relative paths are left as written.
    pub fn parse(yaml: &str) -> Result<Self, String> {
        Self::parse_relative_to(yaml, None)
    }

    fn parse_relative_to(yaml: &str, base: Option<&Path>) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        Ok(config.resolve_paths(base))
    }

    fn resolve_paths(mut self, base: Option<&Path>) -> Self {
        for path in [&mut self.output, &mut self.manifest, &mut self.overlay]
            .into_iter()
            .flatten()
        {
            *path = resolve_path(path, base);
        }
        self
    }

    /// The overlay to merge: the configured one, else `overlay.yaml` if present
    pub fn overlay_path(&self) -> Option<PathBuf> {
        if let Some(overlay) = &self.overlay {
            return Some(overlay.clone());
        }
        crate::config_paths::overlay_file().filter(|path| path.exists())
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            check_alias_collisions: self.check_alias_collisions,
        }
    }
}

/// Expand a leading `~` to the home directory, else join relative paths onto `base`
pub fn resolve_path(path: &Path, base: Option<&Path>) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        return match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        };
    }
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
