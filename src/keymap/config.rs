//! YAML overlay files
//!
//! An overlay adds keys to the default table:
//!
//! ```yaml
//! bindings:
//!   - key: "ctrl+x g"
//!     command: git.openChange
//!   - key: "ctrl+alt+t"
//!     command: workbench.action.terminal.sendSequence
//!     when: terminalFocus
//!     args:
//!       text: "make test\n"
//!     platform: linux
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::binding::{Bindings, KeyTable};
use super::command::Action;
use super::context::When;
use super::error::KeymapError;
use super::types::Key;

/// Root structure of an overlay YAML file
#[derive(Debug, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub bindings: Vec<OverlayEntry>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct OverlayEntry {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub args: Option<Map<String, Value>>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Load an overlay table from a YAML file
pub fn load_overlay_file(path: &Path) -> Result<KeyTable, KeymapError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_overlay_yaml(&content)
}

/// Parse an overlay table from a YAML string
///
/// Entries sharing a key are grouped under that key in first-seen order. The
/// same key and condition twice is a [`KeymapError::DuplicateKey`].
pub fn parse_overlay_yaml(yaml: &str) -> Result<KeyTable, KeymapError> {
    let config: OverlayConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut grouped: Vec<(Key, Bindings)> = Vec::new();

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                tracing::debug!("Skipping {} binding for {}", platform, entry.key);
                continue;
            }
        }

        let key = parse_key(&entry.key)?;
        if entry.command.trim().is_empty() {
            return Err(KeymapError::ParseError(format!(
                "Missing command for key: {}",
                key
            )));
        }

        let when = When::parse(entry.when.as_deref().unwrap_or(""));
        let mut action = Action::new(entry.command);
        if let Some(args) = entry.args {
            action = action.with_args(args);
        }

        let index = match grouped.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                grouped.push((key.clone(), Bindings::new()));
                grouped.len() - 1
            }
        };
        let bindings = &mut grouped[index].1;
        if bindings.insert(&when, action).is_some() {
            let duplicate = format!("{} (when: {})", key, when);
            return Err(KeymapError::DuplicateKey(duplicate));
        }
    }

    Ok(grouped.into_iter().collect())
}

/// Normalize a key string: trimmed, single spaces between chords, lowercase
pub fn parse_key(key_str: &str) -> Result<Key, KeymapError> {
    let chords: Vec<String> = key_str
        .split_whitespace()
        .map(|chord| chord.to_lowercase())
        .collect();

    if chords.is_empty() {
        return Err(KeymapError::ParseError("Empty key in binding".to_string()));
    }
    for chord in &chords {
        if chord.starts_with('+') && chord.len() > 1 {
            return Err(KeymapError::ParseError(format!(
                "Malformed chord in binding: {}",
                key_str
            )));
        }
    }

    Ok(Key::new(chords.join(" ")))
}

fn get_current_platform() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        "other"
    }
}
