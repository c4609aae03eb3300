//! Compiling a [`KeyTable`] into the flat, ordered list of keybinding records
//!
//! Compilation runs in phases, each producing a new value:
//!
//! 1. [`Keymap::from_table`] validates the raw table (every key defined once)
//! 2. [`Keymap::with_typing_keys`] merges one binding per typing-row character
//! 3. [`Keymap::records`] sorts, expands aliases and emits records
//!
//! Any error aborts the whole compilation; there is no partial output.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::binding::{text_only, Bindings, KeyTable};
use super::command::type_text;
use super::error::KeymapError;
use super::types::{shift, Key};

/// Unshifted characters of the standard typing rows
pub const TYPING_ROWS: [&str; 4] = [
    "`1234567890-=",
    "qwertyuiop[]\\",
    "asdfghjkl;'",
    "zxcvbnm,./",
];

/// The characters produced by the same keys with shift held
pub const SHIFTED_ROWS: [&str; 4] = [
    "~!@#$%^&*()_+",
    "QWERTYUIOP{}|",
    "ASDFGHJKL:\"",
    "ZXCVBNM<>?",
];

/// A single output binding, ready for serialization into the host's keybindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingRecord {
    pub key: String,
    pub command: String,
    /// Empty means unconditional
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub when: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
}

/// Options controlling the output phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Fail if two different raw keys expand to the same (key, when) pair
    pub check_alias_collisions: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            check_alias_collisions: true,
        }
    }
}

/// A validated table: every key unique, keys and conditions kept sorted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keymap {
    bindings: BTreeMap<Key, Bindings>,
}

impl Keymap {
    /// Validate a raw table, rejecting keys defined more than once
    pub fn from_table(table: KeyTable) -> Result<Self, KeymapError> {
        let mut keymap = Self::default();
        for (key, bindings) in table {
            keymap.insert_new(key, bindings)?;
        }
        tracing::debug!("Validated keymap ({} keys)", keymap.len());
        Ok(keymap)
    }

    fn insert_new(&mut self, key: Key, bindings: Bindings) -> Result<(), KeymapError> {
        if self.contains(&key) {
            return Err(KeymapError::DuplicateKey(key.to_string()));
        }
        self.bindings.insert(key, bindings);
        Ok(())
    }

    /// New keymap with `table` merged in; a key present in both is an error
    pub fn merged(&self, table: KeyTable) -> Result<Self, KeymapError> {
        let mut keymap = self.clone();
        for (key, bindings) in table {
            keymap.insert_new(key, bindings)?;
        }
        Ok(keymap)
    }

    /// New keymap including the synthesized typing-row bindings
    ///
    /// Character keys must never be hand-authored; any overlap is reported as a
    /// duplicate key.
    pub fn with_typing_keys(&self) -> Result<Self, KeymapError> {
        let typing = typing_bindings();
        tracing::debug!("Synthesized {} typing keys", typing.len());
        self.merged(typing)
    }

    pub fn get(&self, key: &Key) -> Option<&Bindings> {
        self.bindings.get(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.bindings.contains_key(key)
    }

    /// Number of distinct raw keys
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Flatten into records: keys in order, conditions in order, then aliases
    pub fn records(&self, options: &CompileOptions) -> Result<Vec<KeybindingRecord>, KeymapError> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut unbinds = 0;

        for (key, bindings) in &self.bindings {
            let aliases = key.aliases();
            for (when, action) in bindings.iter() {
                if action.is_unbind() {
                    unbinds += aliases.len();
                }
                for alias in &aliases {
                    if options.check_alias_collisions
                        && !seen.insert((alias.to_string(), when.to_string()))
                    {
                        return Err(KeymapError::AliasCollision {
                            key: alias.to_string(),
                            when: when.to_string(),
                        });
                    }
                    // run_async/delay only apply to sequence steps
                    records.push(KeybindingRecord {
                        key: alias.to_string(),
                        command: action.command.clone(),
                        when: when.to_string(),
                        args: action.args.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            "Emitted {} records ({} unbinds) for {} keys",
            records.len(),
            unbinds,
            self.bindings.len()
        );
        Ok(records)
    }
}

/// One `groog.type` binding per typing-row character and its shifted variant
pub fn typing_bindings() -> KeyTable {
    let mut table = KeyTable::new();
    for (row, shifted_row) in TYPING_ROWS.iter().zip(SHIFTED_ROWS) {
        for (c, shifted) in row.chars().zip(shifted_row.chars()) {
            table.push(c, text_only(type_text(&c.to_string())));
            table.push(shift(c), text_only(type_text(&shifted.to_string())));
        }
    }
    table
}

/// Compile with default options
pub fn compile(table: KeyTable) -> Result<Vec<KeybindingRecord>, KeymapError> {
    compile_with(table, &CompileOptions::default())
}

/// Validate, add typing keys and flatten `table`
pub fn compile_with(
    table: KeyTable,
    options: &CompileOptions,
) -> Result<Vec<KeybindingRecord>, KeymapError> {
    Keymap::from_table(table)?.with_typing_keys()?.records(options)
}
