//! Keybinding table compiler
//!
//! This module turns a hand-authored, context-gated key table into the flat
//! list of records the host editor reads from its extension manifest:
//! - Conditions are built from named atoms with `and`/`or`/`not`
//! - Keys under the `ctrl+x`/`ctrl+z` prefixes also bind their `ctrl+` variant
//! - Every typing-row character gets a synthesized `groog.type` binding
//! - Output order is fully determined by the table contents
//!
//! # Architecture
//!
//! ```text
//! default_table() ─┐
//!                  ├→ KeyTable → Keymap::from_table() → with_typing_keys() → records()
//! overlay.yaml ────┘
//! ```
//!
//! # Compiling
//!
//! ```ignore
//! let table = default_table()?;
//! let records = compile(table)?;
//! ```

mod binding;
mod command;
mod conditions;
mod config;
mod context;
mod defaults;
mod error;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::{
    if_else, if_else_if, keyboard_split, only_when, panel_split, recording_split,
    terminal_panel_split, text_only, unconditional, Bindings, KeyTable,
};
pub use command::{
    notification, repeat, send_sequence, sequence, sequence_of, type_text, unbind, Action,
    NOTIFY_COMMAND, SEND_SEQUENCE_COMMAND, SEQUENCE_COMMAND, TYPE_COMMAND, UNBIND_MARKER,
};
pub use conditions::*;
pub use config::{load_overlay_file, parse_key, parse_overlay_yaml, OverlayConfig, OverlayEntry};
pub use context::{Atom, When};
pub use defaults::{default_table, load_table};
pub use error::KeymapError;
pub use keymap::{
    compile, compile_with, typing_bindings, CompileOptions, KeybindingRecord, Keymap,
    SHIFTED_ROWS, TYPING_ROWS,
};
pub use types::{
    alt, ctrl, ctrl_x, ctrl_z, keys, shift, Key, Modifier, PrefixChord, CTRL_X, CTRL_Z,
    PREFIX_CHORDS,
};
