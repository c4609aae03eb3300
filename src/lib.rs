//! chordmap - keybinding table compiler
//!
//! This crate builds context-gated keybindings from a declarative table and
//! compiles them into the deterministic record list a host editor reads from
//! its extension manifest.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod output;
pub mod tracing;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use keymap::{compile, default_table, KeybindingRecord, KeymapError};
