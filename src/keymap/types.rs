//! Core types for key identity: Modifier, Key, PrefixChord

use std::fmt;

use serde::{Deserialize, Serialize};

/// A modifier that can be prepended to a key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
}

impl Modifier {
    /// The token used for this modifier in key strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Alt => "alt",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chord (`ctrl+shift+s`) or space-separated chord sequence (`ctrl+x p`)
///
/// Keys are compared and sorted by their canonical string form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prepend a modifier: `shift` applied to `s` gives `shift+s`
    pub fn with_modifier(self, modifier: Modifier) -> Key {
        Key(format!("{}+{}", modifier, self.0))
    }

    /// Build a two-step sequence starting with a prefix chord
    pub fn sequence(prefix: &PrefixChord, secondary: impl Into<Key>) -> Key {
        Key(format!("{} {}", prefix.chord(), secondary.into().0))
    }

    /// Check if this key is a multi-chord sequence
    pub fn is_sequence(&self) -> bool {
        self.0.contains(' ')
    }

    /// All key strings this key should be emitted under
    ///
    /// Keys starting with a prefix chord also get a variant with the prefix's
    /// modifier re-applied to the remainder, since some input sources keep the
    /// modifier held between chords.
    pub fn aliases(&self) -> Vec<Key> {
        let mut aliases = vec![self.clone()];
        aliases.extend(PREFIX_CHORDS.iter().filter_map(|p| p.alias_of(self)));
        aliases
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key::new(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key(key)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key(c.to_string())
    }
}

/// A chord that starts a two-step sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixChord {
    pub modifier: Modifier,
    pub key: char,
}

impl PrefixChord {
    pub const fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }

    /// Rendered chord, e.g. `ctrl+x`
    pub fn chord(&self) -> String {
        format!("{}+{}", self.modifier, self.key)
    }

    /// The held-modifier variant of `key`, if `key` starts with this prefix
    fn alias_of(&self, key: &Key) -> Option<Key> {
        let prefix = format!("{} ", self.chord());
        key.as_str()
            .strip_prefix(&prefix)
            .map(|rest| Key(format!("{}{}+{}", prefix, self.modifier, rest)))
    }
}

pub const CTRL_X: PrefixChord = PrefixChord::new(Modifier::Ctrl, 'x');
pub const CTRL_Z: PrefixChord = PrefixChord::new(Modifier::Ctrl, 'z');

/// Prefix chords whose sequences are aliased during compilation
pub const PREFIX_CHORDS: [PrefixChord; 2] = [CTRL_X, CTRL_Z];

pub fn ctrl(key: impl Into<Key>) -> Key {
    key.into().with_modifier(Modifier::Ctrl)
}

pub fn alt(key: impl Into<Key>) -> Key {
    key.into().with_modifier(Modifier::Alt)
}

pub fn shift(key: impl Into<Key>) -> Key {
    key.into().with_modifier(Modifier::Shift)
}

/// `ctrl+x <secondary>`
pub fn ctrl_x(secondary: impl Into<Key>) -> Key {
    Key::sequence(&CTRL_X, secondary)
}

/// `ctrl+z <secondary>`
pub fn ctrl_z(secondary: impl Into<Key>) -> Key {
    Key::sequence(&CTRL_Z, secondary)
}

/// Named (non-character) keys
pub mod keys {
    pub const UP: &str = "up";
    pub const DOWN: &str = "down";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
    pub const PAGE_UP: &str = "pageup";
    pub const PAGE_DOWN: &str = "pagedown";
    pub const BACKSPACE: &str = "backspace";
    pub const DELETE: &str = "delete";
    pub const HOME: &str = "home";
    pub const END: &str = "end";
    pub const INSERT: &str = "insert";
    pub const TAB: &str = "tab";
    pub const ENTER: &str = "enter";
    pub const SPACE: &str = "space";
}
