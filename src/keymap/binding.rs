//! Binding tables and the helpers they are assembled from
//!
//! A [`KeyTable`] maps each key to a [`Bindings`] map, which in turn maps the
//! rendered `when` text to the [`Action`] to run. Two conditions that render to
//! the same text are the same entry.

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::command::Action;
use super::conditions::{
    active_panel, focus_context, panel_focus, qmk_mode, recording, terminal_focus,
};
use super::context::{Atom, When};
use super::error::KeymapError;
use super::types::Key;

/// Condition text → action for a single key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(BTreeMap<String, Action>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern)
    pub fn with(mut self, when: impl Into<When>, action: Action) -> Self {
        self.insert(&when.into(), action);
        self
    }

    /// Insert an entry, returning the action previously bound to the same text
    pub fn insert(&mut self, when: &When, action: Action) -> Option<Action> {
        self.0.insert(when.text().to_string(), action)
    }

    /// Layer `other` on top of `self`; entries in `other` win
    pub fn merge(mut self, other: Bindings) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, when: &str) -> Option<&Action> {
        self.0.get(when)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in condition-text order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.0.iter().map(|(when, action)| (when.as_str(), action))
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Action);
    type IntoIter = btree_map::IntoIter<String, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The raw, hand-authored table: keys in authoring order
///
/// Duplicate keys are accepted here and rejected when the table is compiled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyTable {
    entries: Vec<(Key, Bindings)>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key (builder pattern)
    pub fn bind(mut self, key: impl Into<Key>, bindings: Bindings) -> Self {
        self.push(key, bindings);
        self
    }

    pub fn push(&mut self, key: impl Into<Key>, bindings: Bindings) {
        self.entries.push((key.into(), bindings));
    }

    /// Append all entries of `other`
    pub fn extend(&mut self, other: KeyTable) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[(Key, Bindings)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Key, Bindings)> for KeyTable {
    fn from_iter<I: IntoIterator<Item = (Key, Bindings)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for KeyTable {
    type Item = (Key, Bindings);
    type IntoIter = std::vec::IntoIter<(Key, Bindings)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Run `action` regardless of context
pub fn unconditional(action: impl Into<Action>) -> Bindings {
    only_when(action, When::always())
}

/// Run `action` only when `when` holds
pub fn only_when(action: impl Into<Action>, when: impl Into<When>) -> Bindings {
    Bindings::new().with(when, action.into())
}

/// Run `action` only while text is being edited (editor or find input)
pub fn text_only(action: impl Into<Action>) -> Bindings {
    only_when(action, focus_context())
}

fn require_identifier(atom: &Atom) -> Result<(), KeymapError> {
    if atom.is_identifier() {
        Ok(())
    } else {
        Err(KeymapError::MalformedCondition(atom.text().to_string()))
    }
}

/// Run `on_true` when `when` holds and `on_false` otherwise
///
/// `when` must be a bare identifier. A `None` branch leaves that case unbound.
pub fn if_else(
    when: &Atom,
    on_true: impl Into<Option<Action>>,
    on_false: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    require_identifier(when)?;

    let mut bindings = Bindings::new();
    if let Some(action) = on_true.into() {
        bindings.insert(&when.into(), action);
    }
    if let Some(action) = on_false.into() {
        bindings.insert(&when.not().into(), action);
    }
    Ok(bindings)
}

/// Three-way branch: `inner` → `first`, `outer && !inner` → `second`,
/// `!outer` → `third`
pub fn if_else_if(
    inner: &Atom,
    outer: &Atom,
    first: impl Into<Option<Action>>,
    second: impl Into<Option<Action>>,
    third: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    require_identifier(outer)?;

    let mut bindings = if_else(inner, first, None)?;
    if let Some(action) = second.into() {
        bindings.insert(&outer.and(&inner.not()), action);
    }
    if let Some(action) = third.into() {
        bindings.insert(&outer.not().into(), action);
    }
    Ok(bindings)
}

/// `panel` while a panel is visible, `other` otherwise
pub fn panel_split(
    panel: impl Into<Option<Action>>,
    other: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    if_else(&active_panel(), panel, other)
}

/// `recording` while a macro is being recorded, `other` otherwise
pub fn recording_split(
    recording_action: impl Into<Option<Action>>,
    other: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    if_else(&recording(), recording_action, other)
}

/// `qmk` in QMK keyboard mode, `basic` otherwise
pub fn keyboard_split(
    basic: impl Into<Option<Action>>,
    qmk: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    if_else(&qmk_mode(), qmk, basic)
}

/// Terminal focused, other panel focused, or neither
pub fn terminal_panel_split(
    terminal: impl Into<Option<Action>>,
    panel: impl Into<Option<Action>>,
    other: impl Into<Option<Action>>,
) -> Result<Bindings, KeymapError> {
    if_else_if(&terminal_focus(), &panel_focus(), terminal, panel, other)
}
