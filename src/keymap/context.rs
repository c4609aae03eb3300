//! Condition algebra for context-gated keybindings
//!
//! A condition is kept as the exact `when` text the host will evaluate. The
//! algebra is purely textual: `and`/`or` join rendered text with `&&`/`||` and
//! nothing is simplified, reordered or de-duplicated.
//!
//! Negation is only defined on atoms. [`Atom::not`] is infallible, while
//! [`When::not`] rejects compound expressions with
//! [`KeymapError::InvalidNegation`].

use std::fmt;

use super::error::KeymapError;

/// A single named condition, possibly negated, or the empty "always" condition
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom(String);

impl Atom {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The unconditional atom, rendered as the empty string
    pub fn always() -> Self {
        Self(String::new())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn is_always(&self) -> bool {
        self.0.is_empty()
    }

    /// `!<name>`; the result is still an atom so it can be negated again
    pub fn not(&self) -> Atom {
        Atom(format!("!{}", self.0))
    }

    pub fn and(&self, other: impl Into<When>) -> When {
        When::Atom(self.clone()).and(other)
    }

    pub fn or(&self, other: impl Into<When>) -> When {
        When::Atom(self.clone()).or(other)
    }

    /// Check if the text is a bare identifier (letters and dots, non-empty)
    pub fn is_identifier(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphabetic() || c == '.')
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered `when` expression
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum When {
    Atom(Atom),
    /// Output of `and`/`or`; cannot be negated
    Compound(String),
}

impl When {
    pub fn always() -> Self {
        When::Atom(Atom::always())
    }

    /// Classify existing `when` text, e.g. from a YAML overlay
    ///
    /// Text containing `&&` or `||` is compound, anything else is an atom.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.contains("&&") || text.contains("||") {
            When::Compound(text.to_string())
        } else {
            When::Atom(Atom::new(text))
        }
    }

    pub fn text(&self) -> &str {
        match self {
            When::Atom(atom) => atom.text(),
            When::Compound(text) => text,
        }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, When::Atom(_))
    }

    pub fn and(&self, other: impl Into<When>) -> When {
        When::Compound(format!("{} && {}", self.text(), other.into().text()))
    }

    pub fn or(&self, other: impl Into<When>) -> When {
        When::Compound(format!("{} || {}", self.text(), other.into().text()))
    }

    pub fn not(&self) -> Result<When, KeymapError> {
        match self {
            When::Atom(atom) => Ok(When::Atom(atom.not())),
            When::Compound(text) => Err(KeymapError::InvalidNegation(text.clone())),
        }
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<Atom> for When {
    fn from(atom: Atom) -> Self {
        When::Atom(atom)
    }
}

impl From<&Atom> for When {
    fn from(atom: &Atom) -> Self {
        When::Atom(atom.clone())
    }
}

impl From<&When> for When {
    fn from(when: &When) -> Self {
        when.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus() -> Atom {
        Atom::new("editorTextFocus")
    }

    fn open() -> Atom {
        Atom::new("inQuickOpen")
    }

    #[test]
    fn test_and_or_render_text() {
        let and = focus().and(&open());
        let or = focus().or(&open());
        assert_eq!(and.text(), "editorTextFocus && inQuickOpen");
        assert_eq!(or.text(), "editorTextFocus || inQuickOpen");
    }

    #[test]
    fn test_and_or_are_compound() {
        assert!(!focus().and(&open()).is_atomic());
        assert!(!focus().or(&open()).is_atomic());
        assert!(When::from(focus()).is_atomic());
    }

    #[test]
    fn test_no_simplification() {
        let redundant = focus().and(&focus());
        assert_eq!(redundant.text(), "editorTextFocus && editorTextFocus");

        let chained = focus().and(&open().not()).and(&focus().not());
        assert_eq!(
            chained.text(),
            "editorTextFocus && !inQuickOpen && !editorTextFocus"
        );
    }

    #[test]
    fn test_double_negation_is_textual() {
        let twice = focus().not().not();
        assert_eq!(twice.text(), "!!editorTextFocus");

        let when = When::from(focus()).not().unwrap().not().unwrap();
        assert_eq!(when.text(), "!!editorTextFocus");
        assert!(when.is_atomic());
    }

    #[test]
    fn test_negating_compound_fails() {
        let compound = focus().or(&open());
        assert_eq!(
            compound.not(),
            Err(KeymapError::InvalidNegation(
                "editorTextFocus || inQuickOpen".to_string()
            ))
        );
        assert!(focus().and(&open()).not().is_err());
    }

    #[test]
    fn test_always_is_empty_atom() {
        let always = When::always();
        assert_eq!(always.text(), "");
        assert!(always.is_atomic());
        assert!(Atom::always().is_always());
    }

    #[test]
    fn test_identifier_pattern() {
        assert!(Atom::new("groog.context.recordMode").is_identifier());
        assert!(!Atom::new("").is_identifier());
        assert!(!focus().not().is_identifier());
        assert!(!Atom::new("editorLangId == 'markdown'").is_identifier());
        assert!(!Atom::new("mode2").is_identifier());
    }

    #[test]
    fn test_parse_classifies_text() {
        assert!(When::parse("editorTextFocus").is_atomic());
        assert!(When::parse("!inQuickOpen").is_atomic());
        assert!(!When::parse("a && b").is_atomic());
        assert!(!When::parse("a || b").is_atomic());
        assert_eq!(When::parse("  panelFocus ").text(), "panelFocus");
    }
}
