//! Errors raised while building or compiling a keybinding table

/// Errors that abort table construction or compilation
///
/// Every variant is fatal: the compiler never produces partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// The same key was defined twice (hand-authored, overlay or synthesized)
    DuplicateKey(String),
    /// Attempted to negate a compound (`&&`/`||`) condition
    InvalidNegation(String),
    /// A branch condition was not a bare identifier (letters and dots only)
    MalformedCondition(String),
    /// Two distinct raw keys expanded to the same key and condition
    AliasCollision { key: String, when: String },
    IoError(String),
    ParseError(String),
    /// Records could not be rendered as JSON
    SerializeError(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::DuplicateKey(k) => write!(f, "Key defined more than once: {}", k),
            KeymapError::InvalidNegation(w) => {
                write!(f, "Cannot negate a compound condition: {}", w)
            }
            KeymapError::MalformedCondition(w) => write!(
                f,
                "Condition {:?} does not match required pattern ^[a-zA-Z.]+$",
                w
            ),
            KeymapError::AliasCollision { key, when } => write!(
                f,
                "Alias expansion produced duplicate binding for {} (when {:?})",
                key, when
            ),
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_duplicate_key() {
        let err = KeymapError::DuplicateKey("ctrl+f".to_string());
        assert_eq!(err.to_string(), "Key defined more than once: ctrl+f");
    }

    #[test]
    fn test_display_serialize_error() {
        let err = KeymapError::SerializeError("key must be a string".to_string());
        assert_eq!(err.to_string(), "Serialize error: key must be a string");
    }

    #[test]
    fn test_display_alias_collision_mentions_key() {
        let err = KeymapError::AliasCollision {
            key: "ctrl+x ctrl+p".to_string(),
            when: String::new(),
        };
        assert!(err.to_string().contains("ctrl+x ctrl+p"));
    }
}
