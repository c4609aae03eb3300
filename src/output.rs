//! Writing compiled records
//!
//! Records go out either as a bare JSON array or spliced into an extension
//! manifest's `contributes.keybindings`, leaving the rest of the manifest as is.

use serde_json::{Map, Value};

use crate::keymap::{KeybindingRecord, KeymapError};

/// Render records as a JSON array with a trailing newline
pub fn render_json(records: &[KeybindingRecord], pretty: bool) -> Result<String, KeymapError> {
    let mut json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|e| KeymapError::SerializeError(e.to_string()))?;

    json.push('\n');
    Ok(json)
}

fn parse_manifest(manifest_json: &str) -> Result<Map<String, Value>, KeymapError> {
    match serde_json::from_str(manifest_json) {
        Ok(Value::Object(manifest)) => Ok(manifest),
        Ok(_) => Err(KeymapError::ParseError(
            "Manifest is not a JSON object".to_string(),
        )),
        Err(e) => Err(KeymapError::ParseError(e.to_string())),
    }
}

/// Replace `contributes.keybindings` in a manifest, returning the new document
///
/// `contributes` is created when missing. Other fields keep their order.
pub fn splice_manifest(
    manifest_json: &str,
    records: &[KeybindingRecord],
) -> Result<String, KeymapError> {
    let mut manifest = parse_manifest(manifest_json)?;
    let keybindings = serde_json::to_value(records)
        .map_err(|e| KeymapError::SerializeError(e.to_string()))?;

    let contributes = manifest
        .entry("contributes")
        .or_insert_with(|| Value::Object(Map::new()));
    match contributes {
        Value::Object(contributes) => {
            contributes.insert("keybindings".to_string(), keybindings);
        }
        _ => {
            return Err(KeymapError::ParseError(
                "Manifest field `contributes` is not an object".to_string(),
            ))
        }
    }

    let mut json = serde_json::to_string_pretty(&Value::Object(manifest))
        .map_err(|e| KeymapError::SerializeError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// Records currently in a manifest's `contributes.keybindings`
pub fn existing_records(manifest_json: &str) -> Result<Vec<KeybindingRecord>, KeymapError> {
    let manifest = parse_manifest(manifest_json)?;
    let Some(keybindings) = manifest
        .get("contributes")
        .and_then(|contributes| contributes.get("keybindings"))
    else {
        return Ok(Vec::new());
    };

    serde_json::from_value(keybindings.clone())
        .map_err(|e| KeymapError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(key: &str, command: &str, when: &str) -> KeybindingRecord {
        KeybindingRecord {
            key: key.to_string(),
            command: command.to_string(),
            when: when.to_string(),
            args: None,
        }
    }

    #[test]
    fn test_render_compact() {
        let records = vec![record("ctrl+w", "groog.yank", "")];
        assert_eq!(
            render_json(&records, false).unwrap(),
            "[{\"key\":\"ctrl+w\",\"command\":\"groog.yank\"}]\n"
        );
    }

    #[test]
    fn test_render_pretty_has_trailing_newline() {
        let records = vec![record("ctrl+k", "groog.kill", "!groog.context.findMode")];
        let json = render_json(&records, true).unwrap();
        assert!(json.ends_with("}\n]\n"));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["when"], "!groog.context.findMode");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_json(&[], false).unwrap(), "[]\n");
    }

    #[test]
    fn test_splice_replaces_keybindings() {
        let manifest = r#"{
  "name": "groog",
  "version": "1.0.0",
  "contributes": {
    "commands": [{"command": "groog.yank"}],
    "keybindings": [{"key": "old", "command": "old"}]
  }
}"#;
        let records = vec![record("ctrl+w", "groog.yank", "")];
        let spliced = splice_manifest(manifest, &records).unwrap();
        let value: Value = serde_json::from_str(&spliced).unwrap();

        assert_eq!(
            value["contributes"]["keybindings"],
            json!([{"key": "ctrl+w", "command": "groog.yank"}])
        );
        assert_eq!(value["contributes"]["commands"][0]["command"], "groog.yank");
        assert_eq!(value["version"], "1.0.0");
    }

    #[test]
    fn test_splice_preserves_field_order() {
        let manifest = r#"{"version": "1.0.0", "name": "groog"}"#;
        let spliced = splice_manifest(manifest, &[]).unwrap();

        let version = spliced.find("\"version\"").unwrap();
        let name = spliced.find("\"name\"").unwrap();
        let contributes = spliced.find("\"contributes\"").unwrap();
        assert!(version < name && name < contributes);
    }

    #[test]
    fn test_splice_creates_contributes() {
        let spliced = splice_manifest("{}", &[record("a", "b", "c")]).unwrap();
        let value: Value = serde_json::from_str(&spliced).unwrap();
        assert_eq!(
            value["contributes"]["keybindings"],
            json!([{"key": "a", "command": "b", "when": "c"}])
        );
    }

    #[test]
    fn test_splice_rejects_non_object() {
        assert!(matches!(
            splice_manifest("[]", &[]),
            Err(KeymapError::ParseError(_))
        ));
        assert!(matches!(
            splice_manifest(r#"{"contributes": 3}"#, &[]),
            Err(KeymapError::ParseError(_))
        ));
        assert!(matches!(
            splice_manifest("not json", &[]),
            Err(KeymapError::ParseError(_))
        ));
    }

    #[test]
    fn test_existing_records() {
        let manifest = r#"{"contributes": {"keybindings": [
            {"key": "ctrl+w", "command": "groog.yank"},
            {"key": "ctrl+k", "command": "groog.kill", "when": "editorTextFocus"}
        ]}}"#;
        let records = existing_records(manifest).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].when, "");
        assert_eq!(records[1].when, "editorTextFocus");

        assert!(existing_records("{}").unwrap().is_empty());
    }
}
