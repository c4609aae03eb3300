//! End-to-end compilation tests
//!
//! Default table → records → JSON, written to files and manifests.

use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use chordmap::keymap::{
    compile, compile_with, default_table, if_else, only_when, unconditional, Action, Atom,
    CompileOptions, KeyTable, KeymapError,
};
use chordmap::output::{existing_records, render_json, splice_manifest};
use chordmap::tracing::CompileSummary;

// ========================================================================
// Table Tests
// ========================================================================

#[test]
fn test_find_key_example() {
    let mode = Atom::new("mode==\"a\"");
    let table = KeyTable::new().bind(
        "ctrl+f",
        only_when("find", mode.clone()).with(mode.not(), Action::new("cursorRight")),
    );

    let records = compile(table).unwrap();
    let find: Vec<_> = records.iter().filter(|r| r.key == "ctrl+f").collect();
    assert_eq!(find.len(), 2);
    assert_eq!(find[0].command, "cursorRight");
    assert_eq!(find[1].command, "find");
}

#[test]
fn test_branch_needs_identifier() {
    let result = if_else(
        &Atom::new("editorLangId == 'markdown'"),
        Action::new("a"),
        Action::new("b"),
    );
    assert!(matches!(result, Err(KeymapError::MalformedCondition(_))));
}

#[test]
fn test_relaxed_alias_check_keeps_both_records() {
    let table = KeyTable::new()
        .bind("ctrl+z v", unconditional("a"))
        .bind("ctrl+z ctrl+v", unconditional("b"));

    assert!(matches!(
        compile(table.clone()),
        Err(KeymapError::AliasCollision { .. })
    ));

    let options = CompileOptions {
        check_alias_collisions: false,
    };
    let records = compile_with(table, &options).unwrap();
    let doubled: Vec<_> = records
        .iter()
        .filter(|r| r.key == "ctrl+z ctrl+v")
        .map(|r| r.command.as_str())
        .collect();
    assert_eq!(doubled, vec!["b", "a"]);
}

// ========================================================================
// Output Tests
// ========================================================================

#[test]
fn test_json_output_parses_back() {
    let records = compile(default_table().unwrap()).unwrap();
    let json = render_json(&records, true).unwrap();

    let parsed: Value = serde_json::from_str(&json).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), records.len());
    for r in array {
        assert!(r.get("key").is_some() && r.get("command").is_some());
        // Step hints never leak onto top-level records
        assert!(r.get("async").is_none() && r.get("delay").is_none());
    }
}

#[test]
fn test_manifest_round_trip_on_disk() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("package.json");
    fs::write(
        &path,
        r#"{"name": "groog", "contributes": {"commands": []}}"#,
    )
    .expect("Failed to write manifest");

    let records = compile(default_table().unwrap()).unwrap();
    let manifest = fs::read_to_string(&path).unwrap();
    fs::write(&path, splice_manifest(&manifest, &records).unwrap()).unwrap();

    let updated = fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(value["name"], "groog");
    let commands = value["contributes"]["commands"].as_array().unwrap();
    assert!(commands.is_empty());
    assert_eq!(existing_records(&updated).unwrap(), records);
}

#[test]
fn test_resplice_reports_no_changes() {
    let records = compile(default_table().unwrap()).unwrap();
    let manifest = splice_manifest("{}", &records).unwrap();

    let before = CompileSummary::from_records(&existing_records(&manifest).unwrap());
    let after = CompileSummary::from_records(&records);
    assert_eq!(before.diff(&after), None);
}
