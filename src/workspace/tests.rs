use super::*;
use serde_json::json;
use std::io::Write;

fn scenario_a() -> serde_json::Value {
    json!({
        "1": {"type": "folder", "name": "Notes", "parentId": ""},
        "2": {"type": "file", "name": "Todo", "parentId": "1"},
        "2/content": {"type": "content", "text": "- buy milk"}
    })
}

#[test]
fn test_parse_nodes_and_content() {
    let ws = Workspace::from_value(scenario_a()).unwrap();

    assert_eq!(ws.len(), 2);
    assert_eq!(ws.file_count(), 1);

    let folder = ws.get("1").unwrap();
    assert_eq!(folder.kind, RecordKind::Folder);
    assert_eq!(folder.name, "Notes");
    assert_eq!(folder.parent, ParentRef::Root);

    let file = ws.get("2").unwrap();
    assert!(file.is_file());
    assert_eq!(file.parent, ParentRef::Record("1".to_string()));
    assert_eq!(file.content_id(), "2/content");
    assert_eq!(ws.content("2"), Some("- buy milk"));
}

#[test]
fn test_parent_id_variants() {
    let ws = Workspace::from_value(json!({
        "a": {"type": "file", "name": "Empty", "parentId": ""},
        "b": {"type": "file", "name": "Null", "parentId": null},
        "c": {"type": "file", "name": "Missing"},
        "d": {"type": "file", "name": "Old", "parentId": "trash"},
        "e": {"type": "file", "name": "Child", "parentId": "f"},
        "f": {"type": "folder", "name": "Parent"}
    }))
    .unwrap();

    assert_eq!(ws.get("a").unwrap().parent, ParentRef::Root);
    assert_eq!(ws.get("b").unwrap().parent, ParentRef::Root);
    assert_eq!(ws.get("c").unwrap().parent, ParentRef::Root);
    assert_eq!(ws.get("d").unwrap().parent, ParentRef::Trash);
    assert_eq!(
        ws.get("e").unwrap().parent,
        ParentRef::Record("f".to_string())
    );
}

#[test]
fn test_non_node_entries_are_ignored() {
    let ws = Workspace::from_value(json!({
        "settings": {"type": "settings", "text": "{}"},
        "workspaces": {"type": "data", "data": {"main": {}}},
        "x/syncLocation": {"type": "syncLocation", "fileId": "x"},
        "x": {"type": "file", "name": "Only", "parentId": ""}
    }))
    .unwrap();

    assert_eq!(ws.len(), 1);
    assert_eq!(ws.files().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(ws.content("x"), None);
}

#[test]
fn test_node_without_name_is_malformed() {
    let result = Workspace::from_value(json!({
        "1": {"type": "folder", "parentId": ""}
    }));
    assert!(matches!(result, Err(ExportError::MalformedInput(_))));
    assert!(result.unwrap_err().to_string().contains("has no name"));
}

#[test]
fn test_invalid_json_is_malformed() {
    let result = Workspace::from_json_str("{\"1\": {\"type\": ");
    assert!(matches!(result, Err(ExportError::MalformedInput(_))));

    let result = Workspace::from_json_str("[1, 2, 3]");
    assert!(matches!(result, Err(ExportError::MalformedInput(_))));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("StackEdit workspace.json");

    let result = Workspace::load(&path, &TextEncoding::default());
    match result {
        Err(ExportError::InputNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected InputNotFound, got {:?}", other),
    }
}

#[test]
fn test_load_bom_prefixed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"\xEF\xBB\xBF").unwrap();
    file.write_all(scenario_a().to_string().as_bytes()).unwrap();
    drop(file);

    let ws = Workspace::load(&path, &TextEncoding::utf8_sig()).unwrap();
    assert_eq!(ws.file_count(), 1);
    assert_eq!(ws.content("2"), Some("- buy milk"));
}

#[test]
fn test_load_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "not json").unwrap();

    let err = Workspace::load(&path, &TextEncoding::default()).unwrap_err();
    assert!(matches!(err, ExportError::MalformedInput(_)));
    assert!(err.to_string().contains("broken.json"));
}
