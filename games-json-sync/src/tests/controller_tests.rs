use super::*;
use games_json_catalog::{NO_ICON, NO_ID, NO_TITLE};
use serde_json::json;

fn gamepad_entry(title: &str) -> ControllerRecord {
    serde_json::from_value(json!({
        "key": "g1",
        "title": title,
        "id": "c1",
        "icon": "i1",
        "name": "Controller Type: Gamepad",
        "packages": ["p1"]
    }))
    .unwrap()
}

// -- extraction --

#[test]
fn test_extract_emits_one_record_per_controller_tag() {
    let doc = json!({"gamesMetadata": {
        "g1": {"title": "Foo", "tags": [
            {"id": "t0", "icon": "i0", "name": "Singleplayer", "packages": []},
            {"id": "c1", "icon": "i1", "name": "Controller Type: Gamepad", "packages": ["p1"]},
            {"id": "c2", "icon": "i2", "name": "Controller Type: Keyboard", "packages": []}
        ]},
        "g2": {"title": "Bar", "tags": []},
        "g3": {"title": "Baz"}
    }});

    let records = extract_controller_records(&doc).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].key, "g1");
    assert_eq!(records[0].title, "Foo");
    assert_eq!(records[0].id, json!("c1"));
    assert_eq!(records[1].name, "Controller Type: Keyboard");
}

#[test]
fn test_extract_defaults_missing_fields() {
    let doc = json!({"gamesMetadata": {
        "g1": {"tags": [{"name": "Controller Type: Wheel"}]}
    }});

    let records = extract_controller_records(&doc).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, NO_TITLE);
    assert_eq!(records[0].id, json!(NO_ID));
    assert_eq!(records[0].icon, json!(NO_ICON));
    assert_eq!(records[0].packages, json!([]));
}

#[test]
fn test_extract_follows_catalog_order() {
    let doc = json!({"gamesMetadata": {
        "z": {"title": "Z", "tags": [{"name": "Controller Type: A"}]},
        "a": {"title": "A", "tags": [{"name": "Controller Type: B"}]}
    }});

    let keys: Vec<String> = extract_controller_records(&doc)
        .unwrap()
        .into_iter()
        .map(|r| r.key)
        .collect();
    assert_eq!(keys, ["z", "a"]);
}

#[test]
fn test_extract_skips_malformed_records() {
    let doc = json!({"gamesMetadata": {
        "bad": 17,
        "bad-title": {"title": ["x"], "tags": [{"name": "Controller Type: A"}]},
        "bad-tags": {"title": "T", "tags": "Controller Type"},
        "ok": {"title": "Ok", "tags": [{"name": "Controller Type: A"}]}
    }});

    let records = extract_controller_records(&doc).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "ok");
}

#[test]
fn test_extract_without_games_metadata_is_empty() {
    assert!(extract_controller_records(&json!({})).unwrap().is_empty());
}

#[test]
fn test_extract_rejects_wrong_shaped_metadata() {
    let err = extract_controller_records(&json!({"gamesMetadata": [1]})).unwrap_err();
    assert!(matches!(err, CatalogError::Schema(_)));
}

// -- apply --

#[test]
fn test_apply_adds_tag_to_matching_record() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo", "tags": []}}});
    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();

    assert_eq!(
        doc["gamesMetadata"]["g1"]["tags"],
        json!([{"id": "c1", "icon": "i1", "name": "Controller Type: Gamepad", "packages": ["p1"]}])
    );
    assert_eq!(stats.added, 1);
    assert_eq!(stats.matched, 1);
    assert!(stats.changed());
}

#[test]
fn test_apply_creates_missing_tags() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo"}}});
    apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();
    assert_eq!(doc["gamesMetadata"]["g1"]["tags"].as_array().unwrap().len(), 1);
}

#[test]
fn test_apply_keeps_existing_tags_and_appends() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo", "tags": [
        {"id": "t0", "icon": "i0", "name": "Singleplayer", "packages": []}
    ]}}});
    apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();

    let tags = doc["gamesMetadata"]["g1"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["name"], "Singleplayer");
    assert_eq!(tags[1]["name"], "Controller Type: Gamepad");
}

#[test]
fn test_apply_does_not_duplicate_existing_controller_tag() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo", "tags": [
        {"id": "old", "icon": "old", "name": "Controller Type: Keyboard", "packages": []}
    ]}}});
    let before = doc.clone();

    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();
    assert_eq!(doc, before);
    assert_eq!(stats.already_tagged, 1);
    assert!(!stats.changed());
}

#[test]
fn test_apply_twice_is_idempotent() {
    let mut doc = json!({"gamesMetadata": {
        "g1": {"title": "Foo", "tags": []},
        "g2": {"title": "Bar"}
    }});
    let sidecar = [gamepad_entry("Foo"), gamepad_entry("Bar")];

    apply_controller_records(&mut doc, &sidecar).unwrap();
    let once = doc.clone();
    let stats = apply_controller_records(&mut doc, &sidecar).unwrap();

    assert_eq!(doc, once);
    assert_eq!(stats.added, 0);
    assert_eq!(stats.already_tagged, 2);
}

#[test]
fn test_apply_leaves_unmatched_records_untouched() {
    let mut doc = json!({"gamesMetadata": {
        "g1": {"title": "Foo"},
        "g2": {"title": "Other", "custom": {"nested": [1, 2]}}
    }});
    let before = serde_json::to_string(&doc["gamesMetadata"]["g2"]).unwrap();

    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();

    let after = serde_json::to_string(&doc["gamesMetadata"]["g2"]).unwrap();
    assert_eq!(before, after);
    assert!(doc["gamesMetadata"]["g2"].get("tags").is_none());
    assert_eq!(stats.unmatched, 1);
}

#[test]
fn test_apply_first_sidecar_entry_wins() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo", "tags": []}}});
    let mut second = gamepad_entry("Foo");
    second.id = json!("c2");
    second.name = "Controller Type: Wheel".to_string();

    apply_controller_records(&mut doc, &[gamepad_entry("Foo"), second]).unwrap();

    let tags = doc["gamesMetadata"]["g1"]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["id"], "c1");
}

#[test]
fn test_apply_matches_by_title_not_key() {
    let mut doc = json!({"gamesMetadata": {"other-key": {"title": "Foo"}}});
    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();
    assert_eq!(stats.added, 1);
}

#[test]
fn test_apply_tags_every_record_sharing_a_title() {
    let mut doc = json!({"gamesMetadata": {
        "g1": {"title": "Foo"},
        "g2": {"title": "Foo"}
    }});
    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();
    assert_eq!(stats.added, 2);
}

#[test]
fn test_apply_skips_record_with_non_array_tags() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo", "tags": {"a": 1}}}});
    let stats = apply_controller_records(&mut doc, &[gamepad_entry("Foo")]).unwrap();
    assert_eq!(doc["gamesMetadata"]["g1"]["tags"], json!({"a": 1}));
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_apply_defaults_sparse_sidecar_entry() {
    let mut doc = json!({"gamesMetadata": {"g1": {"title": "Foo"}}});
    let sparse: ControllerRecord =
        serde_json::from_value(json!({"title": "Foo", "name": "Controller Type: Pad"})).unwrap();

    apply_controller_records(&mut doc, &[sparse]).unwrap();
    assert_eq!(
        doc["gamesMetadata"]["g1"]["tags"][0],
        json!({"id": NO_ID, "icon": NO_ICON, "name": "Controller Type: Pad", "packages": []})
    );
}

#[test]
fn test_extract_then_apply_restores_removed_tags() {
    let original = json!({"gamesMetadata": {
        "g1": {"title": "Foo", "tags": [
            {"id": "t0", "icon": "i0", "name": "Co-op", "packages": []},
            {"id": "c1", "icon": "i1", "name": "Controller Type: Gamepad", "packages": ["p1"]}
        ]},
        "g2": {"title": "Bar", "tags": [
            {"id": "c9", "icon": "i9", "name": "Controller Type: Keyboard", "packages": []}
        ]}
    }});
    let sidecar = extract_controller_records(&original).unwrap();

    let mut stripped = original.clone();
    for (_, record) in stripped["gamesMetadata"].as_object_mut().unwrap().iter_mut() {
        record["tags"]
            .as_array_mut()
            .unwrap()
            .retain(|tag| !is_controller_tag(tag));
    }

    apply_controller_records(&mut stripped, &sidecar).unwrap();
    assert_eq!(stripped, original);
}

#[test]
fn test_controller_passes_ignore_wrong_shaped_suid_data() {
    let mut doc = json!({
        "gamesMetadata": {"g1": {"title": "Foo", "tags": [{"name": "Controller Type: Pad"}]}},
        "gameSUIDsData": []
    });
    let records = extract_controller_records(&doc).unwrap();
    assert_eq!(records.len(), 1);

    doc["gamesMetadata"]["g1"]["tags"] = json!([]);
    let stats = apply_controller_records(&mut doc, &records).unwrap();
    assert_eq!(stats.added, 1);
    assert_eq!(doc["gameSUIDsData"], json!([]));
}
