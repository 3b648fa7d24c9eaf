use std::error::Error;

use serde_json::json;

use sentinel::config::{ConfigStore, ProcessorRef, merge_value};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn merging_empty_object_is_identity() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({
        "files": [{ "path": "src/app.c", "processor": "build" }],
        "processors": { "build": "gcc {{path}}" }
    }));

    let before = store.root().clone();
    store.merge(json!({}));
    assert_eq!(store.root(), &before);

    Ok(())
}

#[test]
fn structured_values_merge_recursively() -> TestResult {
    let mut target = json!({});

    merge_value(json!({ "a": { "x": 1 } }), &mut target);
    merge_value(json!({ "a": { "y": 2 } }), &mut target);

    assert_eq!(target, json!({ "a": { "x": 1, "y": 2 } }));
    Ok(())
}

#[test]
fn scalar_replaces_whole_subtree() -> TestResult {
    let mut target = json!({});

    merge_value(json!({ "a": { "x": 1 } }), &mut target);
    merge_value(json!({ "a": 5 }), &mut target);

    assert_eq!(target, json!({ "a": 5 }));
    Ok(())
}

#[test]
fn arrays_replace_rather_than_merge() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({
        "files": [{ "path": "a.c" }, { "path": "b.c" }]
    }));
    store.merge(json!({
        "files": [{ "path": "c.c" }]
    }));

    let files = store.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "c.c");

    Ok(())
}

#[test]
fn keys_absent_from_incoming_survive() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({ "processors": { "build": "make" } }));
    store.merge(json!({ "files": [{ "path": "a.c" }] }));

    assert_eq!(store.processor_template("build"), Some("make"));
    assert_eq!(store.files().len(), 1);

    Ok(())
}

#[test]
fn overlapping_processor_names_are_overridden_others_kept() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({ "processors": { "build": "make", "test": "make test" } }));
    store.merge(json!({ "processors": { "build": "cargo build" } }));

    assert_eq!(store.processor_template("build"), Some("cargo build"));
    assert_eq!(store.processor_template("test"), Some("make test"));

    Ok(())
}

#[test]
fn non_object_incoming_is_a_no_op() -> TestResult {
    let mut target = json!({ "a": 1 });
    merge_value(json!(5), &mut target);
    assert_eq!(target, json!({ "a": 1 }));

    merge_value(json!([1, 2, 3]), &mut target);
    assert_eq!(target, json!({ "a": 1 }));

    Ok(())
}

#[test]
fn watch_entries_decode_extras_and_processor_lists() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({
        "files": [
            { "path": "src/app.c", "processor": "build", "target": "app" },
            { "path": "docs/readme.md", "processor": ["lint", "publish"] },
            { "path": "plain.txt" }
        ]
    }));

    let files = store.files();
    assert_eq!(files.len(), 3);

    assert_eq!(files[0].extra.get("target"), Some(&json!("app")));
    assert_eq!(
        files[0].processor,
        Some(ProcessorRef::One("build".to_string()))
    );

    assert_eq!(
        files[1].processor,
        Some(ProcessorRef::Many(vec![
            "lint".to_string(),
            "publish".to_string()
        ]))
    );

    assert_eq!(files[2].processor, None);

    Ok(())
}

#[test]
fn entries_without_path_are_skipped() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({
        "files": [
            { "processor": "build" },
            { "path": "src/app.c" }
        ]
    }));

    let files = store.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "src/app.c");

    Ok(())
}

#[test]
fn entry_args_include_path_processor_and_extras() -> TestResult {
    let mut store = ConfigStore::new();
    store.merge(json!({
        "files": [{ "path": "src/app.c", "processor": "build", "target": "app", "opt": 2 }]
    }));

    let entry = store.files().remove(0);
    let args = entry.as_args();

    assert_eq!(args.get("path"), Some(&json!("src/app.c")));
    assert_eq!(args.get("processor"), Some(&json!("build")));
    assert_eq!(args.get("target"), Some(&json!("app")));
    assert_eq!(args.get("opt"), Some(&json!(2)));

    Ok(())
}
