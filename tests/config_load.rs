use std::error::Error;

use serde_json::json;

use sentinel::engine::Sentinel;
use sentinel::errors::ConfigError;
use sentinel::events::EngineEvent;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn missing_file_yields_not_found_and_leaves_config_unmodified() -> TestResult {
    let sentinel = Sentinel::new();

    let err = sentinel
        .load_config("/definitely/not/a/sentinel.json")
        .await
        .expect_err("load of a missing path must fail");

    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert_eq!(
        sentinel.config_snapshot().await,
        json!({ "files": [], "processors": {} })
    );

    Ok(())
}

#[tokio::test]
async fn directory_path_yields_not_found() -> TestResult {
    let dir = tempfile::tempdir()?;
    let sentinel = Sentinel::new();

    let err = sentinel
        .load_config(dir.path())
        .await
        .expect_err("load of a directory must fail");

    assert!(matches!(err, ConfigError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn invalid_json_yields_malformed_and_leaves_config_unmodified() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sentinel.json");
    std::fs::write(&path, "{ this is not json")?;

    let sentinel = Sentinel::new();
    let err = sentinel
        .load_config(&path)
        .await
        .expect_err("load of invalid JSON must fail");

    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert_eq!(
        sentinel.config_snapshot().await,
        json!({ "files": [], "processors": {} })
    );

    Ok(())
}

#[tokio::test]
async fn successful_load_merges_and_emits_config_loaded() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sentinel.json");
    let contents = r#"{
        "files": [{ "path": "src/app.c", "processor": "build", "target": "app" }],
        "processors": { "build": "gcc {{path}} -o {{target}}" }
    }"#;
    std::fs::write(&path, contents)?;

    let sentinel = Sentinel::new();
    let mut rx = sentinel.subscribe();

    sentinel.load_config(&path).await?;

    // The notification is emitted before load_config returns, so it is
    // already buffered for the subscriber.
    match rx.try_recv()? {
        EngineEvent::ConfigLoaded {
            path: event_path,
            parsed,
            raw,
        } => {
            assert_eq!(event_path, path);
            assert_eq!(
                parsed["processors"]["build"],
                json!("gcc {{path}} -o {{target}}")
            );
            assert_eq!(&*raw, contents.as_bytes());
        }
        other => panic!("expected ConfigLoaded, got {other:?}"),
    }

    let files = sentinel.files().await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "src/app.c");

    Ok(())
}

#[tokio::test]
async fn failed_layer_does_not_prevent_the_next_one() -> TestResult {
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("project.json");
    std::fs::write(&good, r#"{ "processors": { "build": "make" } }"#)?;

    let sentinel = Sentinel::new();

    let missing = dir.path().join("global.json");
    assert!(sentinel.load_config(&missing).await.is_err());
    sentinel.load_config(&good).await?;

    assert_eq!(
        sentinel.config_snapshot().await["processors"]["build"],
        json!("make")
    );

    Ok(())
}

#[tokio::test]
async fn later_layer_overrides_overlapping_keys_only() -> TestResult {
    let dir = tempfile::tempdir()?;
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    std::fs::write(
        &first,
        r#"{ "processors": { "build": "make", "test": "make test" } }"#,
    )?;
    std::fs::write(&second, r#"{ "processors": { "build": "cargo build" } }"#)?;

    let sentinel = Sentinel::new();
    sentinel.load_config(&first).await?;
    sentinel.load_config(&second).await?;

    let snapshot = sentinel.config_snapshot().await;
    assert_eq!(snapshot["processors"]["build"], json!("cargo build"));
    assert_eq!(snapshot["processors"]["test"], json!("make test"));

    Ok(())
}
