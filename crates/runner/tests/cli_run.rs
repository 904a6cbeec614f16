//! Exit codes of the `trendalert` command
//!
//! Drives `cli::run` end to end with a real configuration file on disk and
//! in-memory collaborators.

mod common;

use chrono::NaiveDate;
use common::{FakeRenderer, FakeSource, RecordingNotifier, dropping};
use std::path::Path;
use std::sync::Arc;
use trendalert_ports::{FixedClock, IngestionError};
use trendalert_runner::cli::{self, Args, Collaborators};
use trendalert_runner::{EXIT_CONFIG, EXIT_OK, TEMPLATE};

// ============================================================================
// Test Fixtures
// ============================================================================

const VALID: &str = r#"
[general]
symbols = ["AAA", "GONE"]
webhook_url = "https://hooks.example.com/api/webhooks/1/secret"

[model_tuning]
days = 90
degree = 2
zlimit = 0.1
"#;

fn args(path: &Path, dry_run: bool) -> Args {
    Args {
        config: path.to_path_buf(),
        dry_run,
    }
}

fn collaborators(notifier: &Arc<RecordingNotifier>) -> Collaborators {
    Collaborators {
        source: Arc::new(
            FakeSource::new().with("AAA", Ok(dropping())).with(
                "GONE",
                Err(IngestionError::NoData {
                    symbol: "GONE".to_string(),
                }),
            ),
        ),
        notifier: notifier.clone(),
        renderer: Arc::new(FakeRenderer { fail: false }),
        clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())),
    }
}

fn unreachable_connect(_: &trendalert_runner::RunConfiguration) -> anyhow::Result<Collaborators> {
    panic!("collaborators must not be built without a valid configuration")
}

// ============================================================================
// Configuration failures
// ============================================================================

#[tokio::test]
async fn test_missing_config_writes_template_and_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let code = cli::run(&args(&path, false), unreachable_connect)
        .await
        .unwrap();

    assert_eq!(code, EXIT_CONFIG);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);
}

#[tokio::test]
async fn test_untouched_template_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, TEMPLATE).unwrap();

    let code = cli::run(&args(&path, false), unreachable_connect)
        .await
        .unwrap();

    assert_eq!(code, EXIT_CONFIG);
}

#[tokio::test]
async fn test_invalid_value_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        VALID.replace(
            "[model_tuning]",
            "[network]\ndata_source_url = \"not a url\"\n\n[model_tuning]",
        ),
    )
    .unwrap();

    let code = cli::run(&args(&path, false), unreachable_connect)
        .await
        .unwrap();

    assert_eq!(code, EXIT_CONFIG);
}

// ============================================================================
// Completed batches
// ============================================================================

#[tokio::test]
async fn test_batch_with_failed_instrument_exits_ok() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());

    let code = cli::run(&args(&path, false), |config| {
        assert_eq!(config.symbols, vec!["AAA", "GONE"]);
        Ok(collaborators(&notifier))
    })
    .await
    .unwrap();

    assert_eq!(code, EXIT_OK);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "It's a great time to buy AAA");
}

#[tokio::test]
async fn test_dry_run_flag_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID).unwrap();
    let notifier = Arc::new(RecordingNotifier::default());

    let code = cli::run(&args(&path, true), |_| Ok(collaborators(&notifier)))
        .await
        .unwrap();

    assert_eq!(code, EXIT_OK);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_connect_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID).unwrap();

    let result = cli::run(&args(&path, false), |_| {
        Err(anyhow::anyhow!("tls backend unavailable"))
    })
    .await;

    assert!(result.is_err());
}
