//! Receive loop behavior against an in-memory ingress and a real store file.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;

use chrono::NaiveDateTime;

use logsink_core::protocol::record::{TIMESTAMP_FORMAT, TIMESTAMP_LEN};
use logsink_server::lifecycle::{Controller, LifecycleState};
use logsink_server::sink::DurableSink;

use scripted_ingress::ScriptedIngress;

fn store_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Strip and validate the timestamp prefix.
fn payload(line: &str) -> &str {
    NaiveDateTime::parse_from_str(&line[..TIMESTAMP_LEN], TIMESTAMP_FORMAT)
        .unwrap_or_else(|e| panic!("bad timestamp in {line:?}: {e}"));
    assert_eq!(&line[TIMESTAMP_LEN..TIMESTAMP_LEN + 1], " ");
    &line[TIMESTAMP_LEN + 1..]
}

async fn run_script(
    path: &Path,
    append: bool,
    echo: bool,
    msgs: &[&str],
) -> Controller<ScriptedIngress, Vec<u8>> {
    let sink = DurableSink::open(path, append).await.unwrap();
    let mut ctrl = Controller::new(ScriptedIngress::new(msgs), sink, echo, Vec::new());
    ctrl.run().await.unwrap();
    ctrl
}

#[tokio::test]
async fn payloads_before_terminate_are_logged_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let msgs: Vec<String> = (0..25).map(|i| format!("host1 {i}: A log message")).collect();
    let mut script: Vec<&str> = msgs.iter().map(String::as_str).collect();
    script.push("@EXIT@");

    let ctrl = run_script(&path, true, false, &script).await;
    assert_eq!(ctrl.state(), LifecycleState::ShuttingDown);

    let lines = store_lines(&path);
    assert_eq!(lines.len(), msgs.len());
    for (line, msg) in lines.iter().zip(&msgs) {
        assert_eq!(payload(line), msg);
    }
    assert_eq!(ctrl.stats().received, 26);
    assert_eq!(ctrl.stats().logged, 25);
    assert_eq!(ctrl.sink().records_written(), 25);
}

#[tokio::test]
async fn hello_world_then_terminate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let sink = DurableSink::open(&path, true).await.unwrap();
    let mut ctrl = Controller::new(
        ScriptedIngress::new(["hello", "world", "@EXIT@", "never"]),
        sink,
        false,
        Vec::new(),
    );
    ctrl.run().await.unwrap();

    let lines = store_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(payload(&lines[0]), "hello");
    assert_eq!(payload(&lines[1]), "world");

    // Terminal state: nothing more is consumed or written.
    let state = ctrl.handle(bytes::Bytes::from_static(b"late")).await.unwrap();
    assert_eq!(state, LifecycleState::ShuttingDown);
    assert_eq!(store_lines(&path).len(), 2);
    assert_eq!(ctrl.stats().received, 3);
}

#[tokio::test]
async fn terminate_never_produces_a_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let ctrl = run_script(&path, true, true, &["please @exit@ now"]).await;
    assert!(store_lines(&path).is_empty());
    assert!(ctrl.console().is_empty());
    assert_eq!(ctrl.stats().terminate_directives, 1);
}

#[tokio::test]
async fn terminate_with_echo_sentinel_is_pure_control() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let ctrl = run_script(&path, true, false, &["@ECHO=true@ @EXIT@"]).await;
    assert!(store_lines(&path).is_empty());
    assert!(!ctrl.echo().should_echo());
    assert!(ctrl.console().is_empty());
}

#[tokio::test]
async fn echo_toggles_console_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let ctrl = run_script(
        &path,
        true,
        false,
        &[
            "quiet 1",
            "host1 @ECHO=true@",
            "loud 1",
            "loud 2",
            "@echo=FALSE@",
            "quiet 2",
            "@Echo=True@ loud 3",
            "@EXIT@",
        ],
    )
    .await;

    // Every non-terminate message is durable regardless of echo.
    assert_eq!(store_lines(&path).len(), 7);

    let console = String::from_utf8(ctrl.console().clone()).unwrap();
    let echoed: Vec<&str> = console.lines().map(payload).collect();
    assert_eq!(echoed, ["host1 @ECHO=true@", "loud 1", "loud 2", "@Echo=True@ loud 3"]);
    assert_eq!(ctrl.stats().echoed, 4);
    assert_eq!(ctrl.stats().echo_enable_directives, 2);
    assert_eq!(ctrl.stats().echo_disable_directives, 1);
}

#[tokio::test]
async fn echo_initially_on() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let ctrl = run_script(&path, true, true, &["a", "@ECHO=false@", "b", "@EXIT@"]).await;
    let console = String::from_utf8(ctrl.console().clone()).unwrap();
    let echoed: Vec<&str> = console.lines().map(payload).collect();
    assert_eq!(echoed, ["a"]);
}

#[tokio::test]
async fn payload_with_echo_sentinel_is_logged_and_flips_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let sink = DurableSink::open(&path, true).await.unwrap();
    let mut ctrl = Controller::new(ScriptedIngress::new(Vec::<&str>::new()), sink, false, Vec::new());
    ctrl.handle(bytes::Bytes::from_static(b"disk full @ECHO=true@"))
        .await
        .unwrap();

    assert!(ctrl.echo().should_echo());
    let lines = store_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(payload(&lines[0]), "disk full @ECHO=true@");
}

#[tokio::test]
async fn empty_messages_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    run_script(&path, true, false, &["", "", "@EXIT@"]).await;
    let lines = store_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| payload(l).is_empty()));
}

#[tokio::test]
async fn append_mode_preserves_existing_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");
    std::fs::write(&path, "old 1\nold 2\nold 3\n").unwrap();

    run_script(&path, true, false, &["new 1", "new 2", "@EXIT@"]).await;
    let lines = store_lines(&path);
    assert_eq!(lines.len(), 3 + 2);
    assert_eq!(lines[0], "old 1");
    assert_eq!(payload(&lines[4]), "new 2");
}

#[tokio::test]
async fn truncate_mode_discards_existing_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");
    std::fs::write(&path, "old 1\nold 2\nold 3\n").unwrap();

    run_script(&path, false, false, &["new 1", "new 2", "@EXIT@"]).await;
    let lines = store_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(payload(&lines[0]), "new 1");
}

#[tokio::test]
async fn ingress_failure_ends_the_loop_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.log");

    let sink = DurableSink::open(&path, true).await.unwrap();
    let mut ctrl = Controller::new(ScriptedIngress::new(["only"]), sink, false, Vec::new());
    let err = ctrl.run().await.expect_err("script runs dry without terminate");
    assert_eq!(err.class().as_str(), "TRANSPORT");
    assert_eq!(ctrl.state(), LifecycleState::Running);
    assert_eq!(store_lines(&path).len(), 1);
}

#[tokio::test]
async fn unwritable_store_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();

    let missing_parent = dir.path().join("no/such/dir/log.log");
    let err = DurableSink::open(&missing_parent, true).await.unwrap_err();
    assert_eq!(err.class().as_str(), "STARTUP");
    assert!(!missing_parent.parent().unwrap().exists());

    let err = DurableSink::open(dir.path(), false).await.unwrap_err();
    assert_eq!(err.class().as_str(), "STARTUP");
    assert_eq!(err.exit_code(), 1);
}
