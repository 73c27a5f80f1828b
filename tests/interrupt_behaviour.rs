use std::time::{Duration, Instant};

use procdrain::{ProcessError, VerboseProcess};
use procdrain_test_utils::builders::sh;
use procdrain_test_utils::{init_tracing, with_timeout};

fn signal(pid: u32, sig: &str) -> bool {
    std::process::Command::new("kill")
        .arg(sig)
        .arg(pid.to_string())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn test_interrupt_during_exit_wait_is_an_error() {
    init_tracing();
    let mut process = VerboseProcess::spawn(sh("echo started; exec sleep 5")).unwrap();
    let pid = process.id().unwrap();
    let interrupter = process.interrupter();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(interrupter.interrupt());
    });

    let started = Instant::now();
    let result = with_timeout(process.stdout()).await;

    match result {
        Err(ProcessError::Interrupted) => {}
        other => panic!("Expected Interrupted, got: {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(4));
    signal(pid, "-9");
}

#[tokio::test]
async fn test_quiet_retrieval_is_interrupted_too() {
    let mut process = VerboseProcess::spawn(sh("exec sleep 5")).unwrap();
    let pid = process.id().unwrap();
    let interrupter = process.interrupter();
    interrupter.interrupt();

    let result = with_timeout(process.stdout_quietly()).await;
    assert!(matches!(result, Err(ProcessError::Interrupted)));
    signal(pid, "-9");
}

#[tokio::test]
async fn test_interrupted_child_keeps_running() {
    init_tracing();
    let mut process = VerboseProcess::spawn(sh("exec sleep 5")).unwrap();
    let pid = process.id().unwrap();
    process.interrupter().interrupt();

    let result = with_timeout(process.stdout()).await;
    assert!(matches!(result, Err(ProcessError::Interrupted)));

    // The process value is gone, the child is not.
    assert!(signal(pid, "-0"), "child {pid} should still be alive");
    assert!(signal(pid, "-9"));
}

#[tokio::test]
async fn test_dropped_interrupter_does_not_interrupt() {
    let mut process = VerboseProcess::spawn(sh("sleep 0.2; echo done")).unwrap();
    drop(process.interrupter());

    let captured = with_timeout(process.stdout()).await.unwrap();
    assert_eq!(captured.stdout, "done\n");
}

#[tokio::test]
async fn test_interrupt_after_exit_is_ignored() {
    let mut process = VerboseProcess::spawn(sh("echo quick")).unwrap();
    let interrupter = process.interrupter();

    let captured = with_timeout(process.stdout()).await.unwrap();
    assert_eq!(captured.stdout, "quick\n");
    assert!(!interrupter.interrupt());
}
