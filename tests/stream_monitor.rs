use std::io::Cursor;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};

use procdrain::capture::{CompletionBarrier, LineSink, MonitorSpec, SharedBuffer, spawn_monitor};
use procdrain::{Severity, StreamKind};
use procdrain_test_utils::recording_sink::RecordingSink;
use procdrain_test_utils::{init_tracing, with_timeout};

fn spec(kind: StreamKind, level: Severity) -> MonitorSpec {
    MonitorSpec { kind, level }
}

/// Yields `data` once, then fails every subsequent read.
struct FailingReader {
    data: Option<Vec<u8>>,
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match self.data.take() {
            Some(data) => {
                buf.put_slice(&data);
                Poll::Ready(Ok(()))
            }
            None => Poll::Ready(Err(std::io::Error::other("pipe exploded"))),
        }
    }
}

struct PanickingSink;

impl LineSink for PanickingSink {
    fn line(&self, _stream: StreamKind, _level: Severity, _line: &str) {
        panic!("sink failure");
    }
}

#[tokio::test]
async fn test_monitor_logs_and_buffers_every_line() {
    init_tracing();
    let sink = RecordingSink::new();
    let buffer = SharedBuffer::new(0);
    let mut barrier = CompletionBarrier::<()>::new();
    let signal = barrier.register();
    let slot = signal.slot();

    let input = Cursor::new(b"alpha\nbeta\r\ngamma".to_vec());
    spawn_monitor(
        input,
        spec(StreamKind::Stdout, Severity::Debug),
        sink.shared(),
        buffer.clone(),
        signal,
    );

    with_timeout(barrier.wait()).await;

    assert!(barrier.take(slot).is_some(), "monitor completes its signal");
    assert_eq!(buffer.snapshot(), "alpha\nbeta\ngamma\n");

    let lines = sink.lines();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    assert!(lines.iter().all(|l| l.stream == StreamKind::Stdout));
    assert!(lines.iter().all(|l| l.level == Severity::Debug));
}

#[tokio::test]
async fn test_monitor_respects_capacity() {
    let sink = RecordingSink::new();
    let buffer = SharedBuffer::new(6);
    let mut barrier = CompletionBarrier::<()>::new();
    let signal = barrier.register();

    let input = Cursor::new(b"one\ntwo\nthree\n".to_vec());
    spawn_monitor(
        input,
        spec(StreamKind::Stderr, Severity::Warn),
        sink.shared(),
        buffer.clone(),
        signal,
    );

    with_timeout(barrier.wait()).await;

    assert_eq!(buffer.snapshot(), "three\n");
    assert_eq!(buffer.len(), 6);
    // Eviction only affects the buffer; every line is still logged.
    assert_eq!(sink.lines().len(), 3);
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_not_fatal() {
    let sink = RecordingSink::new();
    let buffer = SharedBuffer::new(0);
    let mut barrier = CompletionBarrier::<()>::new();
    let signal = barrier.register();

    let input = Cursor::new(b"ok\n\xff\xfe broken\nafter\n".to_vec());
    spawn_monitor(
        input,
        spec(StreamKind::Stdout, Severity::Info),
        sink.shared(),
        buffer.clone(),
        signal,
    );

    with_timeout(barrier.wait()).await;

    let text = buffer.snapshot();
    assert!(text.starts_with("ok\n"));
    assert!(text.contains('\u{FFFD}'));
    assert!(text.ends_with("after\n"));
}

#[tokio::test]
async fn test_read_error_ends_stream_and_still_signals() {
    init_tracing();
    let sink = RecordingSink::new();
    let buffer = SharedBuffer::new(0);
    let mut barrier = CompletionBarrier::<()>::new();
    let signal = barrier.register();

    let input = FailingReader {
        data: Some(b"before failure\n".to_vec()),
    };
    spawn_monitor(
        input,
        spec(StreamKind::Stderr, Severity::Warn),
        sink.shared(),
        buffer.clone(),
        signal,
    );

    assert!(barrier.wait_timeout(Duration::from_secs(5)).await);

    assert!(barrier.take(0).is_some(), "a read error still completes the signal");
    assert_eq!(buffer.snapshot(), "before failure\n");
}

#[tokio::test]
async fn test_panicking_sink_still_arrives_at_barrier() {
    let buffer = SharedBuffer::new(0);
    let mut barrier = CompletionBarrier::<()>::new();
    let signal = barrier.register();

    let handle = spawn_monitor(
        Cursor::new(b"boom\n".to_vec()),
        spec(StreamKind::Stdout, Severity::Info),
        Arc::new(PanickingSink),
        buffer.clone(),
        signal,
    );

    assert!(handle.await.is_err());
    assert!(barrier.wait_timeout(Duration::from_secs(5)).await);
    assert!(barrier.take(0).is_none());
    // The sink runs before the append, so nothing reached the buffer.
    assert!(buffer.is_empty());
}

#[tokio::test]
async fn test_buffer_is_readable_while_the_stream_is_still_open() {
    let (mut writer, reader) = tokio::io::duplex(64);
    let buffer = SharedBuffer::new(0);
    let mut barrier = CompletionBarrier::<()>::new();

    spawn_monitor(
        reader,
        spec(StreamKind::Stdout, Severity::Info),
        RecordingSink::new().shared(),
        buffer.clone(),
        barrier.register(),
    );

    writer.write_all(b"partial result\n").await.unwrap();

    assert!(!barrier.wait_timeout(Duration::from_millis(200)).await);
    assert_eq!(buffer.snapshot(), "partial result\n");

    drop(writer);
    assert!(barrier.wait_timeout(Duration::from_secs(5)).await);
}
