// src/capture/monitor.rs

//! Stream monitors: one background task per child output pipe.
//!
//! Draining both pipes concurrently is what keeps a chatty child from
//! blocking forever on a full stderr pipe while only stdout is read (or the
//! other way around).

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::capture::barrier::CompletionSignal;
use crate::capture::buffer::SharedBuffer;
use crate::capture::sink::LineSink;
use crate::types::{Severity, StreamKind};

/// What a monitor drains and how.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSpec {
    pub kind: StreamKind,
    pub level: Severity,
}

/// Spawn a monitor task over `stream`.
///
/// Every line is passed to `sink` and then appended to `buffer`. When the
/// stream ends, or a read fails, the monitor completes `signal`. If the task
/// unwinds instead, dropping `signal` still arrives at the barrier.
///
/// `buffer` stays readable while the monitor runs, so a caller that stops
/// waiting early still sees every line appended up to that point.
pub fn spawn_monitor<R>(
    stream: R,
    spec: MonitorSpec,
    sink: Arc<dyn LineSink>,
    buffer: SharedBuffer,
    signal: CompletionSignal<()>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let lines = drain_lines(stream, spec, sink.as_ref(), &buffer).await;

        debug!(
            stream = %spec.kind,
            lines,
            retained = buffer.len(),
            "monitor ended"
        );
        signal.complete(());
    })
}

/// Read `stream` to the end, returning the number of lines seen.
async fn drain_lines<R>(
    stream: R,
    spec: MonitorSpec,
    sink: &dyn LineSink,
    buffer: &SharedBuffer,
) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut raw = Vec::new();
    let mut lines = 0usize;

    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&raw);
                sink.line(spec.kind, spec.level, &line);
                buffer.append(&line);
                lines += 1;
            }
            Err(e) => {
                error!(
                    stream = %spec.kind,
                    error = %e,
                    "failed reading child output; treating as end of stream"
                );
                break;
            }
        }
    }

    lines
}

/// Strip the line terminator (`\n` or `\r\n`) and decode lossily.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
