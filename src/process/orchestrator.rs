// src/process/orchestrator.rs

//! Runs one child process to completion while its output is drained.

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Instant;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::capture::{
    CompletionBarrier, ConsoleSink, LineSink, MonitorSpec, SharedBuffer, spawn_monitor,
};
use crate::config::ProcessConfig;
use crate::errors::{ProcessError, Result};
use crate::process::outcome::{Captured, ProcessOutput};
use crate::types::StreamKind;

/// A child process whose stdout/stderr are logged line by line and whose
/// trailing output is returned once it exits.
///
/// ```no_run
/// # async fn demo() -> procdrain::errors::Result<()> {
/// use procdrain::VerboseProcess;
/// use tokio::process::Command;
///
/// let mut cmd = Command::new("who");
/// cmd.arg("am").arg("i");
/// let captured = VerboseProcess::spawn(cmd)?.stdout().await?;
/// println!("{}", captured.stdout);
/// # Ok(())
/// # }
/// ```
///
/// The child's stdin is closed right away; nothing is ever written to it.
pub struct VerboseProcess {
    child: Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
    program: String,
    pid: Option<u32>,
    config: ProcessConfig,
    sink: Arc<dyn LineSink>,
    interrupt: Option<oneshot::Receiver<()>>,
}

/// Handle that aborts a pending exit wait with [`ProcessError::Interrupted`].
///
/// Only the wait is abandoned; the child keeps running and can still be
/// signalled through its pid.
#[derive(Debug)]
pub struct Interrupter {
    tx: oneshot::Sender<()>,
}

impl Interrupter {
    /// Returns `false` if the process was already harvested or dropped.
    pub fn interrupt(self) -> bool {
        self.tx.send(()).is_ok()
    }
}

impl VerboseProcess {
    /// Launch `command` with the default [`ProcessConfig`].
    pub fn spawn(command: Command) -> Result<Self> {
        Self::spawn_with(command, ProcessConfig::default())
    }

    /// Launch `command`.
    ///
    /// Stdio is overridden: all three streams are piped and stdin is closed
    /// immediately. Dropping this value does not kill the child.
    pub fn spawn_with(mut command: Command, config: ProcessConfig) -> Result<Self> {
        let program = command
            .as_std()
            .get_program()
            .to_string_lossy()
            .into_owned();

        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command
            .spawn()
            .map_err(|source| ProcessError::Launch {
                program: program.clone(),
                source,
            })?;

        Self::attach(child, program, config)
    }

    /// Wrap an already started child with the default [`ProcessConfig`].
    pub fn from_child(child: Child) -> Result<Self> {
        Self::from_child_with(child, ProcessConfig::default())
    }

    /// Wrap an already started child. It must have piped stdout and stderr;
    /// its stdin, if piped, is closed.
    pub fn from_child_with(child: Child, config: ProcessConfig) -> Result<Self> {
        let program = match child.id() {
            Some(pid) => format!("pid {pid}"),
            None => "<exited>".to_string(),
        };
        Self::attach(child, program, config)
    }

    fn attach(mut child: Child, program: String, config: ProcessConfig) -> Result<Self> {
        drop(child.stdin.take());

        let stdout = child.stdout.take().ok_or(ProcessError::MissingPipe {
            stream: StreamKind::Stdout,
        })?;
        let stderr = child.stderr.take().ok_or(ProcessError::MissingPipe {
            stream: StreamKind::Stderr,
        })?;
        let pid = child.id();

        debug!(?pid, program = %program, "attached to process");

        Ok(Self {
            child,
            stdout,
            stderr,
            program,
            pid,
            config,
            sink: Arc::new(ConsoleSink),
            interrupt: None,
        })
    }

    /// Mirror drained lines to `sink` instead of the console target.
    pub fn with_sink(mut self, sink: Arc<dyn LineSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get a handle that can abort the exit wait. Calling this again
    /// invalidates the previous handle.
    pub fn interrupter(&mut self) -> Interrupter {
        let (tx, rx) = oneshot::channel();
        self.interrupt = Some(rx);
        Interrupter { tx }
    }

    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Wait for the process and return its output, failing with
    /// [`ProcessError::NonZeroExit`] if the exit code is not zero.
    ///
    /// Use [`stdout_quietly`](Self::stdout_quietly) to ignore the exit code.
    pub async fn stdout(self) -> Result<Captured> {
        self.resolve(true).await
    }

    /// Wait for the process and return its output whatever the exit code.
    ///
    /// Useful for background processes that are going to be killed, where a
    /// non-zero code is expected.
    pub async fn stdout_quietly(self) -> Result<Captured> {
        self.resolve(false).await
    }

    async fn resolve(self, check: bool) -> Result<Captured> {
        let pid = self.pid;
        let program = self.program.clone();
        let output = self.harvest().await?;

        debug!(
            ?pid,
            program = %program,
            exit_code = output.exit_code,
            elapsed_secs = output.elapsed.as_secs(),
            "process completed"
        );

        if check {
            output.outcome().into_result()
        } else {
            Ok(output.captured)
        }
    }

    /// Drain both streams, wait for exit, then wait (bounded by the drain
    /// grace) for the monitors to reach end of stream.
    ///
    /// The captures hold whatever was drained by the time the wait ends, so
    /// they are complete when `drained` is true and a prefix otherwise.
    pub async fn harvest(mut self) -> Result<ProcessOutput> {
        let started = Instant::now();
        let mut barrier = CompletionBarrier::<()>::new();
        let stdout_buffer = SharedBuffer::new(self.config.stdout_capacity);
        let stderr_buffer = SharedBuffer::new(self.config.stderr_capacity);

        spawn_monitor(
            self.stdout,
            MonitorSpec {
                kind: StreamKind::Stdout,
                level: self.config.stdout_level,
            },
            Arc::clone(&self.sink),
            stdout_buffer.clone(),
            barrier.register(),
        );
        spawn_monitor(
            self.stderr,
            MonitorSpec {
                kind: StreamKind::Stderr,
                level: self.config.stderr_level,
            },
            Arc::clone(&self.sink),
            stderr_buffer.clone(),
            barrier.register(),
        );

        debug!(pid = ?self.pid, program = %self.program, "waiting for process exit");

        let status = wait_for_exit(&mut self.child, self.interrupt.take()).await?;
        debug!(pid = ?self.pid, "process finished");

        let drained = barrier.wait_timeout(self.config.drain_grace).await;
        if !drained {
            warn!(
                pid = ?self.pid,
                program = %self.program,
                pending = barrier.remaining(),
                grace = ?self.config.drain_grace,
                "output monitors still running after drain grace; capture may be incomplete"
            );
        }

        let captured = Captured {
            stdout: stdout_buffer.snapshot(),
            stderr: stderr_buffer.snapshot(),
        };

        Ok(ProcessOutput {
            captured,
            exit_code: status.code().unwrap_or(-1),
            elapsed: started.elapsed(),
            drained,
        })
    }
}

/// Wait for `child` to exit, unless `interrupt` fires first.
///
/// A dropped interrupter is not an interruption; the wait simply continues.
async fn wait_for_exit(
    child: &mut Child,
    interrupt: Option<oneshot::Receiver<()>>,
) -> Result<ExitStatus> {
    if let Some(mut interrupt) = interrupt {
        let interrupted = tokio::select! {
            status = child.wait() => {
                return status.map_err(|source| ProcessError::Wait { source });
            }
            signal = &mut interrupt => signal.is_ok(),
        };
        if interrupted {
            return Err(ProcessError::Interrupted);
        }
    }

    child
        .wait()
        .await
        .map_err(|source| ProcessError::Wait { source })
}
