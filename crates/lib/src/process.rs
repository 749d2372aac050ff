//! Spawning of the external build tools.
//!
//! Tools are run with stdin closed and stderr inherited. Stdout is drained by
//! us: each chunk is forwarded according to [`StdOutput`] and also kept in a
//! buffer, because xcodebuild prints the interesting part of a failure there.
//! When the tool fails the buffered output is written once to a
//! [`StdoutReplay`] sink before the error is returned.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{PrebuildError, Result};
use crate::xcode::StdOutput;

/// Sink receiving the stdout of a failed tool invocation.
#[derive(Clone)]
pub struct StdoutReplay(Arc<Mutex<dyn Write + Send>>);

impl StdoutReplay {
  pub fn new<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
    Self(writer)
  }

  /// Replay to the process' own stdout.
  pub fn stdout() -> Self {
    Self::new(Arc::new(Mutex::new(std::io::stdout())))
  }

  fn emit(&self, bytes: &[u8]) {
    if bytes.is_empty() {
      return;
    }
    if let Ok(mut writer) = self.0.lock() {
      let _ = writer.write_all(bytes);
      let _ = writer.flush();
    }
  }
}

impl Default for StdoutReplay {
  fn default() -> Self {
    Self::stdout()
  }
}

impl fmt::Debug for StdoutReplay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("StdoutReplay")
  }
}

/// Run `program` with `args` in `cwd` and wait for it to finish.
///
/// Fails with [`PrebuildError::Spawn`] if the program cannot be started and
/// with [`PrebuildError::BuildFailed`] on a non-zero exit.
pub async fn run_tool(
  program: &Path,
  args: &[String],
  cwd: &Path,
  std_output: StdOutput,
  replay: &StdoutReplay,
) -> Result<()> {
  let tool = program.display().to_string();
  info!(tool = %tool, "running");
  debug!(args = ?args, cwd = ?cwd, "spawning process");

  let mut child = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::inherit())
    .kill_on_drop(true)
    .spawn()
    .map_err(|source| PrebuildError::Spawn {
      tool: tool.clone(),
      source,
    })?;

  let mut captured = Vec::new();
  if let Some(mut pipe) = child.stdout.take() {
    if let Err(e) = drain(&mut pipe, forward_target(std_output), &mut captured).await {
      replay.emit(&captured);
      let _ = child.kill().await;
      return Err(e.into());
    }
  }

  let status = child.wait().await?;
  if !status.success() {
    replay.emit(&captured);
    return Err(PrebuildError::BuildFailed {
      tool,
      code: status.code(),
    });
  }

  Ok(())
}

fn forward_target(std_output: StdOutput) -> Option<Box<dyn AsyncWrite + Send + Unpin>> {
  match std_output {
    StdOutput::Stderr => Some(Box::new(tokio::io::stderr())),
    StdOutput::Stdout => Some(Box::new(tokio::io::stdout())),
    StdOutput::Ignore => None,
  }
}

/// Read `pipe` to the end into `captured`, forwarding each chunk to `target`.
///
/// A failing target stops forwarding but not capturing; only read errors are
/// returned.
async fn drain<R, W>(pipe: &mut R, mut target: Option<W>, captured: &mut Vec<u8>) -> std::io::Result<()>
where
  R: AsyncRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let mut chunk = [0u8; 8192];
  loop {
    let read = pipe.read(&mut chunk).await?;
    if read == 0 {
      return Ok(());
    }
    captured.extend_from_slice(&chunk[..read]);

    if let Some(writer) = target.as_mut() {
      let forwarded = match writer.write_all(&chunk[..read]).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
      };
      if let Err(e) = forwarded {
        warn!(error = %e, "cannot forward tool output, capturing only");
        target = None;
      }
    }
  }
}
