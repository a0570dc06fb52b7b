//! Blocking subprocess execution with a hard timeout
//!
//! Output is either the captured stdout of a successful process or an error.
//! A timed-out or failed process never reads as empty output.

use crate::core::error::{ChangesResult, GitError, ResultExt};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Run `cmd` to completion and return its stdout.
///
/// `command_line` is the human-readable command line used in errors and logs.
pub fn run_with_timeout(mut cmd: Command, command_line: &str, timeout: Duration) -> ChangesResult<String> {
  tracing::debug!(command = command_line, "running");

  cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
  let mut child = cmd
    .spawn()
    .with_context(|| format!("Failed to execute {}", command_line))?;

  // Drain both pipes concurrently so a chatty process cannot block on a full pipe
  let stdout = drain(child.stdout.take());
  let stderr = drain(child.stderr.take());

  let started = Instant::now();
  let status = loop {
    if let Some(status) = child.try_wait()? {
      break status;
    }
    if started.elapsed() >= timeout {
      kill(&mut child);
      return Err(
        GitError::TimedOut {
          command: command_line.to_string(),
          timeout,
        }
        .into(),
      );
    }
    thread::sleep(POLL_INTERVAL);
  };

  let stdout = stdout.join().unwrap_or_default();
  let stderr = stderr.join().unwrap_or_default();

  if !status.success() {
    return Err(
      GitError::CommandFailed {
        command: command_line.to_string(),
        stderr: String::from_utf8_lossy(&stderr).to_string(),
      }
      .into(),
    );
  }

  Ok(String::from_utf8_lossy(&stdout).to_string())
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
  thread::spawn(move || {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
      let _ = pipe.read_to_end(&mut buf);
    }
    buf
  })
}

fn kill(child: &mut Child) {
  if let Err(e) = child.kill() {
    tracing::warn!(error = %e, "failed to kill timed-out process");
  }
  // Reap so no zombie outlives the run
  let _ = child.wait();
}
