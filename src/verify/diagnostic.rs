//! External "show checkpoint contents" command
//!
//! In verbose mode the checkpoint daemon's CRIT viewer is run against each
//! checkpoint directory so a human can inspect the decoded images. Its
//! outcome never affects a verdict: every failure is logged and dropped.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::config::DiagnosticConfig;

/// Timeout for collecting output from child process pipes
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum bytes kept per stream; the rest is drained and discarded
const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

const TRUNCATION_MARKER: &str = "\n[output truncated at 10MB]";

/// Captured result of one diagnostic invocation
#[derive(Debug, Clone)]
pub struct DiagnosticOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl DiagnosticOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Run the diagnostic for one directory, logging instead of failing
pub fn render_checkpoint(config: &DiagnosticConfig, dir: &Path) {
    match run_show(config, dir) {
        Ok(output) if output.success() => {
            info!(dir = %dir.display(), "diagnostic show completed");
            debug!(dir = %dir.display(), stdout = %output.stdout, "diagnostic output");
        }
        Ok(output) if output.timed_out => {
            warn!(
                dir = %dir.display(),
                timeout_secs = config.timeout_secs,
                "diagnostic show timed out"
            );
        }
        Ok(output) => {
            warn!(
                dir = %dir.display(),
                exit_code = ?output.exit_code,
                stderr = %output.stderr.trim_end(),
                "diagnostic show failed"
            );
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %format!("{e:#}"), "diagnostic show not run");
        }
    }
}

/// Run `<program> <args...> <dir>` and capture its output
pub fn run_show(config: &DiagnosticConfig, dir: &Path) -> Result<DiagnosticOutput> {
    let program = which::which(&config.program)
        .with_context(|| format!("Diagnostic program '{}' not found", config.program))?;

    let mut child = Command::new(&program)
        .args(&config.args)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn {}", program.display()))?;

    // Drain the pipes while waiting; a full pipe buffer would block the child.
    let stdout_rx = spawn_reader(child.stdout.take());
    let stderr_rx = spawn_reader(child.stderr.take());

    let wait_result = child
        .wait_timeout(config.timeout())
        .with_context(|| format!("Failed to wait for {}", program.display()))?;

    let timed_out = wait_result.is_none();
    if timed_out {
        kill_child_process(&mut child);
    }

    let stdout = stdout_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_else(|_| "[output collection timed out]".to_string());
    let stderr = stderr_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_else(|_| "[output collection timed out]".to_string());

    Ok(DiagnosticOutput {
        stdout,
        stderr,
        exit_code: wait_result.and_then(|status| status.code()),
        timed_out,
    })
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_bounded(stream, MAX_OUTPUT_SIZE));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Read a stream to the end, keeping at most `limit` bytes.
///
/// Past the limit the stream is still drained so the child never blocks on
/// a full pipe, and a truncation marker is appended.
fn read_bounded<R: Read>(mut stream: R, limit: usize) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut truncated = false;

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let keep = n.min(limit.saturating_sub(buf.len()));
                buf.extend_from_slice(&chunk[..keep]);
                truncated |= keep < n;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => {
                if buf.is_empty() {
                    return "[error reading output]".to_string();
                }
                break;
            }
        }
    }

    let mut output = String::from_utf8_lossy(&buf).into_owned();
    if truncated {
        output.push_str(TRUNCATION_MARKER);
    }
    output
}

fn kill_child_process(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
