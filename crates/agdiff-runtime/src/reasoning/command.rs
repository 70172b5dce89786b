use super::truncate_message;
use agdiff_types::{ReasoningClient, ReasoningContext, ReasoningError};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_STDERR_CHARS: usize = 500;

/// Runs a reasoning CLI once per prompt.
///
/// The prompt goes to stdin and the reply is whatever the process prints
/// on stdout, trimmed. `--model <model>` is appended to the configured arguments and
/// the process runs inside the context's working directory.
#[derive(Debug, Clone)]
pub struct CommandReasoningClient {
    argv: Vec<String>,
}

impl CommandReasoningClient {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl ReasoningClient for CommandReasoningClient {
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> std::result::Result<String, ReasoningError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(ReasoningError::Unavailable(
                "no reasoning command configured".to_string(),
            ));
        };

        let deadline = Instant::now() + context.timeout;
        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(&context.working_directory)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if !context.model.is_empty() {
            command.arg("--model").arg(&context.model);
        }

        debug!(
            program = %program,
            cwd = %context.working_directory.display(),
            "spawning reasoning command"
        );
        let child = command.spawn().map_err(|err| {
            ReasoningError::Unavailable(format!("failed to start '{}': {}", program, err))
        })?;
        let mut guard = ChildGuard { child };

        let stdin = guard.child.stdin.take();
        let payload = prompt.to_string();
        // Detached: a grandchild holding stdin open must not stall the call.
        thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                ignore_sigpipe_on_current_thread();
                // EPIPE when the child exits without reading its input
                let _ = stdin.write_all(payload.as_bytes());
            }
        });
        let stdout = spawn_reader(guard.child.stdout.take());
        let stderr = spawn_reader(guard.child.stderr.take());

        let timed_out = || {
            warn!(timeout_secs = context.timeout.as_secs(), "reasoning command timed out");
            ReasoningError::Timeout(context.timeout)
        };

        let Some(status) = guard.wait_until(deadline)? else {
            return Err(timed_out());
        };

        // Pipes stay open while any inherited descendant is alive.
        let stdout = collect_output(&stdout, deadline).ok_or_else(timed_out)?;
        let stderr = collect_output(&stderr, deadline).ok_or_else(timed_out)?;

        if !status.success() {
            let message = if stderr.trim().is_empty() {
                format!("'{}' exited with {}", program, status)
            } else {
                truncate_message(&stderr, MAX_STDERR_CHARS)
            };
            return Err(ReasoningError::Status {
                code: status.code().unwrap_or(-1),
                message,
            });
        }

        Ok(stdout.trim().to_string())
    }
}

/// Kills the child when dropped so no exit path leaks a process.
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn wait_until(&mut self, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            let _ = source.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Output of a reader thread, or `None` once the deadline passes.
fn collect_output(output: &Receiver<String>, deadline: Instant) -> Option<String> {
    match output.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Some(text),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

/// Block SIGPIPE for the calling thread so a closed pipe surfaces as EPIPE.
///
/// The binary restores the default SIGPIPE disposition for its own stdout;
/// without this a child that never reads its input would kill the process.
#[cfg(unix)]
fn ignore_sigpipe_on_current_thread() {
    unsafe {
        let mut set: libc::sigset_t = std::mem::zeroed();
        libc::sigemptyset(&mut set);
        libc::sigaddset(&mut set, libc::SIGPIPE);
        libc::pthread_sigmask(libc::SIG_BLOCK, &set, std::ptr::null_mut());
    }
}

#[cfg(not(unix))]
fn ignore_sigpipe_on_current_thread() {}
