//! Startup check that a required external tool answers a version query.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the version query may take.
pub const TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why the tool is considered unavailable. Every reason is handled the same way.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("{program} could not be run: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} did not answer within {}s", timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Version query for an external program.
#[derive(Clone, Debug)]
pub struct Preflight {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Preflight {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout: TIMEOUT,
        }
    }

    /// `ffmpeg -version`
    pub fn ffmpeg() -> Self {
        Self::new("ffmpeg", &["-version"])
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the query; on success return the first line of its output.
    pub fn check(&self) -> Result<String, Unavailable> {
        tracing::debug!(program = self.program, args = ?self.args, "preflight");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Unavailable::Launch {
                program: self.program.clone(),
                source,
            })?;

        let (status, stdout) = self.wait(child)?;

        if !status.success() {
            return Err(Unavailable::Failed {
                program: self.program.clone(),
                status,
            });
        }

        let version = stdout.lines().next().unwrap_or_default().to_string();
        tracing::info!(program = self.program, version, "preflight passed");

        Ok(version)
    }

    /// Poll until the child exits or the deadline passes; kill it on timeout.
    fn wait(&self, mut child: Child) -> Result<(ExitStatus, String), Unavailable> {
        let deadline = Instant::now() + self.timeout;

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    let mut stdout = String::new();
                    if let Some(mut pipe) = child.stdout.take() {
                        pipe.read_to_string(&mut stdout).ok();
                    }
                    return Ok((status, stdout));
                }
                Ok(None) if Instant::now() < deadline => std::thread::sleep(POLL_INTERVAL),
                Ok(None) => {
                    tracing::warn!(program = self.program, "preflight timed out, killing");
                    child.kill().ok();
                    child.wait().ok();
                    return Err(Unavailable::TimedOut {
                        program: self.program.clone(),
                        timeout: self.timeout,
                    });
                }
                Err(source) => {
                    child.kill().ok();
                    return Err(Unavailable::Launch {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        }
    }
}
