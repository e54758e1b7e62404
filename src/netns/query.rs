use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Produces per-interface link statistics for the calling thread's network namespace.
pub trait LinkStatsQuery {
    /// Returns the statistics in `ip -s -o link` format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`], [`Error::QueryStatus`] or
    /// [`Error::QueryTimeout`] if the statistics cannot be obtained.
    fn link_stats(&self) -> Result<String>;
}

/// Runs `ip -s -o link`.
///
/// The child process inherits the network namespace of the thread that
/// spawns it. With a timeout set, a child that has not exited by the
/// deadline is killed and reaped.
#[derive(Debug, Clone)]
pub struct IpCommand {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for IpCommand {
    fn default() -> Self {
        Self::new("ip")
    }
}

impl IpCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<std::process::ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(Error::Query);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait().map_err(Error::Query)? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(err) = child.kill() {
                    log::warn!(target: "netns", "failed to kill {}: {}", self.program.display(), err);
                }
                if let Err(err) = child.wait() {
                    log::warn!(target: "netns", "failed to reap {}: {}", self.program.display(), err);
                }
                return Err(Error::QueryTimeout { timeout });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl LinkStatsQuery for IpCommand {
    fn link_stats(&self) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["-s", "-o", "link"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Error::Query)?;

        // Drained concurrently so a large output cannot block the child.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait_with_deadline(&mut child)?;
        let stdout = collect(stdout);
        if !status.success() {
            return Err(Error::QueryStatus {
                status,
                stderr: String::from_utf8_lossy(&collect(stderr)).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(err) = pipe.read_to_end(&mut buf) {
            log::debug!(target: "netns", "failed reading query output: {}", err);
        }
        buf
    }))
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("ip");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn is_alive(pid: &str) -> bool {
        Path::new("/proc").join(pid.trim()).exists()
    }

    #[test]
    fn test_missing_program() {
        let query = IpCommand::new("/definitely/does/not/exist/ip");
        assert!(matches!(query.link_stats(), Err(Error::Query(_))));
    }

    #[test]
    fn test_failing_program() {
        let query = IpCommand::new("false");
        assert!(matches!(
            query.link_stats(),
            Err(Error::QueryStatus { .. })
        ));
    }

    #[test]
    fn test_output_and_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo \"$@\"");
        let output = IpCommand::new(program)
            .with_timeout(Duration::from_secs(5))
            .link_stats()
            .unwrap();
        assert_eq!(output, "-s -o link\n");
    }

    #[test]
    fn test_stderr_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'Cannot open netlink socket' >&2; exit 2");
        match IpCommand::new(program).link_stats() {
            Err(Error::QueryStatus { stderr, .. }) => {
                assert_eq!(stderr, "Cannot open netlink socket");
            }
            other => panic!("expected QueryStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_hanging_program_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let program = script(
            dir.path(),
            &format!("echo $$ > {}\nexec sleep 30", pid_file.display()),
        );
        let query = IpCommand::new(program).with_timeout(Duration::from_millis(300));

        let start = Instant::now();
        let err = query.link_stats().unwrap_err();
        assert!(matches!(err, Error::QueryTimeout { .. }), "{err}");
        assert!(start.elapsed() < Duration::from_secs(10));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(!is_alive(&pid), "child {} still running", pid.trim());
    }
}
