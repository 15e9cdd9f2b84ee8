//! External command execution: tool probing and artifact launching.
//!
//! The engine asks two things of the host system: "is this external tool
//! on PATH?" and "open this downloaded installer with the OS default
//! mechanism". Both sit behind a trait so the engine tests never touch the
//! real system.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};
use which::which;

use crate::platform::Platform;

/// Probes for external tools and launches downloaded artifacts.
pub trait CommandRunner {
    /// Whether `tool` resolves to an executable on the search path.
    fn probe(&self, tool: &str) -> bool;

    /// Open or execute a local file with the OS default handler.
    fn launch(&self, path: &Path) -> io::Result<()>;
}

/// The real command runner: `which` for probing, the platform opener for
/// launching.
#[derive(Debug, Clone, Copy)]
pub struct SystemCommandRunner {
    platform: Platform,
}

impl SystemCommandRunner {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn probe(&self, tool: &str) -> bool {
        let found = which(tool).is_ok();
        debug!(tool, found, "probed external tool");
        found
    }

    fn launch(&self, path: &Path) -> io::Result<()> {
        // `start` detaches on Windows; `open`/`xdg-open` return once the
        // handler is spawned, so none of these block on the installer UI.
        let mut command = match self.platform {
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.args(["/C", "start", ""]).arg(path);
                cmd
            }
            Platform::Mac => {
                let mut cmd = Command::new("open");
                cmd.arg(path);
                cmd
            }
            Platform::Linux => {
                let mut cmd = Command::new("xdg-open");
                cmd.arg(path);
                cmd
            }
        };

        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if status.success() {
            debug!(path = %path.display(), "launched artifact");
            Ok(())
        } else {
            warn!(path = %path.display(), %status, "opener exited with failure");
            Err(io::Error::other(format!("opener exited with {status}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_tool_is_false() {
        let runner = SystemCommandRunner::new(Platform::Linux);
        assert!(!runner.probe("definitely-not-a-real-tool-6aa1f0"));
    }

    #[test]
    fn test_launch_nonexistent_opener_errors() {
        // On any host, launching through a platform whose opener binary is
        // absent must surface an io::Error rather than panic. `cmd` does not
        // exist on unix hosts; on Windows the path itself is bogus.
        let runner = SystemCommandRunner::new(Platform::Windows);
        let result = runner.launch(Path::new("/nonexistent/artifact.exe"));
        if cfg!(unix) {
            assert!(result.is_err());
        }
    }
}
