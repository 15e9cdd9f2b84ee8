//! Install dispatch engine.
//!
//! Turns a user selection plus the host platform into a sequence of install
//! actions, executed one application at a time in selection order. Progress
//! is streamed as [`LogEvent`]s over a channel so any front end (the TUI,
//! the headless CLI, a test) can render it; the engine itself knows nothing
//! about presentation.
//!
//! A run is one-shot: it processes the whole selection, emits a final
//! [`LogEvent::Completed`] carrying the per-application outcomes, and is
//! done. There is no cancellation and no resume; a later request starts a
//! fresh run. No item's failure ever stops the items after it.

mod dest;

pub use dest::{DOWNLOAD_SUBDIR, default_downloads_dir, destination_path, sanitize_app_name};

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, InstallAction, PackageManager};
use crate::platform::Platform;
use crate::runner::CommandRunner;
use crate::transfer::{TransferError, TransferProvider};

/// Prefix of the log line that opens each application's processing.
///
/// Front ends count these lines against the selection size to derive
/// progress without the engine having to know about progress bars.
pub const ITEM_LOG_PREFIX: &str = "Processing: ";

/// Events streamed from a run to the submitting thread, in emission order.
#[derive(Debug, Clone)]
pub enum LogEvent {
    /// One line of progress output.
    Message(String),
    /// The final event of a run; nothing follows it.
    Completed(RunReport),
}

/// Terminal outcome for one selected application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The artifact was downloaded and handed to the OS opener.
    Succeeded,
    /// Known application with no action for the current platform.
    SkippedUnsupported,
    /// Instructions were printed; the tool itself took no action.
    DelegatedToUser,
    /// Processing failed; the reason is the display form of an
    /// [`InstallError`].
    Failed(String),
}

impl Outcome {
    /// Whether this outcome represents a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "installed",
            Self::SkippedUnsupported => "skipped (unsupported)",
            Self::DelegatedToUser => "manual steps required",
            Self::Failed(_) => "failed",
        }
    }
}

/// Outcome for one application, in a finished run's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppReport {
    pub name: String,
    pub outcome: Outcome,
}

/// Ordered per-application outcomes of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub results: Vec<AppReport>,
}

impl RunReport {
    fn count(&self, matches: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| matches(&r.outcome)).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Succeeded))
    }

    pub fn delegated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::DelegatedToUser))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedUnsupported))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    /// One-line summary, e.g. `2 installed, 1 manual, 0 skipped, 1 failed`.
    pub fn summary(&self) -> String {
        format!(
            "{} installed, {} manual, {} skipped, {} failed",
            self.succeeded(),
            self.delegated(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Failure kinds for a single application's processing.
///
/// Every error is converted into a per-item [`Outcome::Failed`]; none of
/// them aborts the rest of the run.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The selection names an application absent from the catalog.
    #[error("no configuration found")]
    UnknownApplication,

    /// A required external tool is not installed.
    #[error("{tool} missing")]
    ToolMissing { tool: String },

    /// The downloads directory could not be created.
    #[error("could not create downloads directory {path}: {source}")]
    DownloadsDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fetching the installer artifact failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// The downloaded artifact could not be opened; the file is retained.
    #[error("failed to launch {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that reject a run before it starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The selection contains no applications.
    #[error("selection is empty: pick at least one application")]
    EmptySelection,
}

/// The sequential resolve-and-execute loop over a selection set.
pub struct DispatchEngine<T, R> {
    catalog: Catalog,
    transfer: T,
    runner: R,
    downloads_dir: PathBuf,
}

impl<T, R> DispatchEngine<T, R>
where
    T: TransferProvider,
    R: CommandRunner,
{
    /// Create an engine over `catalog` with the given collaborators.
    ///
    /// `downloads_dir` receives direct-download artifacts; it is created on
    /// first use and creation is idempotent.
    pub fn new(catalog: Catalog, transfer: T, runner: R, downloads_dir: PathBuf) -> Self {
        Self {
            catalog,
            transfer,
            runner,
            downloads_dir,
        }
    }

    /// Process `selection` in order, emitting [`LogEvent`]s into `events`.
    ///
    /// Emits one `Message` stream and a final `Completed` event, and also
    /// returns the report. An empty selection is rejected before anything
    /// is emitted. A disconnected receiver does not stop the run.
    pub fn run(
        &self,
        selection: &[String],
        platform: Platform,
        events: &Sender<LogEvent>,
    ) -> Result<RunReport, EngineError> {
        if selection.is_empty() {
            return Err(EngineError::EmptySelection);
        }

        info!(count = selection.len(), %platform, "starting run");
        emit(events, "=".repeat(50));
        emit(
            events,
            format!(
                "Starting installation for {} application(s) on {}...",
                selection.len(),
                platform.label()
            ),
        );
        emit(events, "=".repeat(50));

        let mut report = RunReport::default();
        for name in selection {
            emit(events, format!("{ITEM_LOG_PREFIX}{name}"));
            let outcome = self.install_one(name, platform, events);
            debug!(app = %name, outcome = outcome.label(), "item finished");
            report.results.push(AppReport {
                name: name.clone(),
                outcome,
            });
        }

        emit(events, "=".repeat(50));
        emit(
            events,
            format!("Installation run finished: {}", report.summary()),
        );
        emit(events, "=".repeat(50));
        info!(summary = %report.summary(), "run complete");

        let _ = events.send(LogEvent::Completed(report.clone()));
        Ok(report)
    }

    /// Handle one application; every failure becomes its outcome.
    fn install_one(&self, name: &str, platform: Platform, events: &Sender<LogEvent>) -> Outcome {
        let Some(entry) = self.catalog.lookup(name) else {
            let error = InstallError::UnknownApplication;
            emit(events, format!("Error: {error} for {name}"));
            return Outcome::Failed(error.to_string());
        };

        let Some(action) = entry.action_for(platform) else {
            emit(
                events,
                format!("{name} is not supported on {}", platform.label()),
            );
            return Outcome::SkippedUnsupported;
        };

        match action {
            InstallAction::PackageManagerRef { manager, package } => {
                self.delegate(name, *manager, package, events)
            }
            InstallAction::DirectDownload { url } => {
                self.download_and_launch(name, url, platform, events)
            }
        }
    }

    /// Print the package-manager instructions; never executes them.
    fn delegate(
        &self,
        name: &str,
        manager: PackageManager,
        package: &str,
        events: &Sender<LogEvent>,
    ) -> Outcome {
        emit(events, format!("Installing {name} via {manager}..."));
        emit(events, format!("Package: {package}"));

        if manager == PackageManager::Brew && !self.runner.probe("brew") {
            let error = InstallError::ToolMissing {
                tool: "homebrew".to_string(),
            };
            emit(events, "Homebrew not found. Install Homebrew first:");
            emit(
                events,
                "    /bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"",
            );
            return Outcome::Failed(error.to_string());
        }

        if manager == PackageManager::Apt {
            emit(
                events,
                "This requires sudo privileges. Run the following command manually:",
            );
        }
        emit(events, format!("    {}", manager.install_command(package)));
        Outcome::DelegatedToUser
    }

    /// Fetch a direct-download artifact and hand it to the OS opener.
    fn download_and_launch(
        &self,
        name: &str,
        url: &url::Url,
        platform: Platform,
        events: &Sender<LogEvent>,
    ) -> Outcome {
        emit(events, format!("Downloading {name}..."));

        if let Err(e) = fs::create_dir_all(&self.downloads_dir) {
            let error = InstallError::DownloadsDir {
                path: self.downloads_dir.clone(),
                source: e,
            };
            emit(events, format!("Error: {error}"));
            return Outcome::Failed(error.to_string());
        }

        let dest = destination_path(&self.downloads_dir, name, platform);
        emit(events, format!("Saving to {}", dest.display()));

        if let Err(e) = self.transfer.fetch(url, &dest) {
            let error = InstallError::from(e);
            warn!(app = %name, %url, "transfer failed");
            emit(events, format!("Download failed: {error}"));
            emit(events, format!("You can download it manually from: {url}"));
            return Outcome::Failed(error.to_string());
        }
        emit(events, "Download complete.");

        match platform {
            Platform::Windows => self.launch_artifact(
                &dest,
                "Opening installer...",
                "Installer launched. Follow the installation wizard.",
                events,
            ),
            Platform::Mac => self.launch_artifact(
                &dest,
                "Opening disk image...",
                "Disk image opened. Drag the app to the Applications folder.",
                events,
            ),
            Platform::Linux => {
                // .deb artifacts are not auto-installed; hand over to dpkg.
                emit(events, "To install, run:");
                emit(events, format!("    sudo dpkg -i {}", dest.display()));
                emit(events, "    sudo apt-get install -f");
                Outcome::Succeeded
            }
        }
    }

    fn launch_artifact(
        &self,
        dest: &std::path::Path,
        opening: &str,
        done: &str,
        events: &Sender<LogEvent>,
    ) -> Outcome {
        emit(events, opening);
        match self.runner.launch(dest) {
            Ok(()) => {
                emit(events, done);
                Outcome::Succeeded
            }
            Err(e) => {
                let error = InstallError::Launch {
                    path: dest.to_path_buf(),
                    source: e,
                };
                emit(events, format!("Error: {error}"));
                emit(
                    events,
                    format!("The downloaded file was kept at {}", dest.display()),
                );
                Outcome::Failed(error.to_string())
            }
        }
    }
}

impl<T, R> DispatchEngine<T, R>
where
    T: TransferProvider + Send + 'static,
    R: CommandRunner + Send + 'static,
{
    /// Run on a background worker thread.
    ///
    /// The caller receives [`LogEvent`]s as they are produced and may join
    /// the handle for the report. The engine is consumed: a later request
    /// builds a fresh engine and a fresh run.
    pub fn spawn_run(
        self,
        selection: Vec<String>,
        platform: Platform,
    ) -> Result<(JoinHandle<RunReport>, Receiver<LogEvent>), EngineError> {
        if selection.is_empty() {
            return Err(EngineError::EmptySelection);
        }
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            // Emptiness was checked above; run cannot fail.
            self.run(&selection, platform, &tx).unwrap_or_default()
        });
        Ok((handle, rx))
    }
}

/// Convenience alias for the engine wired to the real collaborators.
pub type SystemEngine =
    DispatchEngine<crate::transfer::HttpTransfer, crate::runner::SystemCommandRunner>;

fn emit(events: &Sender<LogEvent>, line: impl Into<String>) {
    // A dropped receiver must not abort the run; the report still completes.
    let _ = events.send(LogEvent::Message(line.into()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Outcome::Succeeded).expect("serialize");
        assert_eq!(json, r#"{"kind":"succeeded"}"#);

        let json = serde_json::to_string(&Outcome::Failed("no configuration found".to_string()))
            .expect("serialize");
        assert_eq!(json, r#"{"kind":"failed","reason":"no configuration found"}"#);
    }

    #[test]
    fn test_report_summary_counts() {
        let report = RunReport {
            results: vec![
                AppReport {
                    name: "a".to_string(),
                    outcome: Outcome::Succeeded,
                },
                AppReport {
                    name: "b".to_string(),
                    outcome: Outcome::DelegatedToUser,
                },
                AppReport {
                    name: "c".to_string(),
                    outcome: Outcome::Failed("x".to_string()),
                },
                AppReport {
                    name: "d".to_string(),
                    outcome: Outcome::SkippedUnsupported,
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.delegated(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.summary(),
            "1 installed, 1 manual, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn test_install_error_display_matches_reported_reasons() {
        assert_eq!(
            InstallError::UnknownApplication.to_string(),
            "no configuration found"
        );
        assert_eq!(
            InstallError::ToolMissing {
                tool: "homebrew".to_string()
            }
            .to_string(),
            "homebrew missing"
        );
    }
}
