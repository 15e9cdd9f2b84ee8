//! appfetch library
//!
//! Core functionality for the appfetch installer: the application catalog,
//! the install dispatch engine with its transfer/command collaborators, and
//! the TUI front end built on top of them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod platform;
pub mod runner;
pub mod theme;
pub mod transfer;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{ApplicationEntry, Catalog, CatalogError, InstallAction, PackageManager};
pub use engine::{
    AppReport, DispatchEngine, EngineError, InstallError, LogEvent, Outcome, RunReport,
    SystemEngine, default_downloads_dir, destination_path, sanitize_app_name,
};
pub use error::{AppError, Result};
pub use platform::Platform;
pub use runner::{CommandRunner, SystemCommandRunner};
pub use transfer::{HttpTransfer, TransferError, TransferProvider};
