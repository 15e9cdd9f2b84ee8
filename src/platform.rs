//! Host platform detection and platform-specific constants.
//!
//! The catalog keys install actions by platform, and the dispatch engine
//! picks installer filenames and launch mechanisms from it. Detection is
//! compile-time (`cfg!`), matching how the binary was built rather than
//! guessing at runtime.

use clap::ValueEnum;
use strum::{Display, EnumIter, EnumString};

/// A platform the catalog can carry install actions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    #[strum(serialize = "windows")]
    Windows,
    #[strum(serialize = "linux")]
    Linux,
    #[strum(serialize = "mac")]
    Mac,
}

impl Platform {
    /// Detect the platform this binary was built for.
    ///
    /// Returns `None` on hosts the catalog has no notion of (BSDs, etc.);
    /// callers decide whether to bail out or ask for an explicit override.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "windows") {
            return Some(Self::Windows);
        }
        if cfg!(target_os = "macos") {
            return Some(Self::Mac);
        }
        if cfg!(target_os = "linux") {
            return Some(Self::Linux);
        }
        None
    }

    /// Human-readable label for headers and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Mac => "macOS",
        }
    }

    /// File extension given to downloaded installer artifacts.
    pub fn installer_extension(&self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Mac => ".dmg",
            Self::Linux => ".deb",
        }
    }
}
