//! Application catalog: the static table of installable applications.
//!
//! Each entry maps an application name to at most one [`InstallAction`] per
//! platform. Raw table entries use a compact string form (a download URL, or
//! `package:`/`brew:`/`snap:` references); those strings are parsed exactly
//! once, when the catalog is constructed, so dispatch never sees a malformed
//! action. The catalog is an immutable value handed to the engine at
//! construction time rather than a process-wide global, which also lets the
//! tests substitute their own tables.

use std::collections::BTreeMap;

use strum::{Display, EnumString};
use thiserror::Error;
use url::Url;

use crate::platform::Platform;

/// Package managers an action can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Brew,
    Snap,
}

impl PackageManager {
    /// The command line the user is asked to run for `package`.
    pub fn install_command(&self, package: &str) -> String {
        match self {
            Self::Apt => format!("sudo apt-get install -y {package}"),
            Self::Brew => format!("brew install {package}"),
            Self::Snap => format!("sudo snap install {package}"),
        }
    }
}

/// How an application is obtained on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAction {
    /// Fetch an installer artifact over HTTP and hand it to the OS opener.
    DirectDownload { url: Url },
    /// Name a package for an external package manager; always delegated to
    /// the user, never executed by this tool.
    PackageManagerRef {
        manager: PackageManager,
        package: String,
    },
}

/// Per-platform action slots for one application.
///
/// An empty slot means the application is not supported on that platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformActions {
    pub windows: Option<InstallAction>,
    pub linux: Option<InstallAction>,
    pub mac: Option<InstallAction>,
}

impl PlatformActions {
    /// The action slot for `platform`, if any.
    pub fn get(&self, platform: Platform) -> Option<&InstallAction> {
        match platform {
            Platform::Windows => self.windows.as_ref(),
            Platform::Linux => self.linux.as_ref(),
            Platform::Mac => self.mac.as_ref(),
        }
    }

    fn slot_mut(&mut self, platform: Platform) -> &mut Option<InstallAction> {
        match platform {
            Platform::Windows => &mut self.windows,
            Platform::Linux => &mut self.linux,
            Platform::Mac => &mut self.mac,
        }
    }
}

/// One installable application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationEntry {
    /// Unique human-readable identifier; the catalog key.
    pub name: String,
    /// Install actions keyed by platform.
    pub actions: PlatformActions,
}

impl ApplicationEntry {
    /// The install action for `platform`, or `None` if unsupported there.
    pub fn action_for(&self, platform: Platform) -> Option<&InstallAction> {
        self.actions.get(platform)
    }

    /// Whether this application has any action for `platform`.
    pub fn supported_on(&self, platform: Platform) -> bool {
        self.action_for(platform).is_some()
    }
}

/// Errors raised while constructing a catalog from raw table entries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A table entry has an empty action string.
    #[error("{app}: empty action string for {platform}")]
    EmptyAction { app: String, platform: Platform },

    /// A direct-download entry is not an absolute http(s) URL.
    #[error("{app}: invalid download URL {url:?}: {reason}")]
    InvalidUrl {
        app: String,
        url: String,
        reason: String,
    },

    /// A package reference names a package the shell could misread.
    #[error("{app}: invalid package name {package:?} for {manager}")]
    InvalidPackageName {
        app: String,
        manager: PackageManager,
        package: String,
    },

    /// An action string uses a scheme the catalog does not know.
    #[error("{app}: unknown action scheme {scheme:?}")]
    UnknownScheme { app: String, scheme: String },

    /// Two table rows share an application name.
    #[error("duplicate catalog entry {app:?}")]
    DuplicateEntry { app: String },
}

/// A raw catalog row: application name plus per-platform action strings.
///
/// Action strings are either a download URL or `package:`/`brew:`/`snap:`
/// followed by a package name.
pub type RawEntry<'a> = (&'a str, &'a [(Platform, &'a str)]);

/// The built-in application table.
///
/// `package:` means apt on Linux. A missing platform row means the
/// application is unsupported there.
const BUILTIN: &[RawEntry<'static>] = &[
    (
        "7-Zip",
        &[
            (Platform::Windows, "https://www.7-zip.org/a/7z2408-x64.exe"),
            (Platform::Linux, "package:p7zip-full"),
            (Platform::Mac, "brew:p7zip"),
        ],
    ),
    (
        "Discord",
        &[
            (
                Platform::Windows,
                "https://discord.com/api/downloads/distributions/app/installers/latest?channel=stable&platform=win&arch=x64",
            ),
            (
                Platform::Linux,
                "https://discord.com/api/download?platform=linux&format=deb",
            ),
            (Platform::Mac, "https://discord.com/api/download?platform=osx"),
        ],
    ),
    (
        "Firefox",
        &[
            (
                Platform::Windows,
                "https://download.mozilla.org/?product=firefox-latest-ssl&os=win64&lang=en-US",
            ),
            (Platform::Linux, "package:firefox"),
            (
                Platform::Mac,
                "https://download.mozilla.org/?product=firefox-latest-ssl&os=osx&lang=en-US",
            ),
        ],
    ),
    (
        "Java JDK",
        &[
            (
                Platform::Windows,
                "https://download.oracle.com/java/21/latest/jdk-21_windows-x64_bin.exe",
            ),
            (Platform::Linux, "package:openjdk-21-jdk"),
            (Platform::Mac, "brew:openjdk@21"),
        ],
    ),
    (
        "Spotify",
        &[
            (Platform::Windows, "https://download.scdn.co/SpotifySetup.exe"),
            (Platform::Linux, "snap:spotify"),
            (Platform::Mac, "https://download.scdn.co/Spotify.dmg"),
        ],
    ),
    (
        "Steam",
        &[
            (
                Platform::Windows,
                "https://cdn.akamai.steamstatic.com/client/installer/SteamSetup.exe",
            ),
            (Platform::Linux, "package:steam"),
            (
                Platform::Mac,
                "https://cdn.akamai.steamstatic.com/client/installer/steam.dmg",
            ),
        ],
    ),
    (
        "Vim",
        &[
            (
                Platform::Windows,
                "https://github.com/vim/vim-win32-installer/releases/download/v9.1.0000/gvim_9.1.0000_x64.exe",
            ),
            (Platform::Linux, "package:vim"),
            (Platform::Mac, "brew:vim"),
        ],
    ),
    (
        "Visual Studio Code",
        &[
            (
                Platform::Windows,
                "https://code.visualstudio.com/sha/download?build=stable&os=win32-x64-user",
            ),
            (
                Platform::Linux,
                "https://code.visualstudio.com/sha/download?build=stable&os=linux-deb-x64",
            ),
            (
                Platform::Mac,
                "https://code.visualstudio.com/sha/download?build=stable&os=darwin-universal",
            ),
        ],
    ),
    (
        "VLC Media Player",
        &[
            (
                Platform::Windows,
                "https://get.videolan.org/vlc/3.0.21/win64/vlc-3.0.21-win64.exe",
            ),
            (Platform::Linux, "package:vlc"),
            (
                Platform::Mac,
                "https://get.videolan.org/vlc/3.0.21/macosx/vlc-3.0.21-universal.dmg",
            ),
        ],
    ),
];

/// Immutable lookup table of installable applications, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, ApplicationEntry>,
}

impl Catalog {
    /// Build a catalog from already-parsed entries.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ApplicationEntry>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let name = entry.name.clone();
            if map.insert(name.clone(), entry).is_some() {
                return Err(CatalogError::DuplicateEntry { app: name });
            }
        }
        Ok(Self { entries: map })
    }

    /// Build a catalog from raw table rows, parsing every action string.
    pub fn from_table(table: &[RawEntry<'_>]) -> Result<Self, CatalogError> {
        let mut entries = Vec::with_capacity(table.len());
        for (name, rows) in table {
            let mut actions = PlatformActions::default();
            for (platform, raw) in *rows {
                *actions.slot_mut(*platform) = Some(parse_action(name, *platform, raw)?);
            }
            entries.push(ApplicationEntry {
                name: (*name).to_string(),
                actions,
            });
        }
        Self::from_entries(entries)
    }

    /// The built-in application table.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table fails to parse, which would be a bug in
    /// the table itself; `test_builtin_catalog_parses` guards it.
    #[allow(clippy::expect_used)]
    pub fn builtin() -> Self {
        Self::from_table(BUILTIN).expect("built-in catalog table is well-formed")
    }

    /// Look up an application by name. Absence is a normal not-found result.
    pub fn lookup(&self, name: &str) -> Option<&ApplicationEntry> {
        self.entries.get(name)
    }

    /// Resolve the install action for `(name, platform)`.
    ///
    /// Returns `None` both when the application is unknown and when it is
    /// known but has no action for `platform`; callers that need to tell the
    /// two apart (the engine does, for reporting) check [`lookup`] first.
    ///
    /// [`lookup`]: Self::lookup
    pub fn resolve_action(&self, name: &str, platform: Platform) -> Option<&InstallAction> {
        self.lookup(name)?.action_for(platform)
    }

    /// All entries, ordered by application name.
    pub fn entries(&self) -> impl Iterator<Item = &ApplicationEntry> {
        self.entries.values()
    }

    /// All application names, ordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of applications in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no applications.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse one raw action string into an [`InstallAction`].
fn parse_action(app: &str, platform: Platform, raw: &str) -> Result<InstallAction, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CatalogError::EmptyAction {
            app: app.to_string(),
            platform,
        });
    }

    let package_ref = raw
        .strip_prefix("package:")
        .map(|package| (PackageManager::Apt, package))
        .or_else(|| {
            raw.strip_prefix("brew:")
                .map(|package| (PackageManager::Brew, package))
        })
        .or_else(|| {
            raw.strip_prefix("snap:")
                .map(|package| (PackageManager::Snap, package))
        });

    if let Some((manager, package)) = package_ref {
        return parse_package_ref(app, manager, package);
    }

    let url = Url::parse(raw).map_err(|e| CatalogError::InvalidUrl {
        app: app.to_string(),
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(InstallAction::DirectDownload { url }),
        scheme => Err(CatalogError::UnknownScheme {
            app: app.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

fn parse_package_ref(
    app: &str,
    manager: PackageManager,
    package: &str,
) -> Result<InstallAction, CatalogError> {
    let valid = !package.is_empty()
        && !package.contains(['/', '\\'])
        && !package.contains(char::is_whitespace);
    if !valid {
        return Err(CatalogError::InvalidPackageName {
            app: app.to_string(),
            manager,
            package: package.to_string(),
        });
    }
    Ok(InstallAction::PackageManagerRef {
        manager,
        package: package.to_string(),
    })
}
