//! Download destination paths.
//!
//! Installer artifacts land in one fixed directory, named from a sanitized
//! form of the application name plus the platform installer extension.
//! Re-running overwrites previous artifacts; there is no versioning.

use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Subdirectory of the user's download location that receives artifacts.
pub const DOWNLOAD_SUBDIR: &str = "InstallerDownloads";

/// Default downloads directory: `<user downloads>/InstallerDownloads`.
///
/// Falls back to `<home>/Downloads` when the platform reports no download
/// location, and to the working directory as a last resort.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DOWNLOAD_SUBDIR)
}

/// Turn an application name into a safe filename stem.
///
/// Whitespace becomes `_`; anything outside ASCII alphanumerics and
/// `-`, `_`, `.`, `+` is dropped. Never returns an empty string.
pub fn sanitize_app_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
        .collect();
    if sanitized.is_empty() {
        "installer".to_string()
    } else {
        sanitized
    }
}

/// Destination path for one application's installer artifact.
pub fn destination_path(downloads_dir: &Path, app_name: &str, platform: Platform) -> PathBuf {
    downloads_dir.join(format!(
        "{}{}",
        sanitize_app_name(app_name),
        platform.installer_extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_spaces() {
        assert_eq!(sanitize_app_name("Visual Studio Code"), "Visual_Studio_Code");
        assert_eq!(sanitize_app_name("Java JDK"), "Java_JDK");
    }

    #[test]
    fn test_sanitize_keeps_hyphens_and_digits() {
        assert_eq!(sanitize_app_name("7-Zip"), "7-Zip");
    }

    #[test]
    fn test_sanitize_drops_path_separators() {
        assert_eq!(sanitize_app_name("a/b\\c"), "abc");
    }

    #[test]
    fn test_sanitize_never_empty() {
        assert_eq!(sanitize_app_name("///"), "installer");
        assert_eq!(sanitize_app_name(""), "installer");
    }

    #[test]
    fn test_destination_path_appends_platform_extension() {
        let dir = Path::new("/tmp/dl");
        assert_eq!(
            destination_path(dir, "Visual Studio Code", Platform::Windows),
            Path::new("/tmp/dl/Visual_Studio_Code.exe")
        );
        assert_eq!(
            destination_path(dir, "7-Zip", Platform::Mac),
            Path::new("/tmp/dl/7-Zip.dmg")
        );
        assert_eq!(
            destination_path(dir, "Discord", Platform::Linux),
            Path::new("/tmp/dl/Discord.deb")
        );
    }

    #[test]
    fn test_default_downloads_dir_ends_with_subdir() {
        let dir = default_downloads_dir();
        assert!(dir.ends_with(DOWNLOAD_SUBDIR));
    }
}
