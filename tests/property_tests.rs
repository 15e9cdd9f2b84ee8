//! Property-Based Tests for appfetch
//!
//! Uses proptest for testing invariants and edge cases:
//! - Filename sanitizer output is always filesystem-safe
//! - Platform enum string round-trips
//! - The engine emits exactly one outcome per selected item, in order

use proptest::prelude::*;

// =============================================================================
// Filename Sanitizer Property Tests
// =============================================================================

use appfetch::engine::{destination_path, sanitize_app_name};
use appfetch::platform::Platform;

proptest! {
    /// Sanitized names are non-empty and contain no whitespace or path
    /// separators, whatever the input.
    #[test]
    fn sanitize_output_is_filesystem_safe(name in ".*") {
        let sanitized = sanitize_app_name(&name);
        prop_assert!(!sanitized.is_empty());
        prop_assert!(!sanitized.contains(char::is_whitespace));
        prop_assert!(!sanitized.contains('/'));
        prop_assert!(!sanitized.contains('\\'));
        prop_assert!(
            sanitized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
        );
    }

    /// For plain alphanumeric-and-space names (every catalog name is one),
    /// sanitizing is exactly space-to-underscore.
    #[test]
    fn sanitize_plain_names_is_space_replacement(
        name in "[A-Za-z0-9][A-Za-z0-9 ]{0,30}[A-Za-z0-9]"
    ) {
        prop_assert_eq!(sanitize_app_name(&name), name.replace(' ', "_"));
    }

    /// Destination filenames end with the platform installer extension.
    #[test]
    fn destination_carries_platform_extension(
        name in "[A-Za-z0-9 -]{1,24}",
        platform in prop_oneof![
            Just(Platform::Windows),
            Just(Platform::Linux),
            Just(Platform::Mac),
        ]
    ) {
        let path = destination_path(std::path::Path::new("/downloads"), &name, platform);
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        prop_assert!(file_name.ends_with(platform.installer_extension()));
    }
}

// =============================================================================
// Platform Enum Property Tests
// =============================================================================

fn platform_strategy() -> impl Strategy<Value = Platform> {
    prop_oneof![
        Just(Platform::Windows),
        Just(Platform::Linux),
        Just(Platform::Mac),
    ]
}

proptest! {
    /// Platform: to_string → parse round-trip is identity.
    #[test]
    fn platform_roundtrip(platform in platform_strategy()) {
        let s = platform.to_string();
        let parsed: Platform = s.parse().expect("should parse");
        prop_assert_eq!(platform, parsed);
    }

    /// Platform: display output is a non-empty lowercase key.
    #[test]
    fn platform_display_is_lowercase(platform in platform_strategy()) {
        let s = platform.to_string();
        prop_assert!(!s.is_empty());
        let lowercase = s.to_lowercase();
        prop_assert_eq!(s, lowercase);
    }
}

// =============================================================================
// Engine Ordering Property Tests
// =============================================================================

use std::io;
use std::path::Path;
use std::sync::mpsc;

use appfetch::catalog::Catalog;
use appfetch::engine::DispatchEngine;
use appfetch::runner::CommandRunner;
use appfetch::transfer::{TransferError, TransferProvider};

/// Transfer provider that always succeeds without touching the network.
struct NullTransfer;

impl TransferProvider for NullTransfer {
    fn fetch(&self, _url: &url::Url, dest: &Path) -> Result<(), TransferError> {
        std::fs::write(dest, b"x").map_err(|e| TransferError::io(dest, e))?;
        Ok(())
    }
}

/// Command runner that reports every tool present and launches happily.
struct NullRunner;

impl CommandRunner for NullRunner {
    fn probe(&self, _tool: &str) -> bool {
        true
    }

    fn launch(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

fn selection_strategy() -> impl Strategy<Value = Vec<String>> {
    let names = prop_oneof![
        Just("7-Zip".to_string()),
        Just("Vim".to_string()),
        Just("Firefox".to_string()),
        Just("Visual Studio Code".to_string()),
        Just("NoSuchApp".to_string()),
        Just("AlsoMissing".to_string()),
    ];
    prop::collection::vec(names, 1..8)
}

proptest! {
    /// One outcome per selected item, mirroring selection order, for any
    /// mix of known and unknown names on any platform.
    #[test]
    fn engine_emits_one_outcome_per_item_in_order(
        selection in selection_strategy(),
        platform in platform_strategy(),
    ) {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let engine = DispatchEngine::new(
            Catalog::builtin(),
            NullTransfer,
            NullRunner,
            dir.path().to_path_buf(),
        );

        let (tx, _rx) = mpsc::channel();
        let report = engine.run(&selection, platform, &tx).expect("non-empty run");

        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = selection.iter().map(String::as_str).collect();
        prop_assert_eq!(names, expected);
    }
}
