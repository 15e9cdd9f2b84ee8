//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState initialization from a catalog
//! - Selection behavior (toggle, all/none, ordering)
//! - Mode transitions around a run
//! - Progress derivation from log events

use appfetch::app::{AppMode, AppState};
use appfetch::catalog::Catalog;
use appfetch::engine::{AppReport, ITEM_LOG_PREFIX, Outcome, RunReport};
use appfetch::platform::Platform;

fn state_over_builtin() -> AppState {
    let catalog = Catalog::builtin();
    AppState::new(catalog.names().map(str::to_string).collect(), Platform::Linux)
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_initial_mode_is_selection() {
    let state = state_over_builtin();
    assert_eq!(state.mode, AppMode::Selection);
}

#[test]
fn test_initial_state_has_no_selection_or_report() {
    let state = state_over_builtin();
    assert_eq!(state.selection_count(), 0);
    assert!(state.report.is_none());
    assert!(state.log.is_empty());
    assert_eq!(state.cursor, 0);
}

#[test]
fn test_initial_status_names_platform() {
    let state = state_over_builtin();
    assert!(state.status_message.contains("Linux"));
}

#[test]
fn test_app_names_match_catalog_order() {
    let state = state_over_builtin();
    let catalog = Catalog::builtin();
    let expected: Vec<String> = catalog.names().map(str::to_string).collect();
    assert_eq!(state.app_names, expected);
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_toggle_marks_and_unmarks() {
    let mut state = state_over_builtin();
    state.toggle_current();
    assert_eq!(state.selection_count(), 1);
    state.toggle_current();
    assert_eq!(state.selection_count(), 0);
}

#[test]
fn test_select_all_covers_catalog() {
    let mut state = state_over_builtin();
    state.select_all();
    assert_eq!(state.selection_count(), state.app_names.len());
    state.deselect_all();
    assert_eq!(state.selection_count(), 0);
}

#[test]
fn test_selected_names_in_display_order_regardless_of_toggle_order() {
    let mut state = state_over_builtin();
    // Toggle the last item first, then the first item.
    state.cursor = state.app_names.len() - 1;
    state.toggle_current();
    state.cursor = 0;
    state.toggle_current();

    let names = state.selected_names();
    assert_eq!(names.first().map(String::as_str), Some("7-Zip"));
    assert_eq!(names.last().map(String::as_str), Some("Visual Studio Code"));
}

// =============================================================================
// Run Lifecycle Tests
// =============================================================================

#[test]
fn test_begin_run_enters_installing_and_clears_previous_run() {
    let mut state = state_over_builtin();
    state.push_log("old line".to_string());
    state.report = Some(RunReport::default());

    state.begin_run(3);

    assert_eq!(state.mode, AppMode::Installing);
    assert!(state.log.is_empty());
    assert!(state.report.is_none());
    assert_eq!(state.total, 3);
    assert_eq!(state.processed, 0);
}

#[test]
fn test_progress_follows_item_markers() {
    let mut state = state_over_builtin();
    state.begin_run(4);

    for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
        state.push_log(format!("{ITEM_LOG_PREFIX}{name}"));
        state.processed += 1;
        let percent = state.progress_percent();
        assert!(
            percent < 100,
            "progress must stay below 100 while running (item {i}: {percent})"
        );
    }

    state.report = Some(RunReport {
        results: vec![AppReport {
            name: "A".to_string(),
            outcome: Outcome::Succeeded,
        }],
    });
    assert_eq!(state.progress_percent(), 100);
}

#[test]
fn test_log_accumulates_in_order() {
    let mut state = state_over_builtin();
    for i in 0..10 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.log.len(), 10);
    assert_eq!(state.log[0], "line 0");
    assert_eq!(state.log[9], "line 9");
}
