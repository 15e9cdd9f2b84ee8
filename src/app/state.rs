//! Application state definitions.
//!
//! All TUI state lives here: which screen is active, the checkbox
//! selection over the catalog, and the log of the current run. The engine
//! never sees this; it communicates through `LogEvent`s that the app layer
//! folds into this state.

use crate::engine::RunReport;
use crate::platform::Platform;

/// Application operating modes (one per screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Catalog list with checkboxes.
    Selection,
    /// Confirmation dialog before a run starts.
    ConfirmInstall,
    /// A run is in progress; the log panel is live.
    Installing,
    /// The run finished; summary and log are shown.
    Complete,
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode.
    pub mode: AppMode,
    /// Platform the run will target.
    pub platform: Platform,
    /// Catalog application names, in display order.
    pub app_names: Vec<String>,
    /// Checkbox state, parallel to `app_names`.
    pub selected: Vec<bool>,
    /// Cursor position in the catalog list.
    pub cursor: usize,
    /// Status message for user feedback.
    pub status_message: String,
    /// Log lines of the current or last run.
    pub log: Vec<String>,
    /// Applications started so far in the current run.
    pub processed: usize,
    /// Applications in the current run.
    pub total: usize,
    /// Final report of the last run.
    pub report: Option<RunReport>,
}

impl AppState {
    /// Create state for a catalog's application names.
    pub fn new(app_names: Vec<String>, platform: Platform) -> Self {
        let selected = vec![false; app_names.len()];
        Self {
            mode: AppMode::Selection,
            platform,
            app_names,
            selected,
            cursor: 0,
            status_message: format!(
                "Platform: {}. Space selects, a/n select/deselect all, Enter installs, q quits.",
                platform.label()
            ),
            log: Vec::new(),
            processed: 0,
            total: 0,
            report: None,
        }
    }

    /// Move the cursor down, wrapping at the end.
    pub fn move_down(&mut self) {
        if self.app_names.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.app_names.len();
    }

    /// Move the cursor up, wrapping at the start.
    pub fn move_up(&mut self) {
        if self.app_names.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.app_names.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Toggle the checkbox under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(slot) = self.selected.get_mut(self.cursor) {
            *slot = !*slot;
        }
    }

    /// Select every application.
    pub fn select_all(&mut self) {
        self.selected.fill(true);
    }

    /// Deselect every application.
    pub fn deselect_all(&mut self) {
        self.selected.fill(false);
    }

    /// Number of selected applications.
    pub fn selection_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Selected application names, in display order.
    pub fn selected_names(&self) -> Vec<String> {
        self.app_names
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Append one line to the run log.
    pub fn push_log(&mut self, line: String) {
        self.log.push(line);
    }

    /// Reset run-scoped state and enter installing mode.
    pub fn begin_run(&mut self, total: usize) {
        self.log.clear();
        self.report = None;
        self.processed = 0;
        self.total = total;
        self.mode = AppMode::Installing;
        self.status_message = "Installing... this may take a while.".to_string();
    }

    /// Progress of the current run as a 0-100 percentage.
    ///
    /// Counts applications started, so the bar reaches 100 only when the
    /// report arrives.
    pub fn progress_percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        if self.report.is_some() {
            return 100;
        }
        let started = self.processed.min(self.total) as u64;
        // Started items are at most "in progress": show the step before.
        (started.saturating_sub(1) * 100 / self.total as u64) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> AppState {
        AppState::new(
            vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()],
            Platform::Linux,
        )
    }

    #[test]
    fn test_cursor_wraps_both_directions() {
        let mut state = sample_state();
        state.move_up();
        assert_eq!(state.cursor, 2);
        state.move_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_selected_names_preserve_display_order() {
        let mut state = sample_state();
        state.cursor = 2;
        state.toggle_current();
        state.cursor = 0;
        state.toggle_current();
        assert_eq!(state.selected_names(), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_select_all_and_deselect_all() {
        let mut state = sample_state();
        state.select_all();
        assert_eq!(state.selection_count(), 3);
        state.deselect_all();
        assert_eq!(state.selection_count(), 0);
    }

    #[test]
    fn test_begin_run_resets_run_state() {
        let mut state = sample_state();
        state.push_log("stale line".to_string());
        state.report = Some(RunReport::default());
        state.begin_run(2);
        assert!(state.log.is_empty());
        assert!(state.report.is_none());
        assert_eq!(state.total, 2);
        assert_eq!(state.mode, AppMode::Installing);
    }

    #[test]
    fn test_progress_reaches_100_only_on_report() {
        let mut state = sample_state();
        state.begin_run(2);
        assert_eq!(state.progress_percent(), 0);
        state.processed = 2;
        assert!(state.progress_percent() < 100);
        state.report = Some(RunReport::default());
        assert_eq!(state.progress_percent(), 100);
    }
}
