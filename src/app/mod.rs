//! Application module.
//!
//! Owns the TUI event loop: renders the current [`AppState`], handles key
//! input, and folds engine [`LogEvent`]s from the worker channel into state.
//! The engine runs on its own thread; this loop never blocks on it.

mod state;

pub use state::{AppMode, AppState};

use std::io::Stdout;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::engine::{DispatchEngine, ITEM_LOG_PREFIX, LogEvent, RunReport};
use crate::error::Result;
use crate::platform::Platform;
use crate::runner::SystemCommandRunner;
use crate::transfer::HttpTransfer;
use crate::ui::UiRenderer;

/// How long the event loop waits for key input before redrawing.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application struct.
pub struct App {
    state: AppState,
    catalog: Catalog,
    downloads_dir: PathBuf,
    ui_renderer: UiRenderer,
    /// Live event channel of the current run, if one is active.
    events: Option<Receiver<LogEvent>>,
    /// Worker handle of the current run; joined when the run completes.
    worker: Option<JoinHandle<RunReport>>,
}

impl App {
    /// Create a new application instance over `catalog`.
    pub fn new(catalog: Catalog, platform: Platform, downloads_dir: PathBuf) -> Self {
        info!(apps = catalog.len(), %platform, "creating app");
        let names = catalog.names().map(str::to_string).collect();
        Self {
            state: AppState::new(names, platform),
            catalog,
            downloads_dir,
            ui_renderer: UiRenderer::new(),
            events: None,
            worker: None,
        }
    }

    /// Read-only view of the application state (used by tests).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            self.drain_events();
            terminal.draw(|f| self.ui_renderer.render(f, &self.state))?;

            if !event::poll(TICK_RATE)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if self.handle_key(key) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Move pending engine events into state without blocking.
    fn drain_events(&mut self) {
        let Some(rx) = &self.events else { return };

        let mut finished = false;
        loop {
            match rx.try_recv() {
                Ok(LogEvent::Message(line)) => {
                    if line.starts_with(ITEM_LOG_PREFIX) {
                        self.state.processed += 1;
                    }
                    self.state.push_log(line);
                }
                Ok(LogEvent::Completed(report)) => {
                    self.state.status_message =
                        format!("Run finished: {}", report.summary());
                    self.state.report = Some(report);
                    self.state.mode = AppMode::Complete;
                    finished = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Worker gone without a Completed event; should not
                    // happen, but never leave the UI stuck in Installing.
                    if self.state.mode == AppMode::Installing {
                        warn!("engine channel closed before completion");
                        self.state.status_message =
                            "Installation worker stopped unexpectedly.".to_string();
                        self.state.mode = AppMode::Complete;
                    }
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.events = None;
            if let Some(handle) = self.worker.take() {
                let _ = handle.join();
            }
        }
    }

    /// Handle one key press; returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state.mode {
            AppMode::Selection => self.handle_selection_key(key),
            AppMode::ConfirmInstall => {
                self.handle_confirm_key(key);
                false
            }
            AppMode::Installing => {
                // No cancellation: a run always proceeds to completion.
                self.state.status_message =
                    "Installation in progress; please wait.".to_string();
                false
            }
            AppMode::Complete => self.handle_complete_key(key),
        }
    }

    fn handle_selection_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.state.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_up(),
            KeyCode::Char(' ') => self.state.toggle_current(),
            KeyCode::Char('a') => {
                self.state.select_all();
                self.state.status_message =
                    format!("Selected all {} applications.", self.state.app_names.len());
            }
            KeyCode::Char('n') => {
                self.state.deselect_all();
                self.state.status_message = "Selection cleared.".to_string();
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                if self.state.selection_count() == 0 {
                    self.state.status_message =
                        "Select at least one application to install.".to_string();
                } else {
                    self.state.mode = AppMode::ConfirmInstall;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.start_run(),
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.mode = AppMode::Selection;
                self.state.status_message = "Installation cancelled.".to_string();
            }
            _ => {}
        }
    }

    fn handle_complete_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter | KeyCode::Char('b') => {
                self.state.mode = AppMode::Selection;
                self.state.status_message =
                    "Ready. Adjust the selection and install again if needed.".to_string();
            }
            _ => {}
        }
        false
    }

    /// Kick off a run on a background worker thread.
    fn start_run(&mut self) {
        let selection = self.state.selected_names();
        debug!(count = selection.len(), "submitting run");

        let engine = DispatchEngine::new(
            self.catalog.clone(),
            HttpTransfer::new(),
            SystemCommandRunner::new(self.state.platform),
            self.downloads_dir.clone(),
        );

        match engine.spawn_run(selection, self.state.platform) {
            Ok((handle, rx)) => {
                self.state.begin_run(self.state.selection_count());
                self.worker = Some(handle);
                self.events = Some(rx);
            }
            Err(e) => {
                self.state.mode = AppMode::Selection;
                self.state.status_message = e.to_string();
            }
        }
    }
}
