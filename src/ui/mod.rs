//! User interface rendering module.
//!
//! Submodules:
//! - `header` - banner, titles, status line, progress bar
//! - `screens` - one render function per application mode
//!
//! Rendering is pure: it reads [`AppState`] and draws; all mutation happens
//! in the app event loop.

mod header;
mod screens;

pub use header::HeaderRenderer;

use ratatui::Frame;

use crate::app::{AppMode, AppState};

/// UI renderer for the application.
///
/// Entry point for rendering; delegates to the screen functions by mode.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    /// Create a new UI renderer.
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI based on application state.
    pub fn render(&self, f: &mut Frame, state: &AppState) {
        let area = f.area();
        match state.mode {
            AppMode::Selection => {
                screens::render_selection_in_area(f, state, area, &self.header);
            }
            AppMode::ConfirmInstall => {
                // Dialog draws over the selection screen.
                screens::render_selection_in_area(f, state, area, &self.header);
                screens::render_confirm_dialog(f, state);
            }
            AppMode::Installing => {
                screens::render_installing_in_area(f, state, area, &self.header);
            }
            AppMode::Complete => {
                screens::render_complete_in_area(f, state, area, &self.header);
            }
        }
    }
}
