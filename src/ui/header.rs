//! Header and common widget rendering.
//!
//! The banner, title blocks, the status line, and the run progress bar used
//! across screens.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::AppState;
use crate::theme::{Colors, Styles};

/// Header renderer containing the banner lines.
pub struct HeaderRenderer {
    banner: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    /// Create a new header renderer.
    pub fn new() -> Self {
        Self {
            banner: Self::create_banner(),
        }
    }

    /// Render the banner.
    pub fn render_header(&self, f: &mut Frame, area: Rect, state: &AppState) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut lines = self.banner.clone();
        lines.push(Line::from(Span::styled(
            format!("Platform: {}", state.platform.label()),
            Style::default().fg(Colors::FG_SECONDARY),
        )));
        let header = Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render a boxed title section.
    pub fn render_title(&self, f: &mut Frame, area: Rect, title: &str) {
        let widget = Paragraph::new(title)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .style(Styles::title());
        f.render_widget(widget, area);
    }

    fn create_banner() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                r"                      __       _       _     ",
                Style::default().fg(Colors::PRIMARY),
            )),
            Line::from(Span::styled(
                r"  __ _ _ __  _ __    / _| ___ | |_ ___| |__   ",
                Style::default().fg(Colors::PRIMARY),
            )),
            Line::from(Span::styled(
                r" / _` | '_ \| '_ \  | |_ / _ \| __/ __| '_ \  ",
                Style::default().fg(Colors::PRIMARY),
            )),
            Line::from(Span::styled(
                r"| (_| | |_) | |_) | |  _|  __/| || (__| | | | ",
                Style::default().fg(Colors::PRIMARY),
            )),
            Line::from(Span::styled(
                r" \__,_| .__/| .__/  |_|  \___| \__\___|_| |_| ",
                Style::default().fg(Colors::PRIMARY),
            )),
            Line::from(Span::styled(
                r"      |_|   |_|                               ",
                Style::default().fg(Colors::PRIMARY),
            )),
        ]
    }
}

/// Render the one-line status bar.
pub fn render_status_line(f: &mut Frame, area: Rect, state: &AppState) {
    let status = Paragraph::new(state.status_message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Colors::SECONDARY));
    f.render_widget(status, area);
}

/// Render the run progress bar.
pub fn render_progress_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Installation Progress "),
        )
        .gauge_style(Style::default().fg(Colors::INFO))
        .percent(state.progress_percent());
    f.render_widget(gauge, area);
}

/// Center a rect of the given percentage size within `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    use ratatui::layout::{Constraint, Direction, Layout};

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
