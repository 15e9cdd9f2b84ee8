//! Screen rendering: selection list, confirm dialog, install log, summary.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::header::{HeaderRenderer, centered_rect, render_progress_bar, render_status_line};
use crate::app::AppState;
use crate::engine::Outcome;
use crate::theme::{Colors, Styles};

/// Render the catalog selection screen.
pub fn render_selection_in_area(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    header: &HeaderRenderer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Banner
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Application list
            Constraint::Length(1), // Status line
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    header.render_header(f, chunks[0], state);
    header.render_title(f, chunks[1], "Select applications to install");

    let items: Vec<ListItem> = state
        .app_names
        .iter()
        .zip(&state.selected)
        .map(|(name, selected)| {
            let checkbox = if *selected { "[x]" } else { "[ ]" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{checkbox} "),
                    Style::default().fg(if *selected {
                        Colors::SUCCESS
                    } else {
                        Colors::FG_SECONDARY
                    }),
                ),
                Span::styled(name.clone(), Style::default().fg(Colors::FG_PRIMARY)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Catalog ({} selected) ", state.selection_count())),
        )
        .highlight_style(Styles::list_highlight())
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));
    f.render_stateful_widget(list, chunks[2], &mut list_state);

    render_status_line(f, chunks[3], state);
    render_hints(
        f,
        chunks[4],
        "up/down move  space select  a all  n none  enter install  q quit",
    );
}

/// Render the pre-run confirmation dialog over the selection screen.
pub fn render_confirm_dialog(f: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Install {} application(s)?", state.selection_count()),
            Style::default()
                .fg(Colors::FG_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for name in state.selected_names() {
        lines.push(Line::from(Span::styled(
            format!("  - {name}"),
            Style::default().fg(Colors::FG_PRIMARY),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[y] install    [n] cancel",
        Style::default().fg(Colors::SECONDARY),
    )));

    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm Installation ")
            .border_style(Style::default().fg(Colors::PRIMARY)),
    );
    f.render_widget(dialog, area);
}

/// Render the in-progress installation screen.
pub fn render_installing_in_area(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    header: &HeaderRenderer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Progress bar
            Constraint::Min(5),    // Log panel
            Constraint::Length(1), // Status line
        ])
        .split(area);

    header.render_title(f, chunks[0], "Installing selected applications");
    render_progress_bar(f, chunks[1], state);
    render_log_panel(f, chunks[2], state, " Installation Log ");
    render_status_line(f, chunks[3], state);
}

/// Render the post-run completion screen.
pub fn render_complete_in_area(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    header: &HeaderRenderer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(11), // Outcome summary
            Constraint::Min(5),     // Log panel
            Constraint::Length(2),  // Key hints
        ])
        .split(area);

    header.render_title(f, chunks[0], "Installation complete");

    let mut lines = Vec::new();
    if let Some(report) = &state.report {
        for result in &report.results {
            let (color, label) = match &result.outcome {
                Outcome::Succeeded => (Colors::SUCCESS, result.outcome.label().to_string()),
                Outcome::DelegatedToUser => (Colors::WARNING, result.outcome.label().to_string()),
                Outcome::SkippedUnsupported => {
                    (Colors::FG_MUTED, result.outcome.label().to_string())
                }
                Outcome::Failed(reason) => (Colors::ERROR, format!("failed: {reason}")),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<24}", result.name),
                    Style::default().fg(Colors::FG_PRIMARY),
                ),
                Span::styled(label, Style::default().fg(color)),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No report available.",
            Style::default().fg(Colors::FG_MUTED),
        )));
    }

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Outcomes "));
    f.render_widget(summary, chunks[1]);

    render_log_panel(f, chunks[2], state, " Installation Log ");
    render_hints(f, chunks[3], "enter back to selection  q quit");
}

/// Render the tail of the run log into a bordered panel.
fn render_log_panel(f: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|line| {
            let style = if line.starts_with("Error") || line.contains("failed") {
                Style::default().fg(Colors::ERROR)
            } else if line.starts_with(crate::engine::ITEM_LOG_PREFIX) {
                Style::default()
                    .fg(Colors::PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Colors::FG_PRIMARY)
            };
            Line::from(Span::styled(line.clone(), style))
        })
        .collect();

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(panel, area);
}

fn render_hints(f: &mut Frame, area: Rect, hints: &str) {
    let widget = Paragraph::new(hints)
        .alignment(ratatui::layout::Alignment::Center)
        .style(Styles::hint());
    f.render_widget(widget, area);
}
