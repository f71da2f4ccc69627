use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{App, Mode};
use crate::tui::widgets::FilterState;

/// Rows under the article: three for the percentage box, one for help.
pub const FOOTER_HEIGHT: u16 = 4;
pub const STATUS_HEIGHT: u16 = 1;
const LIST_TOP_PADDING: u16 = 1;

/// Height handed to the list for a terminal `height` rows tall.
pub fn list_height(height: u16) -> u16 {
    height.saturating_sub(STATUS_HEIGHT + LIST_TOP_PADDING)
}

/// Height of the article window for a terminal `height` rows tall.
pub fn viewport_height(height: u16) -> u16 {
    height.saturating_sub(FOOTER_HEIGHT)
}

/// Draw the whole screen for the current mode. Only reads `app`.
pub fn render(frame: &mut Frame, app: &App, colors: &ColorConfig) {
    match app.mode() {
        Mode::Failed => render_failure(frame, app, colors),
        Mode::Viewing => render_viewer(frame, app, colors),
        Mode::Loading => render_loading(frame, app, colors),
        Mode::Listing => render_listing(frame, app, colors),
    }
}

fn render_failure(frame: &mut Frame, app: &App, colors: &ColorConfig) {
    let message = app
        .failure()
        .map(|e| e.to_string())
        .unwrap_or_default();

    let area = inset(frame.area(), 2, 1);
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(colors.error))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_loading(frame: &mut Frame, app: &App, colors: &ColorConfig) {
    let text = Text::from(vec![
        Line::default(),
        Line::default(),
        Line::from(Span::styled(
            "  Welcome to Gazette!",
            Style::default()
                .fg(colors.header)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(app.spinner().frame(), Style::default().fg(colors.spinner)),
            Span::styled(" Fetching stories...", Style::default().fg(colors.spinner)),
        ]),
    ]);

    frame.render_widget(Paragraph::new(text), frame.area());
}

fn render_listing(frame: &mut Frame, app: &App, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LIST_TOP_PADDING),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    app.list().render(frame, chunks[1], colors);
    render_status_bar(frame, app, chunks[2], colors);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, colors: &ColorConfig) {
    let status = if app.list().filter_state() == FilterState::Filtering {
        "enter:Apply filter  esc:Clear  ↑/↓:Move".to_string()
    } else if app.is_fetching() {
        let target = app
            .selection()
            .map(|s| s.url.as_str())
            .unwrap_or_default();
        format!("Fetching {} ...  esc:Cancel", target)
    } else if let Some(message) = app.status() {
        message.to_string()
    } else {
        "j/k:Nav  pgup/pgdn:Page  /:Filter  enter:Read  o:Open  q:Quit".to_string()
    };

    let paragraph = Paragraph::new(format!("  {}", status))
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_viewer(frame: &mut Frame, app: &App, colors: &ColorConfig) {
    let Some(text) = app.display() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(frame.area());

    app.viewport().render(frame, chunks[0], text);

    let percent = format!("┤ {:>3.0}% │", app.viewport().scroll_percent() * 100.0);
    let gap = (chunks[1].width as usize).saturating_sub(Line::from(percent.as_str()).width());

    let footer = Text::from(vec![
        Line::from(format!("{}╭──────╮", " ".repeat(gap))),
        Line::from(format!("{}{}", "─".repeat(gap), percent)),
        Line::from(format!("{}╰──────╯", " ".repeat(gap))),
        Line::from(Span::styled(
            "Press q to return to list, o to open in browser",
            Style::default().fg(colors.pager_help),
        )),
    ]);

    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(horizontal),
        y: area.y.saturating_add(vertical),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}
