use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_input::{Input, InputRequest};

use crate::config::ColorConfig;
use crate::domain::Entry;
use crate::tui::app::Command;

/// Lines each row occupies: title, detail and a spacer.
pub const ROW_HEIGHT: usize = 3;

/// Lines above the rows: title badge and a spacer.
const HEADER_HEIGHT: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub title: String,
    pub detail: String,
    filter_key: String,
}

impl ListRow {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, filter_value: &str) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            filter_key: filter_value.to_lowercase(),
        }
    }
}

impl From<&Entry> for ListRow {
    fn from(entry: &Entry) -> Self {
        ListRow::new(
            entry.display_title(),
            entry.summary_line(),
            entry.filter_value(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The filter input has focus and receives every key.
    Filtering,
    Applied,
}

/// Filterable list of rows with a cursor.
pub struct EntryList {
    title: String,
    rows: Vec<ListRow>,
    /// Indices into `rows` that match the current filter, in feed order.
    visible: Vec<usize>,
    /// Selection and scroll offset, both counted in positions within `visible`.
    state: ListState,
    height: usize,
    filter: Input,
    filter_state: FilterState,
}

impl EntryList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            visible: Vec::new(),
            state: ListState::default(),
            height: 0,
            filter: Input::default(),
            filter_state: FilterState::Unfiltered,
        }
    }

    /// Replace every row, dropping any filter and moving the cursor to the top.
    pub fn set_rows(&mut self, rows: Vec<ListRow>) {
        self.rows = rows;
        self.filter.reset();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Index of the highlighted row in feed order.
    pub fn selected_index(&self) -> Option<usize> {
        let position = self.state.selected()?;
        self.visible.get(position).copied()
    }

    /// Move the cursor to the row at `index`, clearing a filter that hides it.
    pub fn select(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        if !self.visible.contains(&index) {
            self.clear_filter();
        }
        if let Some(position) = self.visible.iter().position(|i| *i == index) {
            self.state.select(Some(position));
            self.scroll_to_cursor();
        }
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn filter_value(&self) -> &str {
        self.filter.value()
    }

    /// Resize to the full area the list is drawn in.
    pub fn set_size(&mut self, height: u16) {
        self.height = height.saturating_sub(HEADER_HEIGHT) as usize;
        self.scroll_to_cursor();
    }

    fn per_page(&self) -> usize {
        (self.height / ROW_HEIGHT).max(1)
    }

    pub fn update(&mut self, key: KeyEvent) -> Option<Command> {
        if self.filter_state == FilterState::Filtering {
            self.update_filter(key);
            return None;
        }

        let per_page = self.per_page();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('b') => {
                self.move_by(-(per_page as isize))
            }
            KeyCode::PageDown | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('f') => {
                self.move_by(per_page as isize)
            }
            KeyCode::Home | KeyCode::Char('g') => self.move_to(0),
            KeyCode::End | KeyCode::Char('G') => {
                self.move_to(self.visible.len().saturating_sub(1))
            }
            KeyCode::Char('/') => self.filter_state = FilterState::Filtering,
            KeyCode::Esc if self.filter_state == FilterState::Applied => self.clear_filter(),
            _ => {}
        }
        None
    }

    fn update_filter(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Esc => {
                self.clear_filter();
                return;
            }
            KeyCode::Enter | KeyCode::Tab => {
                self.filter_state = if self.filter.value().is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
                return;
            }
            KeyCode::Up => {
                self.move_by(-1);
                return;
            }
            KeyCode::Down => {
                self.move_by(1);
                return;
            }
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char(_) if ctrl => return,
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };

        if self.filter.handle(request).is_some() {
            self.refilter();
        }
    }

    fn clear_filter(&mut self) {
        let highlighted = self.selected_index();
        self.filter.reset();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
        if let Some(index) = highlighted {
            self.state.select(Some(index));
            self.scroll_to_cursor();
        }
    }

    fn refilter(&mut self) {
        let needle = self.filter.value().to_lowercase();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.filter_key.contains(&needle))
            .map(|(i, _)| i)
            .collect();
        let first = if self.visible.is_empty() { None } else { Some(0) };
        self.state = ListState::default().with_selected(first);
    }

    fn move_by(&mut self, delta: isize) {
        let cursor = self.state.selected().unwrap_or(0);
        self.move_to(cursor.saturating_add_signed(delta));
    }

    fn move_to(&mut self, position: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.state.select(Some(position.min(self.visible.len() - 1)));
        self.scroll_to_cursor();
    }

    /// Keep the offset steady and move it only as far as needed to show the cursor.
    fn scroll_to_cursor(&mut self) {
        let Some(cursor) = self.state.selected() else {
            return;
        };
        let per_page = self.per_page();
        let offset = self.state.offset_mut();
        if cursor < *offset {
            *offset = cursor;
        } else if cursor >= *offset + per_page {
            *offset = cursor + 1 - per_page;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, colors: &ColorConfig) {
        let header_area = Rect {
            height: area.height.min(1),
            ..area
        };
        let rows_area = Rect {
            y: area.y.saturating_add(HEADER_HEIGHT),
            height: area.height.saturating_sub(HEADER_HEIGHT),
            ..area
        };

        frame.render_widget(Paragraph::new(self.header_line(colors)), header_area);

        if self.visible.is_empty() {
            let message = if self.rows.is_empty() {
                "No items."
            } else {
                "No items match the filter."
            };
            let empty = Paragraph::new(Span::styled(
                format!("  {}", message),
                Style::default().fg(colors.item_detail),
            ));
            frame.render_widget(empty, rows_area);
            return;
        }

        let selected = self.state.selected();
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .enumerate()
            .filter_map(|(position, index)| {
                let row = self.rows.get(*index)?;
                Some(self.row_item(row, selected == Some(position), colors))
            })
            .collect();

        // Drawing may nudge the offset; that must not leak back into the widget.
        let mut state = self.state.clone();
        frame.render_stateful_widget(List::new(items), rows_area, &mut state);
    }

    fn header_line(&self, colors: &ColorConfig) -> Line<'static> {
        let badge = Span::styled(
            format!(" {} ", self.title),
            Style::default().fg(colors.title_fg).bg(colors.title_bg),
        );

        match self.filter_state {
            FilterState::Filtering => Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(colors.filter_prompt)),
                Span::raw(self.filter.value().to_string()),
                Span::styled("█", Style::default().fg(colors.filter_prompt)),
            ]),
            FilterState::Applied => Line::from(vec![
                badge,
                Span::styled(
                    format!(
                        "  “{}” {}/{}",
                        self.filter.value(),
                        self.visible.len(),
                        self.rows.len()
                    ),
                    Style::default().fg(colors.item_detail),
                ),
            ]),
            FilterState::Unfiltered => Line::from(badge),
        }
    }

    fn row_item(&self, row: &ListRow, selected: bool, colors: &ColorConfig) -> ListItem<'static> {
        let (gutter, title_style, detail_style) = if selected {
            (
                Span::styled("│ ", Style::default().fg(colors.selected)),
                Style::default()
                    .fg(colors.selected)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(colors.selected),
            )
        } else {
            (
                Span::raw("  "),
                Style::default().fg(colors.item_title),
                Style::default().fg(colors.item_detail),
            )
        };

        ListItem::new(Text::from(vec![
            Line::from(vec![
                gutter.clone(),
                Span::styled(row.title.clone(), title_style),
            ]),
            Line::from(vec![gutter, Span::styled(row.detail.clone(), detail_style)]),
            Line::default(),
        ]))
    }
}
