use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::converter::DisplayText;
use crate::tui::app::Command;

/// Scroll state over a block of display text.
///
/// Holds only the offset and dimensions; the text itself stays with the
/// owner and is passed in when drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
    content_height: usize,
}

impl Viewport {
    pub fn set_size(&mut self, height: u16) {
        self.height = height as usize;
        self.clamp();
    }

    pub fn set_content_height(&mut self, lines: usize) {
        self.content_height = lines;
        self.clamp();
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Fraction of the way through the content, 1.0 when it all fits.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 1.0;
        }
        (self.offset as f64 / max as f64).clamp(0.0, 1.0)
    }

    fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp();
    }

    pub fn update(&mut self, key: KeyEvent) -> Option<Command> {
        let page = self.height.max(1) as isize;
        let half = (self.height / 2).max(1) as isize;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp | KeyCode::Char('b') => self.scroll_by(-page),
            KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::Char('u') => self.scroll_by(-half),
            KeyCode::Char('d') => self.scroll_by(half),
            KeyCode::Home | KeyCode::Char('g') => self.goto_top(),
            KeyCode::End | KeyCode::Char('G') => self.goto_bottom(),
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, text: &DisplayText) {
        let visible = text.window(self.offset, self.height).to_vec();
        frame.render_widget(Paragraph::new(visible), area);
    }
}
