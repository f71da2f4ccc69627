//! Markup to display text conversion.
//!
//! ```text
//! raw bytes → html2text (structured plain text) → themed lines
//! ```
//!
//! Conversion is deterministic: the same bytes and wrap width always give
//! the same [`DisplayText`].

mod theme;

pub use theme::Theme;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::app::{GazetteError, Result};

const MARGIN: &str = "  ";

/// Styled, wrapped lines ready for the viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText {
    lines: Vec<Line<'static>>,
}

impl DisplayText {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines visible from `offset` in a window `height` rows tall.
    pub fn window(&self, offset: usize, height: usize) -> &[Line<'static>] {
        let start = offset.min(self.lines.len());
        let end = start.saturating_add(height).min(self.lines.len());
        &self.lines[start..end]
    }
}

impl From<Vec<Line<'static>>> for DisplayText {
    fn from(lines: Vec<Line<'static>>) -> Self {
        Self { lines }
    }
}

#[derive(Debug, Clone)]
pub struct TextConverter {
    width: usize,
    theme: Theme,
}

impl TextConverter {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            theme: Theme::dark(),
        }
    }

    /// Convert a raw HTML (or plain text) body into display text.
    pub fn convert(&self, raw: &[u8]) -> Result<DisplayText> {
        if self.width == 0 {
            return Err(GazetteError::Conversion(
                "wrap width must be at least 1".to_string(),
            ));
        }

        let markup = std::str::from_utf8(raw).map_err(|e| {
            GazetteError::Conversion(format!("content is not UTF-8 text ({})", e))
        })?;

        let plain = html2text::from_read(markup.as_bytes(), self.width).map_err(|e| {
            GazetteError::Conversion(format!(
                "could not render markup at width {} ({})",
                self.width, e
            ))
        })?;
        Ok(self.style_plain(&plain))
    }

    /// Page shown for an entry that has no external link.
    ///
    /// Uses the entry's own HTML body when it has one.
    pub fn convert_self_post(&self, title: &str, body_html: &str) -> Result<DisplayText> {
        let body = if body_html.trim().is_empty() {
            "<p><em>This entry has no external link.</em></p>".to_string()
        } else {
            body_html.to_string()
        };
        let page = format!(
            "<h1>{}</h1>{}",
            html_escape::encode_text(title.trim()),
            body
        );
        self.convert(page.as_bytes())
    }

    fn style_plain(&self, plain: &str) -> DisplayText {
        let mut lines = Vec::new();
        let mut previous_blank = true;

        for raw in plain.lines() {
            let raw = raw.trim_end();
            if raw.is_empty() {
                if !previous_blank {
                    lines.push(Line::default());
                }
                previous_blank = true;
                continue;
            }
            previous_blank = false;

            let mut spans = vec![Span::raw(MARGIN)];
            spans.extend(self.style_line(raw));
            lines.push(Line::from(spans));
        }

        while lines.last().is_some_and(|l| l.spans.is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(MARGIN),
                Span::styled("(no readable content)", self.theme.quote),
            ]));
        }

        DisplayText::from(lines)
    }

    fn style_line(&self, line: &str) -> Vec<Span<'static>> {
        let theme = &self.theme;

        if let Some((level, title)) = heading(line) {
            let style = if level == 1 {
                theme.heading
            } else {
                theme.subheading
            };
            return vec![Span::styled(title.to_string(), style)];
        }

        if line.chars().all(|c| c == '─' || c == '-') && line.chars().count() >= 3 {
            return vec![Span::styled(line.to_string(), theme.rule)];
        }

        if line.starts_with('>') {
            let depth = line.chars().take_while(|c| *c == '>' || *c == ' ').count();
            let (prefix, rest) = line.split_at(depth);
            let bars = "│ ".repeat(prefix.matches('>').count());
            let mut spans = vec![Span::styled(bars, theme.bullet)];
            spans.extend(inline_spans(rest, theme.quote, theme));
            return spans;
        }

        if let Some((number, url)) = link_reference(line) {
            return vec![
                Span::styled(format!("[{}]: ", number), theme.link_ref),
                Span::styled(url.to_string(), theme.link_url),
            ];
        }

        if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            let mut spans = vec![Span::styled("• ", theme.bullet)];
            spans.extend(inline_spans(rest, theme.text, theme));
            return spans;
        }

        if let Some((marker, rest)) = ordered_item(line) {
            let mut spans = vec![Span::styled(marker.to_string(), theme.bullet)];
            spans.extend(inline_spans(rest, theme.text, theme));
            return spans;
        }

        inline_spans(line, theme.text, theme)
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let title = line[level..].strip_prefix(' ')?;
    Some((level, title))
}

/// Footnote lines such as `[3]: https://example.com`.
fn link_reference(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let (number, url) = rest.split_once("]: ")?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((number, url))
}

fn ordered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || !line[digits..].starts_with(". ") {
        return None;
    }
    Some(line.split_at(digits + 2))
}

fn inline_spans(text: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    let markers = [
        ("**", theme.strong),
        ("`", theme.code),
        ("*", theme.emphasis),
    ];

    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    'outer: while !rest.is_empty() {
        for (marker, style) in markers {
            let Some(after) = rest.strip_prefix(marker) else {
                continue;
            };
            if let Some(end) = closing_marker(after, marker) {
                if !plain.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut plain), base));
                }
                spans.push(Span::styled(after[..end].to_string(), base.patch(style)));
                rest = &after[end + marker.len()..];
                continue 'outer;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !plain.is_empty() {
        spans.push(Span::styled(plain, base));
    }
    spans
}

/// Offset of the marker closing an inline span, if the span is well formed.
fn closing_marker(after: &str, marker: &str) -> Option<usize> {
    if after.is_empty() || after.starts_with(char::is_whitespace) {
        return None;
    }
    let end = after.find(marker)?;
    if end == 0 || after[..end].ends_with(char::is_whitespace) {
        return None;
    }
    Some(end)
}
