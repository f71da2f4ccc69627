use ratatui::style::{Color, Modifier, Style};

/// The fixed palette used when styling converted articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub text: Style,
    pub heading: Style,
    pub subheading: Style,
    pub quote: Style,
    pub bullet: Style,
    pub link_ref: Style,
    pub link_url: Style,
    pub rule: Style,
    pub strong: Style,
    pub emphasis: Style,
    pub code: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Style::default().fg(Color::Gray),
            heading: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            subheading: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            bullet: Style::default().fg(Color::Cyan),
            link_ref: Style::default().fg(Color::DarkGray),
            link_url: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            rule: Style::default().fg(Color::DarkGray),
            strong: Style::default().add_modifier(Modifier::BOLD),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            code: Style::default().fg(Color::LightRed).bg(Color::Black),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
