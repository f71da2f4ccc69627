//! Color configuration for the TUI chrome.
//!
//! Article text uses the converter's fixed theme and is not configurable.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub title_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub title_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selected: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub item_title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub item_detail: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub header: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub spinner: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub pager_help: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub filter_prompt: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            title_fg: Color::Rgb(0xff, 0xfd, 0xf5),
            title_bg: Color::Rgb(0x25, 0xa0, 0x65),
            selected: Color::Indexed(170),
            item_title: Color::Reset,
            item_detail: Color::DarkGray,
            header: Color::Reset,
            spinner: Color::Indexed(5),
            pager_help: Color::Rgb(0x5c, 0x5c, 0x5c),
            filter_prompt: Color::Yellow,
            status_fg: Color::Gray,
            status_bg: Color::Reset,
            error: Color::LightRed,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Accepts named colors ("Cyan", "DarkGray", "Reset", ...), hex colors
/// ("#RRGGBB" or "#RGB") and 256-color palette indices ("170").
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        return s
            .parse::<u8>()
            .map(Color::Indexed)
            .map_err(|_| format!("Palette index out of range: {}", s));
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let invalid = || format!("Invalid hex color: {}", s);

    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit, so F becomes FF
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
