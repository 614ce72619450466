//! Grid theming: serde-deserializable styles so a host dashboard can ship
//! themes as TOML. Theme is configuration, distinct from view state, which
//! is never persisted.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "cyan", "darkgray", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightRed => Color::LightRed,
                NamedColor::LightGreen => Color::LightGreen,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightMagenta => Color::LightMagenta,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single surface
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
}

impl ElementStyle {
    pub fn fg(color: ThemeColor) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    pub fn with_bg(mut self, color: ThemeColor) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn to_ratatui(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

/// Complete theme for one grid
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTheme {
    pub header: ElementStyle,
    /// Header cell of a column currently in the sort descriptor
    pub header_sorted: ElementStyle,
    pub row: ElementStyle,
    pub row_focused: ElementStyle,
    pub row_selected: ElementStyle,
    /// Loading-state placeholder rows
    pub skeleton: ElementStyle,
    /// Empty-state placeholder text
    pub placeholder: ElementStyle,
    /// Pager footer line
    pub footer: ElementStyle,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            header: ElementStyle::fg(ThemeColor::Named(NamedColor::Cyan)).with_bold(),
            header_sorted: ElementStyle::fg(ThemeColor::Named(NamedColor::Yellow)).with_bold(),
            row: ElementStyle::default(),
            row_focused: ElementStyle::fg(ThemeColor::Named(NamedColor::White))
                .with_bg(ThemeColor::Named(NamedColor::Blue)),
            row_selected: ElementStyle::fg(ThemeColor::Named(NamedColor::Black))
                .with_bg(ThemeColor::Named(NamedColor::Cyan)),
            skeleton: ElementStyle::fg(ThemeColor::Named(NamedColor::DarkGray)).with_dim(),
            placeholder: ElementStyle::fg(ThemeColor::Named(NamedColor::DarkGray)),
            footer: ElementStyle::fg(ThemeColor::Named(NamedColor::Gray)),
        }
    }
}

impl GridTheme {
    /// Parse a theme from TOML. Unspecified surfaces fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_builds_styles() {
        let theme = GridTheme::default();
        let style = theme.header.to_ratatui();
        assert_eq!(style.fg, Some(Color::Cyan));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let theme = GridTheme::from_toml_str(
            r#"
            [row_selected]
            fg = "black"
            bg = [255, 128, 0]
            bold = true
            "#,
        )
        .unwrap();

        let style = theme.row_selected.to_ratatui();
        assert_eq!(style.fg, Some(Color::Black));
        assert_eq!(style.bg, Some(Color::Rgb(255, 128, 0)));

        // Unmentioned surfaces keep their defaults.
        assert_eq!(theme.header.to_ratatui().fg, Some(Color::Cyan));
    }

    #[test]
    fn parse_indexed_color() {
        let theme = GridTheme::from_toml_str("[skeleton]\nfg = 42\n").unwrap();
        assert_eq!(theme.skeleton.to_ratatui().fg, Some(Color::Indexed(42)));
    }

    #[test]
    fn invalid_color_name_is_an_error() {
        assert!(GridTheme::from_toml_str("[header]\nfg = \"plaid\"\n").is_err());
    }
}
