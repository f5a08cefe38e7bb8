//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::catalog::Category;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Bin colours plus UI colours.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Indexed by `Category::color_index`: yellow, green, brown, collection, gray.
    pub category: [Color; 5],
    /// Playfield background.
    pub bg: Color,
    /// Border.
    pub div_line: Color,
    /// Text (score, hints).
    pub main_fg: Color,
    pub title: Color,
    /// Flash for a correct sort.
    pub good: Color,
    /// Flash for a wrong bin or a miss.
    pub bad: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

const CATEGORY_KEYS: [&str; 5] = [
    "yellow_bin",
    "green_bin",
    "brown_bin",
    "collection_bin",
    "gray_bin",
];

impl Default for Theme {
    fn default() -> Self {
        Self {
            category: [
                Color::Rgb(0xF9, 0xDC, 0x5C),
                Color::Rgb(0x2B, 0xAC, 0x76),
                Color::Rgb(0x8D, 0x64, 0x49),
                Color::Rgb(0xE0, 0x57, 0x80),
                Color::Rgb(0xA4, 0xA5, 0xA6),
            ],
            bg: Color::Rgb(0x1F, 0x23, 0x2A),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            good: Color::Rgb(0x98, 0xC3, 0x79),
            bad: Color::Rgb(0xE0, 0x6C, 0x75),
        }
    }
}

impl Theme {
    /// Load theme from a btop-style file. Missing path or keys fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_theme_file(&s)))
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let mut theme = Self::default();
        for (slot, key) in theme.category.iter_mut().zip(CATEGORY_KEYS) {
            if let Some(c) = get(key) {
                *slot = c;
            }
        }
        theme.bg = get("main_bg").unwrap_or(theme.bg);
        theme.div_line = get("div_line").unwrap_or(theme.div_line);
        theme.main_fg = get("main_fg").unwrap_or(theme.main_fg);
        theme.title = get("title").unwrap_or(theme.title);
        theme.good = get("good").unwrap_or(theme.good);
        theme.bad = get("bad").unwrap_or(theme.bad);
        theme
    }

    #[inline]
    pub fn category_color(&self, category: Category) -> Color {
        self.category[category.color_index()]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(eq) = rest.find('=') {
            let value = rest[eq + 1..]
                .trim()
                .trim_matches('"')
                .trim_matches('\'')
                .to_string();
            if !value.is_empty() {
                map.insert(key.to_string(), value);
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    if !s.is_ascii() {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}
