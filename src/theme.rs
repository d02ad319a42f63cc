//! Terminal colours for sand tags and chrome; btop-style `theme[key]="value"` files.

use clap::ValueEnum;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Colour variant applied on top of the theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

const ONE_DARK_SAND: [Color; 6] = [
    Color::Rgb(0xE0, 0x6C, 0x75), // red
    Color::Rgb(0x61, 0xAF, 0xEF), // blue
    Color::Rgb(0xE5, 0xC0, 0x7B), // yellow
    Color::Rgb(0x98, 0xC3, 0x79), // green
    Color::Rgb(0xC6, 0x78, 0xDD), // magenta
    Color::Rgb(0x56, 0xB6, 0xC2), // cyan
];

const HIGH_CONTRAST_SAND: [Color; 6] = [
    Color::Rgb(0xFF, 0x00, 0x00),
    Color::Rgb(0x00, 0x88, 0xFF),
    Color::Rgb(0xFF, 0xFF, 0x00),
    Color::Rgb(0x00, 0xFF, 0x00),
    Color::Rgb(0xFF, 0x00, 0xFF),
    Color::Rgb(0x00, 0xFF, 0xFF),
];

// Tol "bright" style: no red/green pair among the first four.
const COLORBLIND_SAND: [Color; 6] = [
    Color::Rgb(0xEE, 0x77, 0x33),
    Color::Rgb(0x00, 0x77, 0xBB),
    Color::Rgb(0xBB, 0xBB, 0x00),
    Color::Rgb(0x00, 0x99, 0x88),
    Color::Rgb(0xEE, 0x33, 0x77),
    Color::Rgb(0xCC, 0x33, 0x11),
];

/// Colours for everything the host draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Sand colour per tag; tag `i` uses `sand[i % 6]`.
    pub sand: [Color; 6],
    /// Playfield background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    pub main_fg: Color,
    pub title: Color,
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            sand: ONE_DARK_SAND,
            bg: Color::Rgb(0x31, 0x35, 0x3F),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            inactive_fg: Color::Rgb(0x5C, 0x63, 0x70),
        }
    }
}

impl Theme {
    /// Reads a btop-style theme file, then applies `palette`. A missing path
    /// gives the One Dark defaults.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) => Self::from_map(&parse_theme_file(&std::fs::read_to_string(p)?)),
            None => Self::default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => self.sand = HIGH_CONTRAST_SAND,
            Palette::Colorblind => self.sand = COLORBLIND_SAND,
        }
    }

    /// Unknown or malformed keys keep their default.
    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(|v| parse_hex(v).ok()));
        let d = Self::default();
        Self {
            sand: [
                get(&["cpu_end", "temp_end"]).unwrap_or(d.sand[0]),
                get(&["cpu_box"]).unwrap_or(d.sand[1]),
                get(&["title", "cpu_mid"]).unwrap_or(d.sand[2]),
                get(&["mem_box", "cpu_start"]).unwrap_or(d.sand[3]),
                get(&["net_box"]).unwrap_or(d.sand[4]),
                get(&["hi_fg", "proc_misc"]).unwrap_or(d.sand[5]),
            ],
            bg: get(&["meter_bg"]).unwrap_or(d.bg),
            div_line: get(&["div_line"]).unwrap_or(d.div_line),
            main_fg: get(&["main_fg"]).unwrap_or(d.main_fg),
            title: get(&["title"]).unwrap_or(d.title),
            inactive_fg: get(&["inactive_fg"]).unwrap_or(d.inactive_fg),
        }
    }

    #[inline]
    pub fn sand_color(&self, tag: u8) -> Color {
        self.sand[tag as usize % self.sand.len()]
    }
}

/// Parse btop-style theme text into key -> value.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#'))
        .filter_map(|l| l.strip_prefix("theme["))
        .filter_map(|rest| {
            let (key, rest) = rest.split_once(']')?;
            let (_, value) = rest.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (!value.is_empty()).then(|| (key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Parse "#RRGGBB" or "#RGB".
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let hex = s.trim().trim_start_matches('#');
    let bad = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(bad)
    };
    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(bad()),
    }
}
