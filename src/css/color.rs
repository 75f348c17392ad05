//! Color handling utilities
//!
//! A single Color type that parses hex, `rgb()`/`rgba()` and `hsl()`/`hsla()` notation
//! and converts between those and the LSP color representation.

use std::fmt;
use tower_lsp::lsp_types::Color as LspColor;

/// An sRGB color with 8-bit channels and a fractional alpha
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 is transparent, 1.0 opaque
    pub a: f32,
}

impl Color {
    /// Opaque color
    pub fn new_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn new_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Accepts `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`, with or without the leading `#`
    pub fn from_hex(hex_value: &str) -> Option<Self> {
        let hex_part = hex_value.strip_prefix('#').unwrap_or(hex_value);
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let short = |i: usize| u8::from_str_radix(&hex_part[i..i + 1].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex_part[i..i + 2], 16).ok();

        match hex_part.len() {
            3 => Some(Self::new_rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::new_rgba(short(0)?, short(1)?, short(2)?, short(3)? as f32 / 255.0)),
            6 => Some(Self::new_rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::new_rgba(long(0)?, long(2)?, long(4)?, long(6)? as f32 / 255.0)),
            _ => None,
        }
    }

    /// Parse a color function such as `rgb(255, 0, 0)`, `rgba(0 0 0 / 50%)` or
    /// `hsl(120, 100%, 50%)`
    pub fn from_function(name: &str, arguments: &str) -> Option<Self> {
        let arguments = arguments.trim().strip_prefix('(')?.strip_suffix(')')?;
        let parts: Vec<&str> = arguments
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }

        let alpha = match parts.get(3) {
            Some(alpha) => parse_fraction(alpha)?,
            None => 1.0,
        };

        match name.to_ascii_lowercase().as_str() {
            "rgb" | "rgba" => {
                let channel = |part: &str| -> Option<u8> {
                    let value = match part.strip_suffix('%') {
                        Some(percent) => percent.parse::<f32>().ok()? * 255.0 / 100.0,
                        None => part.parse::<f32>().ok()?,
                    };
                    Some(value.round().clamp(0.0, 255.0) as u8)
                };
                Some(Self::new_rgba(
                    channel(parts[0])?,
                    channel(parts[1])?,
                    channel(parts[2])?,
                    alpha,
                ))
            }
            "hsl" | "hsla" => {
                let hue = parts[0].trim_end_matches("deg").parse::<f32>().ok()?;
                let saturation = parts[1].strip_suffix('%')?.parse::<f32>().ok()? / 100.0;
                let lightness = parts[2].strip_suffix('%')?.parse::<f32>().ok()? / 100.0;
                let mut color = Self::from_hsl(hue, saturation, lightness);
                color.a = alpha;
                Some(color)
            }
            _ => None,
        }
    }

    /// Build a color from hue (degrees), saturation and lightness (0.0-1.0)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);
        let hue = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
        let (r, g, b) = match hue as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;
        let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Self::new_rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Hue in degrees, saturation and lightness in percent
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, (lightness * 100.0).round());
        }

        let delta = max - min;
        let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        (
            hue.round(),
            (saturation * 100.0).round(),
            (lightness * 100.0).round(),
        )
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `#rrggbbaa`
    pub fn to_hex_with_alpha(&self) -> String {
        let alpha = (self.a * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
    }

    pub fn to_lsp(&self) -> LspColor {
        LspColor {
            red: self.r as f32 / 255.0,
            green: self.g as f32 / 255.0,
            blue: self.b as f32 / 255.0,
            alpha: self.a,
        }
    }

    pub fn from_lsp(color: &LspColor) -> Self {
        let to_byte = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new_rgba(
            to_byte(color.red),
            to_byte(color.green),
            to_byte(color.blue),
            color.alpha.clamp(0.0, 1.0),
        )
    }
}

fn parse_fraction(text: &str) -> Option<f32> {
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok()? / 100.0,
        None => text.parse::<f32>().ok()?,
    };
    Some(value.clamp(0.0, 1.0))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}
