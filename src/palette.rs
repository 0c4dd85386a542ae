//! Evenly hued color palettes for rendering groups.
//!
//! A palette of `count` colors samples the hue circle at `k / count` for
//! `k in 0..count`, with fixed saturation and value. Channels are scaled to
//! `0..=255` by truncation, never rounding, so the same request always yields
//! byte-identical colors.

use std::fmt;

use crate::error::{Error, Result};

/// Default saturation for group palettes.
pub const DEFAULT_SATURATION: f64 = 0.5;

/// Default value (brightness) for group palettes.
pub const DEFAULT_VALUE: f64 = 1.0;

/// An 8-bit RGB color. Displays as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// `#000000`
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// `#ff0000`
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// `#00ff00`
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// `#ffff00`
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert an HSV triple (each component in `[0, 1]`) to a color,
    /// truncating each scaled channel.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let [r, g, b] = hsv_to_rgb(h, s, v);
        // `as u8` truncates toward zero and saturates at the bounds.
        Self::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Six-sector HSV to RGB conversion; all components in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    if s == 0.0 {
        return [v, v, v];
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Palette request: a color count plus fixed saturation and value.
#[derive(Debug, Clone)]
pub struct Palette {
    count: usize,
    saturation: f64,
    value: f64,
}

impl Palette {
    /// Request `count` colors with the default saturation and value.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
        }
    }

    /// Set the saturation shared by every color.
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the value (brightness) shared by every color.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Generate the colors.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `count == 0`.
    /// - [`Error::InvalidParameter`] if saturation or value lies outside `[0, 1]`.
    pub fn generate(&self) -> Result<Vec<Color>> {
        if self.count == 0 {
            return Err(Error::EmptyInput);
        }

        if !(0.0..=1.0).contains(&self.saturation) {
            return Err(Error::InvalidParameter {
                name: "saturation",
                message: "must be in [0, 1]",
            });
        }

        if !(0.0..=1.0).contains(&self.value) {
            return Err(Error::InvalidParameter {
                name: "value",
                message: "must be in [0, 1]",
            });
        }

        let n = self.count as f64;
        Ok((0..self.count)
            .map(|k| Color::from_hsv(k as f64 / n, self.saturation, self.value))
            .collect())
    }
}

/// Generate `count` evenly hued colors at the default saturation and value.
pub fn generate(count: usize) -> Result<Vec<Color>> {
    Palette::new(count).generate()
}
