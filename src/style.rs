//! Colors and stroke settings for live shapes, masks and anchor markers.

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::error::{PolymaskError, Result};

// ── Colors ──────────────────────────────────────────────────────────────────

/// RGBA color with channels in `0.0..=1.0`. Stored as `#rrggbb[aa]` in config
/// files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let invalid = || PolymaskError::InvalidColor {
            value: value.to_string(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 0xff {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_egui(self) -> egui::Color32 {
        let [r, g, b, a] = self.to_rgba8();
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

impl TryFrom<String> for Color4 {
    type Error = PolymaskError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color4> for String {
    fn from(color: Color4) -> Self {
        color.to_hex()
    }
}

pub const LINE: Color4 = Color4::from_rgba8(0x4c, 0xaf, 0x50, 0xff);
pub const CLOSED_FILL: Color4 = Color4::from_rgba8(0x8b, 0xc3, 0x4a, 0xff);
pub const MASK_FILL: Color4 = Color4::from_rgba8(0x4c, 0xaf, 0x50, 0x88);
pub const ANCHOR_FILL: Color4 = Color4::from_rgba8(0x8b, 0xc3, 0x4a, 0x77);
pub const ANCHOR_STROKE: Color4 = LINE;

// ── Drawing style ───────────────────────────────────────────────────────────

/// Visual parameters of the drawing layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingStyle {
    pub stroke: Color4,
    pub stroke_width: f32,
    /// Fill of a shape that was just closed but not yet retired.
    pub closed_fill: Color4,
    /// Fill of committed masks; translucent so the image stays visible.
    pub mask_fill: Color4,
    pub anchor_fill: Color4,
    pub anchor_stroke: Color4,
    pub anchor_stroke_width: f32,
    pub anchor_radius: f32,
    pub anchor_sides: usize,
    /// Marker scale while the pointer rests on the start vertex.
    pub hover_scale: f32,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            stroke: LINE,
            stroke_width: 4.0,
            closed_fill: CLOSED_FILL,
            mask_fill: MASK_FILL,
            anchor_fill: ANCHOR_FILL,
            anchor_stroke: ANCHOR_STROKE,
            anchor_stroke_width: 1.0,
            anchor_radius: 6.0,
            anchor_sides: 6,
            hover_scale: 2.0,
        }
    }
}

impl DrawingStyle {
    /// Open shapes are outlines only; closed ones take the closure fill.
    pub fn live_fill(&self, closed: bool) -> Option<Color4> {
        closed.then_some(self.closed_fill)
    }
}
