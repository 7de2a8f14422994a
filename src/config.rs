//! Style configuration for both gauge variants.
//!
//! Every knob the renderer honors lives here as a builder field with a
//! default, so `NeedleStyle::builder().build()` reproduces the stock look
//! and callers override only what they need.

use bon::Builder;

use crate::error::GaugeError;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const RED: Self = Self::new(0xff, 0x00, 0x00);

    /// Parse a `#rrggbb` hex string or one of a few named colors. Section
    /// color cells arrive as text from the external data source, so a bad
    /// cell is a configuration error rather than a panic.
    pub fn parse(s: &str) -> Result<Self, GaugeError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                let parse = |range| u8::from_str_radix(&hex[range], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (parse(0..2), parse(2..4), parse(4..6)) {
                    return Ok(Self::new(r, g, b));
                }
            }
            return Err(GaugeError::BadColor(s.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "red" => Ok(Self::RED),
            "gray" | "grey" => Ok(Self::new(0x80, 0x80, 0x80)),
            _ => Err(GaugeError::BadColor(s.to_string())),
        }
    }
}

/// Style for the full-circle needle gauge: zero-angle up, clockwise
/// positive, spanning -90° to +90°. Radii are unitless, relative to the
/// segment donut's outer radius of 1.0.
#[derive(Debug, Clone, Builder)]
pub struct NeedleStyle {
    // Segment donut
    #[builder(default = 0.75)]
    pub inner_radius: f64,
    #[builder(default = 1.0)]
    pub outer_radius: f64,
    #[builder(default = Color::WHITE)]
    pub segment_edge_color: Color,
    #[builder(default = 1.0)]
    pub segment_edge_width: f32,
    #[builder(default = 100)]
    pub segment_resolution: usize,
    #[builder(default = vec![
        Color::new(0xea, 0xf7, 0xe4),
        Color::new(0xc6, 0xe6, 0xb8),
        Color::new(0xa3, 0xda, 0x92),
        Color::new(0x80, 0xcd, 0x6c),
        Color::new(0x5d, 0xbf, 0x46),
        Color::new(0x3a, 0xa5, 0x2e),
    ])]
    pub palette: Vec<Color>,

    // Needle
    #[builder(default = 0.87)]
    pub needle_tip_radius: f64,
    #[builder(default = 0.05)]
    pub needle_pivot_radius: f64,
    #[builder(default = Color::new(0xcc, 0x00, 0x00))]
    pub needle_color: Color,
    #[builder(default = 1.8)]
    pub needle_width: f32,
    #[builder(default = 100)]
    pub needle_resolution: usize,
    #[builder(default = 0.03)]
    pub pivot_dot_radius: f64,

    // Milestone labels
    #[builder(default = 1.12)]
    pub label_text_radius: f64,
    #[builder(default = 8.0)]
    pub label_font_size_normal: f32,
    #[builder(default = 9.0)]
    pub label_font_size_matched: f32,
    #[builder(default = 1.15)]
    pub label_line_spacing: f32,
    #[builder(default = Color::RED)]
    pub matched_label_color: Color,
    #[builder(default = Color::BLACK)]
    pub normal_label_color: Color,

    // Pointer ticks
    #[builder(default = 1.02)]
    pub pointer_outer_radius: f64,
    #[builder(default = 0.76)]
    pub pointer_inner_radius: f64,
    #[builder(default = 2.2)]
    pub pointer_width: f32,
    #[builder(default = Color::new(0xcc, 0x00, 0x00))]
    pub pointer_color_matched: Color,
    #[builder(default = Color::new(0x0d, 0x35, 0x12))]
    pub pointer_color_normal: Color,

    // Central label
    #[builder(default = 0.24)]
    pub value_label_radius: f64,
    #[builder(default = 17.0)]
    pub value_label_font_size: f32,
    #[builder(default = Color::new(0x15, 0x3d, 0x64))]
    pub value_label_color: Color,
    #[builder(default = 0.35)]
    pub value_label_padding: f64,
    #[builder(default = 0.87)]
    pub value_label_bg_alpha: f64,

    // Angular span
    #[builder(default = -90.0)]
    pub angle_start_deg: f64,
    #[builder(default = 90.0)]
    pub angle_end_deg: f64,
    #[builder(default = 1.8)]
    pub radial_limit: f64,
}

/// Style for the semicircular donut-progress gauge: zero-angle right,
/// counter-clockwise positive, sweeping 180° down to 0° so progress runs
/// left to right across the top.
#[derive(Debug, Clone, Builder)]
pub struct DonutStyle {
    // Section donut (thin, lower layer)
    #[builder(default = 0.68)]
    pub section_inner_radius: f64,
    #[builder(default = 0.73)]
    pub section_outer_radius: f64,
    #[builder(default = Color::WHITE)]
    pub section_edge_color: Color,
    #[builder(default = 3.0)]
    pub section_edge_width: f32,

    // Progress donut (thick, upper layer)
    #[builder(default = 0.75)]
    pub progress_inner_radius: f64,
    #[builder(default = 1.0)]
    pub progress_outer_radius: f64,
    #[builder(default = Color::new(0xe0, 0xe0, 0xe0))]
    pub progress_background_color: Color,

    #[builder(default = 200)]
    pub segment_resolution: usize,

    // Central readout
    #[builder(default = 0.1)]
    pub value_label_radius: f64,
    #[builder(default = 45.0)]
    pub value_label_font_size: f32,
    #[builder(default = Color::new(0x39, 0x39, 0x39))]
    pub value_label_color: Color,

    // Angular span
    #[builder(default = 180.0)]
    pub angle_start_deg: f64,
    #[builder(default = 0.0)]
    pub angle_end_deg: f64,
    #[builder(default = 1.3)]
    pub radial_limit: f64,
}
