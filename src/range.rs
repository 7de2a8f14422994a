//! Value-to-angle normalization.
//!
//! A [`GaugeRange`] maps a value in `[min, max]` onto an angular span in
//! degrees. The span may decrease (`angle_end < angle_start`), which is how
//! the donut gauge sweeps from 180° down to 0°; the same formula covers both
//! directions. Out-of-range values saturate at the endpoints.

use crate::error::GaugeError;

/// An immutable value range paired with its angular span. Construction
/// guarantees `max > min`; the angular endpoints carry no such constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeRange {
    min: f64,
    max: f64,
    angle_start_deg: f64,
    angle_end_deg: f64,
}

impl GaugeRange {
    pub fn new(
        min: f64,
        max: f64,
        angle_start_deg: f64,
        angle_end_deg: f64,
    ) -> Result<Self, GaugeError> {
        if !(max > min) {
            return Err(GaugeError::EmptyRange { min, max });
        }
        Ok(Self {
            min,
            max,
            angle_start_deg,
            angle_end_deg,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Saturate a value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamped position of `value` within the range, in `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }

    pub fn angle_deg(&self, value: f64) -> f64 {
        self.angle_start_deg + self.fraction(value) * (self.angle_end_deg - self.angle_start_deg)
    }

    pub fn angle_rad(&self, value: f64) -> f64 {
        self.angle_deg(value).to_radians()
    }

    pub fn angle_start_rad(&self) -> f64 {
        self.angle_start_deg.to_radians()
    }

    pub fn angle_end_rad(&self) -> f64 {
        self.angle_end_deg.to_radians()
    }
}
