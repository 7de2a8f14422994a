//! Polar geometry primitives.
//!
//! Two generators feed the drawable scene: equally spaced theta sweeps for
//! filled arcs, and straight lines expressed in polar coordinates. A line
//! interpolated directly in `(theta, r)` space bends under a polar
//! projection, so line points are produced by converting the endpoints to
//! Cartesian, interpolating there, and converting each sample back.
//!
//! The Cartesian pairing is rotated a quarter turn relative to the polar
//! zero-angle reference: `x = r·cos(θ − π/2)`, `y = r·sin(θ − π/2)`, with
//! inverse `θ = atan2(y, x) + π/2`. Needle and pointer lines must go through
//! the same pairing or they land on different rays than the arcs they cross.

use std::f64::consts::FRAC_PI_2;

/// A point in polar coordinates: angle in radians, unitless radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub theta: f64,
    pub r: f64,
}

impl PolarPoint {
    pub fn new(theta: f64, r: f64) -> Self {
        Self { theta, r }
    }
}

/// Direction in which an arc's theta samples are emitted. The donut gauge
/// must sweep descending to paint correctly under its counter-clockwise
/// convention; the needle gauge sweeps ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOrder {
    Ascending,
    Descending,
}

/// `resolution` equally spaced angles covering `[start_rad, end_rad]`
/// inclusive. `Ascending` runs start to end, `Descending` end to start.
pub fn arc_sweep(start_rad: f64, end_rad: f64, resolution: usize, order: SweepOrder) -> Vec<f64> {
    let n = resolution.max(2);
    let (from, to) = match order {
        SweepOrder::Ascending => (start_rad, end_rad),
        SweepOrder::Descending => (end_rad, start_rad),
    };
    let step = (to - from) / (n - 1) as f64;
    (0..n).map(|i| from + step * i as f64).collect()
}

pub fn to_cartesian(p: PolarPoint) -> (f64, f64) {
    let x = p.r * (p.theta - FRAC_PI_2).cos();
    let y = p.r * (p.theta - FRAC_PI_2).sin();
    (x, y)
}

pub fn from_cartesian(x: f64, y: f64) -> PolarPoint {
    PolarPoint {
        theta: y.atan2(x) + FRAC_PI_2,
        r: (x * x + y * y).sqrt(),
    }
}

/// A visually straight segment from `start` to `end`, sampled at
/// `resolution` points and returned in polar form.
pub fn straight_line(start: PolarPoint, end: PolarPoint, resolution: usize) -> Vec<PolarPoint> {
    let n = resolution.max(2);
    let (x1, y1) = to_cartesian(start);
    let (x2, y2) = to_cartesian(end);
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            from_cartesian(x1 + (x2 - x1) * t, y1 + (y2 - y1) * t)
        })
        .collect()
}
