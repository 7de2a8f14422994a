//! Drawable output of a gauge render.
//!
//! A [`Scene`] is an ordered list of polar drawing primitives plus the
//! angle convention and radial extent the consumer needs to place them on a
//! surface. The engine only ever appends commands; the renderer sorts by
//! z-order when painting.

use std::str::FromStr;

use crate::config::Color;
use crate::error::GaugeError;
use crate::polar::PolarPoint;

/// How polar angles map onto the drawing surface.
///
/// The needle gauge points its zero angle up and grows clockwise; the donut
/// gauge points zero right and grows counter-clockwise. Each gauge style is
/// welded to its convention, so a scene always carries the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    NorthClockwise,
    EastCounterClockwise,
}

impl AngleConvention {
    /// Unit-circle surface offsets for a polar point, y growing downward.
    pub fn to_screen(self, theta: f64, r: f64) -> (f64, f64) {
        match self {
            Self::NorthClockwise => (r * theta.sin(), -r * theta.cos()),
            Self::EastCounterClockwise => (r * theta.cos(), -r * theta.sin()),
        }
    }

    /// Inverse of [`to_screen`](Self::to_screen): the polar angle of a
    /// surface offset.
    pub fn theta_of(self, dx: f64, dy: f64) -> f64 {
        match self {
            Self::NorthClockwise => dx.atan2(-dy),
            Self::EastCounterClockwise => (-dy).atan2(dx),
        }
    }
}

impl FromStr for AngleConvention {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north-clockwise" => Ok(Self::NorthClockwise),
            "east-counterclockwise" => Ok(Self::EastCounterClockwise),
            other => Err(GaugeError::UnknownConvention(other.to_string())),
        }
    }
}

/// Background box behind a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBackground {
    pub color: Color,
    pub alpha: f64,
    /// Padding around the text, as a fraction of the font size.
    pub padding: f64,
}

/// A single drawable primitive. Radii are unitless; the consumer scales by
/// its surface size and the scene's radial limit.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled band between two radii, swept across the sampled thetas.
    ArcFill {
        thetas: Vec<f64>,
        inner_radius: f64,
        outer_radius: f64,
        color: Color,
        edge_color: Option<Color>,
        edge_width: f32,
        z: i32,
    },
    /// Polyline through polar points (needle, pointer ticks).
    Line {
        path: Vec<PolarPoint>,
        color: Color,
        width: f32,
        z: i32,
    },
    /// Centered text at a polar position. Lines split on `\n`.
    Text {
        theta: f64,
        radius: f64,
        text: String,
        font_size: f32,
        color: Color,
        line_spacing: f32,
        background: Option<TextBackground>,
        z: i32,
    },
    /// Filled dot (needle pivot).
    Dot {
        theta: f64,
        radius: f64,
        dot_radius: f64,
        color: Color,
        z: i32,
    },
}

impl DrawCommand {
    pub fn z(&self) -> i32 {
        match self {
            Self::ArcFill { z, .. }
            | Self::Line { z, .. }
            | Self::Text { z, .. }
            | Self::Dot { z, .. } => *z,
        }
    }
}

/// The complete drawable output of one render call.
#[derive(Debug, Clone)]
pub struct Scene {
    pub convention: AngleConvention,
    /// Largest radius any primitive may reach; sets the surface scale.
    pub radial_limit: f64,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(convention: AngleConvention, radial_limit: f64) -> Self {
        Self {
            convention,
            radial_limit,
            commands: Vec::new(),
        }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn north_clockwise_points_up_at_zero() {
        let c = AngleConvention::NorthClockwise;
        let (x, y) = c.to_screen(0.0, 1.0);
        assert!(x.abs() < TOL && (y + 1.0).abs() < TOL);
        // +90° is to the right (clockwise positive).
        let (x, y) = c.to_screen(FRAC_PI_2, 1.0);
        assert!((x - 1.0).abs() < TOL && y.abs() < TOL);
    }

    #[test]
    fn east_counterclockwise_points_right_at_zero() {
        let c = AngleConvention::EastCounterClockwise;
        let (x, y) = c.to_screen(0.0, 1.0);
        assert!((x - 1.0).abs() < TOL && y.abs() < TOL);
        // +90° is up (counter-clockwise positive, y down on screen).
        let (x, y) = c.to_screen(FRAC_PI_2, 1.0);
        assert!(x.abs() < TOL && (y + 1.0).abs() < TOL);
        // 180° is left.
        let (x, y) = c.to_screen(PI, 1.0);
        assert!((x + 1.0).abs() < TOL && y.abs() < TOL);
    }

    #[test]
    fn theta_of_inverts_to_screen() {
        for convention in [
            AngleConvention::NorthClockwise,
            AngleConvention::EastCounterClockwise,
        ] {
            for i in -8..=8 {
                let theta = i as f64 * PI / 9.0;
                let (x, y) = convention.to_screen(theta, 0.8);
                let back = convention.theta_of(x, y);
                assert!((back - theta).abs() < 1e-9, "{convention:?} {theta}");
            }
        }
    }

    #[test]
    fn convention_names_parse() {
        assert_eq!(
            "north-clockwise".parse::<AngleConvention>().unwrap(),
            AngleConvention::NorthClockwise
        );
        assert_eq!(
            "east-counterclockwise".parse::<AngleConvention>().unwrap(),
            AngleConvention::EastCounterClockwise
        );
        assert!(matches!(
            "widdershins".parse::<AngleConvention>(),
            Err(GaugeError::UnknownConvention(_))
        ));
    }

    #[test]
    fn commands_report_their_z_order() {
        let mut scene = Scene::new(AngleConvention::NorthClockwise, 1.8);
        scene.add_command(DrawCommand::Dot {
            theta: 0.0,
            radius: 0.05,
            dot_radius: 0.03,
            color: Color::RED,
            z: 11,
        });
        assert_eq!(scene.commands().len(), 1);
        assert_eq!(scene.commands()[0].z(), 11);
    }
}
