//! Circular gauge scene engine.
//!
//! Two gauge styles share one pipeline: a value is clamped into a data-driven
//! range, mapped to an angle, and expressed as a set of polar drawing
//! primitives plus formatted text. [`NeedleGauge`] is the full-circle
//! milestone gauge with a needle and labeled pointer ticks;
//! [`DonutGauge`] is the semicircular progress gauge with colored sections
//! and a large numeric readout.
//!
//! Rendering a gauge is a pure function: each call builds a fresh [`Scene`]
//! from its inputs and keeps no state between calls. Consuming the scene —
//! rasterizing, exporting, whatever — is the renderer's business; a software
//! rasterizer lives in [`render`] for the viewer binary and anyone without a
//! drawing backend of their own.

mod config;
mod error;
mod format;
mod labels;
mod polar;
mod range;
pub mod render;
mod scene;
mod segments;

pub use config::{Color, DonutStyle, NeedleStyle};
pub use error::GaugeError;
pub use format::{format_value, milestone_label, FormatMode, Separators};
pub use labels::{is_matched, milestone_text, resolve_emphasis, LabelEmphasis};
pub use polar::{arc_sweep, straight_line, PolarPoint, SweepOrder};
pub use range::GaugeRange;
pub use scene::{AngleConvention, DrawCommand, Scene, TextBackground};
pub use segments::{palette_color, Milestone, MilestoneScale, Section, SectionScale};

use tracing::debug;

/// Inputs for one needle-gauge render, as supplied by the external data
/// source.
#[derive(Debug, Clone)]
pub struct NeedleGaugeInput {
    /// The value the needle points at. Out-of-range values saturate.
    pub value: f64,
    /// Central label text, displayed over a background box.
    pub label: String,
    /// Selection matched against milestone labels for highlighting.
    pub current_milestone: String,
    pub milestones: MilestoneScale,
}

/// The full-circle milestone gauge.
#[derive(Debug, Clone)]
pub struct NeedleGauge {
    style: NeedleStyle,
}

impl NeedleGauge {
    pub fn new(style: NeedleStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &NeedleStyle {
        &self.style
    }

    /// Build the drawable scene for one render.
    pub fn render(&self, input: &NeedleGaugeInput) -> Result<Scene, GaugeError> {
        let style = &self.style;
        if style.palette.is_empty() {
            return Err(GaugeError::EmptyPalette);
        }
        let scale = &input.milestones;
        let range = GaugeRange::new(
            scale.min(),
            scale.max(),
            style.angle_start_deg,
            style.angle_end_deg,
        )?;
        debug!(
            value = input.value,
            milestones = scale.milestones().len(),
            "rendering needle gauge"
        );

        let mut scene = Scene::new(AngleConvention::NorthClockwise, style.radial_limit);
        let boundaries_rad: Vec<f64> = scale
            .boundaries()
            .iter()
            .map(|&v| range.angle_rad(v))
            .collect();

        // Segment arcs, palette cycling by index.
        for i in 0..scale.segment_count() {
            scene.add_command(DrawCommand::ArcFill {
                thetas: arc_sweep(
                    boundaries_rad[i],
                    boundaries_rad[i + 1],
                    style.segment_resolution,
                    SweepOrder::Ascending,
                ),
                inner_radius: style.inner_radius,
                outer_radius: style.outer_radius,
                color: palette_color(&style.palette, i),
                edge_color: Some(style.segment_edge_color),
                edge_width: style.segment_edge_width,
                z: 1,
            });
        }

        // Pointer ticks and labels for every milestone except the last: the
        // maximum has no outward arc to label.
        let milestones = scale.milestones();
        for (idx, milestone) in milestones[..milestones.len() - 1].iter().enumerate() {
            let angle = boundaries_rad[idx + 1];
            let emphasis =
                resolve_emphasis(&milestone.label, &input.current_milestone, style);
            scene.add_command(DrawCommand::Line {
                path: straight_line(
                    PolarPoint::new(angle, style.pointer_outer_radius),
                    PolarPoint::new(angle, style.pointer_inner_radius),
                    2,
                ),
                color: emphasis.pointer_color,
                width: style.pointer_width,
                z: 8,
            });
            scene.add_command(DrawCommand::Text {
                theta: angle,
                radius: style.label_text_radius,
                text: labels::milestone_text(&milestone.label, milestone.value),
                font_size: emphasis.font_size,
                color: emphasis.color,
                line_spacing: style.label_line_spacing,
                background: None,
                z: 3,
            });
        }

        // Needle from pivot to tip, straight across the polar projection.
        let needle_angle = range.angle_rad(input.value);
        scene.add_command(DrawCommand::Line {
            path: straight_line(
                PolarPoint::new(0.0, style.needle_pivot_radius),
                PolarPoint::new(needle_angle, style.needle_tip_radius),
                style.needle_resolution,
            ),
            color: style.needle_color,
            width: style.needle_width,
            z: 10,
        });
        scene.add_command(DrawCommand::Dot {
            theta: 0.0,
            radius: style.needle_pivot_radius,
            dot_radius: style.pivot_dot_radius,
            color: style.needle_color,
            z: 11,
        });

        scene.add_command(DrawCommand::Text {
            theta: 0.0,
            radius: style.value_label_radius,
            text: input.label.clone(),
            font_size: style.value_label_font_size,
            color: style.value_label_color,
            line_spacing: 1.3,
            background: Some(TextBackground {
                color: Color::WHITE,
                alpha: style.value_label_bg_alpha,
                padding: style.value_label_padding,
            }),
            z: 12,
        });

        Ok(scene)
    }
}

/// Inputs for one donut-gauge render.
#[derive(Debug, Clone)]
pub struct DonutGaugeInput {
    pub value: f64,
    /// Format-mode tag for the center readout; unknown tags fall back to
    /// `decimal1`.
    pub format_mode: String,
    /// `"dot"` for dot/comma separators, anything else for comma/space.
    pub decimal_separator: String,
    pub sections: SectionScale,
}

/// The semicircular donut-progress gauge.
#[derive(Debug, Clone)]
pub struct DonutGauge {
    style: DonutStyle,
}

impl DonutGauge {
    pub fn new(style: DonutStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &DonutStyle {
        &self.style
    }

    /// Build the drawable scene for one render.
    pub fn render(&self, input: &DonutGaugeInput) -> Result<Scene, GaugeError> {
        let style = &self.style;
        let scale = &input.sections;
        let range = GaugeRange::new(
            scale.min(),
            scale.max(),
            style.angle_start_deg,
            style.angle_end_deg,
        )?;
        debug!(
            value = input.value,
            sections = scale.sections().len(),
            "rendering donut gauge"
        );

        let mut scene = Scene::new(AngleConvention::EastCounterClockwise, style.radial_limit);

        // Thin section donut, the reference layer. The span decreases from
        // 180° to 0°, so arcs sweep descending to run in drawing order.
        for (i, section) in scale.sections().iter().enumerate() {
            scene.add_command(DrawCommand::ArcFill {
                thetas: arc_sweep(
                    range.angle_rad(scale.boundaries()[i]),
                    range.angle_rad(scale.boundaries()[i + 1]),
                    style.segment_resolution,
                    SweepOrder::Descending,
                ),
                inner_radius: style.section_inner_radius,
                outer_radius: style.section_outer_radius,
                color: section.color,
                edge_color: Some(style.section_edge_color),
                edge_width: style.section_edge_width,
                z: 5,
            });
        }

        // Full-span gray background under the progress arc.
        scene.add_command(DrawCommand::ArcFill {
            thetas: arc_sweep(
                range.angle_start_rad(),
                range.angle_end_rad(),
                style.segment_resolution,
                SweepOrder::Descending,
            ),
            inner_radius: style.progress_inner_radius,
            outer_radius: style.progress_outer_radius,
            color: style.progress_background_color,
            edge_color: None,
            edge_width: 0.0,
            z: 10,
        });

        // Progress arc from the start to the clamped value, colored by the
        // section the value falls in.
        let progress_value = range.clamp(input.value);
        scene.add_command(DrawCommand::ArcFill {
            thetas: arc_sweep(
                range.angle_start_rad(),
                range.angle_rad(progress_value),
                style.segment_resolution,
                SweepOrder::Descending,
            ),
            inner_radius: style.progress_inner_radius,
            outer_radius: style.progress_outer_radius,
            color: scale.color_at(progress_value),
            edge_color: None,
            edge_width: 0.0,
            z: 11,
        });

        // Center readout formats the raw value, not the clamped one.
        scene.add_command(DrawCommand::Text {
            theta: std::f64::consts::FRAC_PI_2,
            radius: style.value_label_radius,
            text: format_value(
                input.value,
                FormatMode::from_tag(&input.format_mode),
                Separators::from_tag(&input.decimal_separator),
            ),
            font_size: style.value_label_font_size,
            color: style.value_label_color,
            line_spacing: 1.0,
            background: None,
            z: 12,
        });

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_milestones() -> MilestoneScale {
        MilestoneScale::new(
            vec![
                Milestone {
                    label: "Bronze".to_string(),
                    value: 10.0,
                },
                Milestone {
                    label: "Silver".to_string(),
                    value: 30.0,
                },
                Milestone {
                    label: "Gold".to_string(),
                    value: 60.0,
                },
            ],
            0.0,
        )
        .unwrap()
    }

    fn needle_input(value: f64) -> NeedleGaugeInput {
        NeedleGaugeInput {
            value,
            label: "Progress".to_string(),
            current_milestone: "silver".to_string(),
            milestones: sample_milestones(),
        }
    }

    fn needle_tip_theta(scene: &Scene) -> f64 {
        scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Line { path, z: 10, .. } => Some(path[path.len() - 1].theta),
                _ => None,
            })
            .expect("needle line present")
    }

    #[test]
    fn needle_lands_between_the_surrounding_boundaries() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let scene = gauge.render(&needle_input(45.0)).unwrap();

        let range = GaugeRange::new(0.0, 60.0, -90.0, 90.0).unwrap();
        let silver = range.angle_rad(30.0);
        let gold = range.angle_rad(60.0);
        let tip = needle_tip_theta(&scene);
        assert!(tip > silver && tip < gold, "tip {tip} not in ({silver}, {gold})");
    }

    #[test]
    fn needle_hits_a_boundary_value_exactly() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let scene = gauge.render(&needle_input(60.0)).unwrap();

        let gold = GaugeRange::new(0.0, 60.0, -90.0, 90.0)
            .unwrap()
            .angle_rad(60.0);
        assert!((needle_tip_theta(&scene) - gold).abs() < 1e-9);
    }

    #[test]
    fn scale_minimum_anchors_the_needle_range() {
        // The gauge minimum travels with the scale, not the style: rebasing
        // the same milestones at 10 moves every angle, and values at or
        // below the new minimum sit at the start of the span.
        let rebased = MilestoneScale::new(sample_milestones().milestones().to_vec(), 10.0).unwrap();
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let scene = gauge
            .render(&NeedleGaugeInput {
                value: 10.0,
                label: "Progress".to_string(),
                current_milestone: String::new(),
                milestones: rebased,
            })
            .unwrap();

        let range = GaugeRange::new(10.0, 60.0, -90.0, 90.0).unwrap();
        assert!((needle_tip_theta(&scene) - range.angle_start_rad()).abs() < 1e-9);

        let first_arc_start = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::ArcFill { thetas, .. } => Some(thetas[0]),
                _ => None,
            })
            .unwrap();
        assert!((first_arc_start - range.angle_start_rad()).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_needle_saturates_at_the_span_edge() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let high = gauge.render(&needle_input(500.0)).unwrap();
        let max = gauge.render(&needle_input(60.0)).unwrap();
        assert!((needle_tip_theta(&high) - needle_tip_theta(&max)).abs() < 1e-9);
    }

    #[test]
    fn needle_scene_layers_every_primitive() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let scene = gauge.render(&needle_input(45.0)).unwrap();
        assert_eq!(scene.convention, AngleConvention::NorthClockwise);

        let arcs = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::ArcFill { .. }))
            .count();
        assert_eq!(arcs, 3);

        // Pointer ticks and labels for all milestones except the last.
        let pointers = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { z: 8, .. }))
            .count();
        assert_eq!(pointers, 2);
        let texts = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(texts, 3); // two milestone labels plus the central label

        assert!(scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Dot { z: 11, .. })));
    }

    #[test]
    fn matched_milestone_gets_highlight_colors_in_the_scene() {
        let style = NeedleStyle::builder().build();
        let matched_color = style.matched_label_color;
        let gauge = NeedleGauge::new(style);
        let scene = gauge.render(&needle_input(45.0)).unwrap();

        let silver_label = scene.commands().iter().find_map(|c| match c {
            DrawCommand::Text { text, color, .. } if text.starts_with("Silver") => Some(*color),
            _ => None,
        });
        assert_eq!(silver_label, Some(matched_color));
    }

    #[test]
    fn milestone_labels_carry_their_own_formatted_value() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().build());
        let scene = gauge.render(&needle_input(45.0)).unwrap();
        assert!(scene.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "Bronze\n10"
        )));
    }

    #[test]
    fn empty_palette_is_a_configuration_error() {
        let gauge = NeedleGauge::new(NeedleStyle::builder().palette(vec![]).build());
        assert!(matches!(
            gauge.render(&needle_input(45.0)),
            Err(GaugeError::EmptyPalette)
        ));
    }

    fn sample_sections() -> SectionScale {
        SectionScale::new(
            vec![
                Section {
                    description: "Low".to_string(),
                    span: 40.0,
                    color: Color::new(0xe7, 0x4c, 0x3c),
                },
                Section {
                    description: "Mid".to_string(),
                    span: 35.0,
                    color: Color::new(0xf1, 0xc4, 0x0f),
                },
                Section {
                    description: "High".to_string(),
                    span: 25.0,
                    color: Color::new(0x2e, 0xcc, 0x71),
                },
            ],
            0.0,
        )
        .unwrap()
    }

    fn donut_input(value: f64) -> DonutGaugeInput {
        DonutGaugeInput {
            value,
            format_mode: "percent0".to_string(),
            decimal_separator: "dot".to_string(),
            sections: sample_sections(),
        }
    }

    #[test]
    fn donut_progress_takes_its_sections_color() {
        let gauge = DonutGauge::new(DonutStyle::builder().build());
        let scene = gauge.render(&donut_input(50.0)).unwrap();
        assert_eq!(scene.convention, AngleConvention::EastCounterClockwise);

        // z 11 is the progress arc; 50 sits in the middle section.
        let progress_color = scene.commands().iter().find_map(|c| match c {
            DrawCommand::ArcFill { color, z: 11, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(progress_color, Some(Color::new(0xf1, 0xc4, 0x0f)));
    }

    #[test]
    fn donut_progress_arc_spans_start_to_value() {
        let gauge = DonutGauge::new(DonutStyle::builder().build());
        let scene = gauge.render(&donut_input(50.0)).unwrap();

        let range = GaugeRange::new(0.0, 100.0, 180.0, 0.0).unwrap();
        let thetas = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::ArcFill { thetas, z: 11, .. } => Some(thetas.clone()),
                _ => None,
            })
            .unwrap();
        // Descending sweep: first sample is the value angle, last is 180°.
        assert!((thetas[0] - range.angle_rad(50.0)).abs() < 1e-9);
        assert!((thetas[thetas.len() - 1] - range.angle_start_rad()).abs() < 1e-9);
    }

    #[test]
    fn donut_readout_formats_the_raw_value() {
        let gauge = DonutGauge::new(DonutStyle::builder().build());
        let scene = gauge.render(&donut_input(130.0)).unwrap();
        // Readout shows 130% even though the arc clamps at 100.
        assert!(scene.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "130%"
        )));
    }

    #[test]
    fn donut_layers_sections_background_progress_text() {
        let gauge = DonutGauge::new(DonutStyle::builder().build());
        let scene = gauge.render(&donut_input(50.0)).unwrap();
        let mut zs: Vec<i32> = scene.commands().iter().map(|c| c.z()).collect();
        zs.dedup();
        assert_eq!(zs, vec![5, 10, 11, 12]);
    }
}
