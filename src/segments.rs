//! Milestone and section scales.
//!
//! Both gauge variants derive their effective range from data rather than
//! configuration: the needle gauge's maximum is its largest milestone value,
//! the donut gauge's maximum is the sum of its section spans. Each scale
//! exposes the cumulative boundary values the arc builder sweeps between.

use tracing::debug;

use crate::config::Color;
use crate::error::GaugeError;

/// A named threshold on the needle gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub label: String,
    pub value: f64,
}

/// Ascending milestone thresholds plus the boundary list `[min, v1, .., vn]`.
/// The last milestone value is the gauge's effective maximum.
#[derive(Debug, Clone)]
pub struct MilestoneScale {
    milestones: Vec<Milestone>,
    boundaries: Vec<f64>,
    min: f64,
}

impl MilestoneScale {
    pub fn new(mut milestones: Vec<Milestone>, min: f64) -> Result<Self, GaugeError> {
        if milestones.is_empty() {
            return Err(GaugeError::NoMilestones);
        }
        milestones.sort_by(|a, b| a.value.total_cmp(&b.value));
        let max = milestones[milestones.len() - 1].value;
        if !(max > min) {
            return Err(GaugeError::EmptyRange { min, max });
        }
        let mut boundaries = Vec::with_capacity(milestones.len() + 1);
        boundaries.push(min);
        boundaries.extend(milestones.iter().map(|m| m.value));
        Ok(Self {
            milestones,
            boundaries,
            min,
        })
    }

    /// Build from tabular `(label, value)` rows. The first row is treated as
    /// a header and skipped when its second column does not parse as a
    /// number; every remaining row must parse.
    pub fn from_rows(rows: &[(String, String)], min: f64) -> Result<Self, GaugeError> {
        let rows = skip_header(rows, |(_, value)| value);
        let milestones = rows
            .iter()
            .map(|(label, value)| {
                let value = parse_cell(value)?;
                Ok(Milestone {
                    label: label.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>, GaugeError>>()?;
        Self::new(milestones, min)
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// `[min] + values`, ascending. One arc per adjacent pair.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn segment_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }
}

/// Arc fill colors cycle through the palette by index, wrapping rather than
/// erroring when there are more arcs than palette entries.
pub fn palette_color(palette: &[Color], index: usize) -> Color {
    palette[index % palette.len()]
}

/// A named, colored sub-range of the donut gauge, defined by its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub description: String,
    pub span: f64,
    pub color: Color,
}

/// Sections in caller order with prefix-summed boundaries starting at `min`.
/// Input order is visual order, so it is preserved as given.
#[derive(Debug, Clone)]
pub struct SectionScale {
    sections: Vec<Section>,
    boundaries: Vec<f64>,
    min: f64,
}

impl SectionScale {
    pub fn new(sections: Vec<Section>, min: f64) -> Result<Self, GaugeError> {
        if sections.is_empty() {
            return Err(GaugeError::NoSections);
        }
        let mut boundaries = Vec::with_capacity(sections.len() + 1);
        let mut cumulative = min;
        boundaries.push(cumulative);
        for section in &sections {
            if !(section.span > 0.0) {
                return Err(GaugeError::NonPositiveSpan(section.span));
            }
            cumulative += section.span;
            boundaries.push(cumulative);
        }
        Ok(Self {
            sections,
            boundaries,
            min,
        })
    }

    /// Build from tabular `(description, span, color)` rows, with the same
    /// header rule as milestones applied to the span column.
    pub fn from_rows(rows: &[(String, String, String)], min: f64) -> Result<Self, GaugeError> {
        let rows = skip_header(rows, |(_, span, _)| span);
        let sections = rows
            .iter()
            .map(|(description, span, color)| {
                Ok(Section {
                    description: description.clone(),
                    span: parse_cell(span)?,
                    color: Color::parse(color)?,
                })
            })
            .collect::<Result<Vec<_>, GaugeError>>()?;
        Self::new(sections, min)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// Sum of all spans above `min`.
    pub fn max(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Color of the first section whose `[start, end]` contains `value`,
    /// both ends inclusive. A value exactly on a shared boundary therefore
    /// resolves to the earlier section. Values outside every section fall
    /// back to the last section's color; callers are expected to clamp
    /// first, so the fallback is defensive rather than a guarantee.
    pub fn color_at(&self, value: f64) -> Color {
        for (i, section) in self.sections.iter().enumerate() {
            if self.boundaries[i] <= value && value <= self.boundaries[i + 1] {
                return section.color;
            }
        }
        debug!(value, "value outside every section, using last section color");
        self.sections[self.sections.len() - 1].color
    }
}

/// Drop the first row when the selected cell is non-numeric (a header).
fn skip_header<'a, T>(rows: &'a [T], cell: impl Fn(&T) -> &String) -> &'a [T] {
    match rows.first() {
        Some(first) if cell(first).trim().parse::<f64>().is_err() => &rows[1..],
        _ => rows,
    }
}

fn parse_cell(cell: &str) -> Result<f64, GaugeError> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| GaugeError::BadNumericCell {
            cell: cell.to_string(),
        })
}
