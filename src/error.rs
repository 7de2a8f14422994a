use thiserror::Error;

/// Failures that abort a render. All of these indicate a caller or
/// integration bug rather than bad data; out-of-range values and unknown
/// format modes are handled silently instead of surfacing here.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("gauge range is empty or inverted: min {min}, max {max}")]
    EmptyRange { min: f64, max: f64 },

    #[error("milestone list is empty")]
    NoMilestones,

    #[error("section list is empty")]
    NoSections,

    #[error("section span must be positive, got {0}")]
    NonPositiveSpan(f64),

    #[error("segment palette is empty")]
    EmptyPalette,

    #[error("could not parse numeric cell {cell:?}")]
    BadNumericCell { cell: String },

    #[error("could not parse color {0:?}")]
    BadColor(String),

    #[error("unknown angle convention {0:?}")]
    UnknownConvention(String),

    #[error("could not parse font data")]
    BadFont,
}
