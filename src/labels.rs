//! Milestone label emphasis and text.
//!
//! One milestone may be "current": the one whose label equals the
//! externally supplied selection after trimming and case-folding. Matched
//! milestones get the larger font and the highlight colors.

use crate::config::{Color, NeedleStyle};
use crate::format::milestone_label;

/// Case-insensitive, whitespace-insensitive label equality.
pub fn is_matched(label: &str, current_selection: &str) -> bool {
    label.trim().to_lowercase() == current_selection.trim().to_lowercase()
}

/// Visual treatment of one milestone label and its pointer tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelEmphasis {
    pub font_size: f32,
    pub color: Color,
    pub pointer_color: Color,
}

/// Pick the matched or normal variant for a milestone label.
pub fn resolve_emphasis(label: &str, current_selection: &str, style: &NeedleStyle) -> LabelEmphasis {
    if is_matched(label, current_selection) {
        LabelEmphasis {
            font_size: style.label_font_size_matched,
            color: style.matched_label_color,
            pointer_color: style.pointer_color_matched,
        }
    } else {
        LabelEmphasis {
            font_size: style.label_font_size_normal,
            color: style.normal_label_color,
            pointer_color: style.pointer_color_normal,
        }
    }
}

/// Two-line display text: the label over its own formatted value.
pub fn milestone_text(label: &str, value: f64) -> String {
    format!("{label}\n{}", milestone_label(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignores_case_and_whitespace() {
        assert!(is_matched("  Gold ", "gold"));
        assert!(is_matched("silver", "SILVER"));
        assert!(!is_matched("Gold", "Silver"));
        assert!(!is_matched("Gold", ""));
    }

    #[test]
    fn matched_milestones_get_the_highlight_variant() {
        let style = NeedleStyle::builder().build();
        let matched = resolve_emphasis("Gold", " gold ", &style);
        assert_eq!(matched.font_size, style.label_font_size_matched);
        assert_eq!(matched.color, style.matched_label_color);
        assert_eq!(matched.pointer_color, style.pointer_color_matched);

        let normal = resolve_emphasis("Bronze", "gold", &style);
        assert_eq!(normal.font_size, style.label_font_size_normal);
        assert_eq!(normal.color, style.normal_label_color);
        assert_eq!(normal.pointer_color, style.pointer_color_normal);
    }

    #[test]
    fn text_stacks_label_over_value() {
        assert_eq!(milestone_text("Silver", 30.0), "Silver\n30");
        assert_eq!(milestone_text("Half", 0.5), "Half\n0,5");
    }
}
