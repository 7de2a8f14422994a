//! Display-text formatting for gauge readouts.
//!
//! Two formatters live here and stay separate on purpose. [`format_value`]
//! is the configurable multi-mode formatter behind the donut gauge's center
//! readout; [`milestone_label`] is the much simpler whole-number-or-comma
//! rule used for milestone value labels on the needle gauge. They share no
//! behavior beyond both producing strings.

use tracing::debug;

/// Closed set of readout format modes. Unrecognized tags silently fall back
/// to [`FormatMode::Decimal1`]; a bad mode is a data-quality issue, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Integer,
    Decimal1,
    Decimal2,
    Percent0,
    Percent1,
    Percent2,
    Abbreviated,
    Thousands,
    Millions,
    CurrencyUsd,
    CurrencyEuro,
    CurrencyMad,
}

impl FormatMode {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "integer" => Self::Integer,
            "decimal1" => Self::Decimal1,
            "decimal2" => Self::Decimal2,
            "percent0" => Self::Percent0,
            "percent1" => Self::Percent1,
            "percent2" => Self::Percent2,
            "abbreviated" => Self::Abbreviated,
            "thousands" => Self::Thousands,
            "millions" => Self::Millions,
            "currency_usd" => Self::CurrencyUsd,
            "currency_euro" => Self::CurrencyEuro,
            "currency_mad" => Self::CurrencyMad,
            other => {
                debug!(tag = other, "unknown format mode, falling back to decimal1");
                Self::Decimal1
            }
        }
    }
}

/// Decimal and thousands separator pair. The `"dot"` tag selects the
/// dot/comma convention; every other tag selects comma/space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub decimal: &'static str,
    pub thousands: &'static str,
}

impl Separators {
    pub const DOT: Self = Self {
        decimal: ".",
        thousands: ",",
    };

    pub const COMMA: Self = Self {
        decimal: ",",
        thousands: " ",
    };

    pub fn from_tag(tag: &str) -> Self {
        if tag == "dot" {
            Self::DOT
        } else {
            Self::COMMA
        }
    }
}

/// Insert the thousands separator into a plain integer string. An optional
/// leading minus sign is preserved.
fn group_thousands(digits: &str, sep: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 1);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

/// Rewrite a fixed-point string (dot decimal point) with the selected
/// separators: thousands grouping on the integer part, locale decimal point.
fn apply_separators(fixed: &str, seps: Separators) -> String {
    match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!(
            "{}{}{}",
            group_thousands(int_part, seps.thousands),
            seps.decimal,
            frac_part
        ),
        None => group_thousands(fixed, seps.thousands),
    }
}

/// Render a number under the selected mode and separator convention.
pub fn format_value(num: f64, mode: FormatMode, seps: Separators) -> String {
    match mode {
        FormatMode::Integer => group_thousands(&format!("{num:.0}"), seps.thousands),
        FormatMode::Decimal1 => apply_separators(&format!("{num:.1}"), seps),
        FormatMode::Decimal2 => apply_separators(&format!("{num:.2}"), seps),
        // percent0 has no fractional part, so there is nothing to substitute.
        FormatMode::Percent0 => format!("{num:.0}%"),
        FormatMode::Percent1 => format!("{num:.1}%").replace('.', seps.decimal),
        FormatMode::Percent2 => format!("{num:.2}%").replace('.', seps.decimal),
        FormatMode::Abbreviated => {
            if num.abs() >= 1_000_000_000.0 {
                format!("{:.1}B", num / 1_000_000_000.0).replace('.', seps.decimal)
            } else if num.abs() >= 1_000_000.0 {
                format!("{:.1}M", num / 1_000_000.0).replace('.', seps.decimal)
            } else if num.abs() >= 1_000.0 {
                format!("{:.1}K", num / 1_000.0).replace('.', seps.decimal)
            } else {
                apply_separators(&format!("{num:.1}"), seps)
            }
        }
        // Forced-suffix variants: always scale, whatever the magnitude.
        FormatMode::Thousands => format!("{:.1}K", num / 1_000.0).replace('.', seps.decimal),
        FormatMode::Millions => format!("{:.1}M", num / 1_000_000.0).replace('.', seps.decimal),
        FormatMode::CurrencyUsd => {
            let formatted = apply_separators(&format!("{num:.0}"), seps);
            if seps.decimal == "." {
                format!("${formatted}")
            } else {
                format!("{formatted} $")
            }
        }
        FormatMode::CurrencyEuro => {
            let formatted = apply_separators(&format!("{num:.0}"), seps);
            if seps.decimal == "." {
                format!("\u{20ac}{formatted}")
            } else {
                format!("{formatted} \u{20ac}")
            }
        }
        FormatMode::CurrencyMad => {
            format!("{} DH", apply_separators(&format!("{num:.0}"), seps))
        }
    }
}

/// Milestone value labels: whole numbers print bare, anything else keeps its
/// natural decimal expansion with a comma decimal point.
pub fn milestone_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string().replace('.', ",")
    }
}
