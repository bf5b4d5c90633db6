//! The missing-data policy shared by every parsing and aggregation stage.
//!
//! Three rules, applied uniformly:
//!
//! 1. A charge, bond-order, overlap-charge, or bond-length value that is exactly
//!    zero marks an unused measurement slot and is excluded from statistics.
//! 2. A blank or whitespace-only field carries no measurements.
//! 3. The sentinel `"- 0"` means "no data". In the nearest-neighbor field it
//!    specifically marks a single-atom species, which is not the same thing as
//!    a parsed neighbor count of zero.

/// Sentinel written by the structure toolkit when a molecule has no bonds/neighbors.
pub const SENTINEL: &str = "- 0";

/// Text written for a statistic that could not be computed.
pub const DEFAULT_MISSING_MARKER: &str = "NaN";

/// Whether `value` counts as a real measurement.
#[inline]
pub fn is_measured(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

/// Filters an optional slot through [`is_measured`].
#[inline]
pub fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| is_measured(*v))
}

pub fn is_blank_field(field: &str) -> bool {
    field.trim().is_empty()
}

/// Matches `"- 0"` with any internal or surrounding whitespace (`"-\t0"` included).
pub fn is_sentinel_field(field: &str) -> bool {
    let mut tokens = field.split_whitespace();
    matches!(
        (tokens.next(), tokens.next(), tokens.next()),
        (Some("-"), Some("0"), None)
    )
}

/// A field with nothing to parse, either blank or the sentinel.
pub fn is_empty_field(field: &str) -> bool {
    is_blank_field(field) || is_sentinel_field(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_zero_is_not_a_measurement() {
        assert!(!is_measured(0.0));
        assert!(!is_measured(-0.0));
        assert!(is_measured(1e-12));
        assert!(is_measured(-0.4));
    }

    #[test]
    fn non_finite_values_are_not_measurements() {
        assert!(!is_measured(f64::NAN));
        assert!(!is_measured(f64::INFINITY));
    }

    #[test]
    fn measured_filters_optional_slots() {
        assert_eq!(measured(Some(0.0)), None);
        assert_eq!(measured(None), None);
        assert_eq!(measured(Some(1.2)), Some(1.2));
    }

    #[test]
    fn sentinel_detection_tolerates_whitespace() {
        assert!(is_sentinel_field("- 0"));
        assert!(is_sentinel_field("  -\t0 "));
        assert!(!is_sentinel_field("C(1) 0"));
        assert!(!is_sentinel_field("- 0 C(1) 4"));
        assert!(!is_sentinel_field(""));
    }

    #[test]
    fn blank_and_sentinel_fields_are_empty() {
        assert!(is_empty_field(""));
        assert!(is_empty_field("   \t"));
        assert!(is_empty_field("- 0"));
        assert!(!is_empty_field("0 C : 0.1"));
    }
}
