//! Descriptive statistics over plain `f64` slices.
//!
//! Every function returns `None` for an empty slice; the sample variance and
//! standard deviation (ddof = 1) also need at least two values. Quantiles use
//! linear interpolation between the two closest ranks, `q = x[k] + (x[k+1] - x[k]) * f`
//! with `h = (n - 1) * p`, `k = floor(h)`, `f = h - k`.
//!
//! Callers filter values through [`crate::core::missing`] first; nothing here
//! treats zero specially.

/// Summary of one column, in the shape of a `describe()` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Computes a [`Summary`], or `None` if `data` is empty.
pub fn describe(data: &[f64]) -> Option<Summary> {
    let sorted = sorted(data)?;
    Some(Summary {
        count: data.len(),
        mean: mean(data)?,
        std: sample_std(data),
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

pub fn sum(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum())
}

pub fn mean(data: &[f64]) -> Option<f64> {
    sum(data).map(|total| total / data.len() as f64)
}

pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// Sample variance (ddof = 1).
pub fn sample_variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mean = mean(data)?;
    let m2: f64 = data.iter().map(|x| (x - mean) * (x - mean)).sum();
    Some(m2 / (data.len() as f64 - 1.0))
}

pub fn sample_std(data: &[f64]) -> Option<f64> {
    sample_variance(data).map(f64::sqrt)
}

pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// `max - min`.
pub fn range(data: &[f64]) -> Option<f64> {
    Some(max(data)? - min(data)?)
}

/// The `p`-th quantile (`0.0 ..= 1.0`, clamped) with linear interpolation.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    sorted(data).map(|sorted| quantile_sorted(&sorted, p))
}

/// Interquartile range, Q3 - Q1.
pub fn iqr(data: &[f64]) -> Option<f64> {
    let sorted = sorted(data)?;
    Some(quantile_sorted(&sorted, 0.75) - quantile_sorted(&sorted, 0.25))
}

fn sorted(data: &[f64]) -> Option<Vec<f64>> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted)
}

// Expects a non-empty, ascending slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOL
    }

    #[test]
    fn empty_input_yields_none_everywhere() {
        let empty: [f64; 0] = [];
        assert_eq!(sum(&empty), None);
        assert_eq!(mean(&empty), None);
        assert_eq!(median(&empty), None);
        assert_eq!(sample_variance(&empty), None);
        assert_eq!(sample_std(&empty), None);
        assert_eq!(min(&empty), None);
        assert_eq!(max(&empty), None);
        assert_eq!(range(&empty), None);
        assert_eq!(quantile(&empty, 0.5), None);
        assert_eq!(iqr(&empty), None);
        assert_eq!(describe(&empty), None);
    }

    #[test]
    fn sample_statistics_need_two_values() {
        assert_eq!(sample_variance(&[2.0]), None);
        assert_eq!(sample_std(&[2.0]), None);
        assert_eq!(mean(&[2.0]), Some(2.0));
    }

    #[test]
    fn variance_uses_n_minus_one() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sum of squared deviations is 32.
        assert!(close(sample_variance(&data).unwrap(), 32.0 / 7.0));
        assert!(close(sample_std(&data).unwrap(), (32.0_f64 / 7.0).sqrt()));
    }

    #[test]
    fn quartiles_of_one_to_four_interpolate_linearly() {
        let data = [4.0, 1.0, 3.0, 2.0];
        assert!(close(quantile(&data, 0.25).unwrap(), 1.75));
        assert!(close(quantile(&data, 0.75).unwrap(), 3.25));
        assert!(close(iqr(&data).unwrap(), 1.5));
        assert!(close(median(&data).unwrap(), 2.5));
    }

    #[test]
    fn quantile_endpoints_are_min_and_max() {
        let data = [3.0, -1.0, 8.5];
        assert_eq!(quantile(&data, 0.0), Some(-1.0));
        assert_eq!(quantile(&data, 1.0), Some(8.5));
        assert_eq!(median(&data), Some(3.0));
    }

    #[test]
    fn single_value_has_zero_iqr_and_range() {
        assert_eq!(iqr(&[1.4]), Some(0.0));
        assert_eq!(range(&[1.4]), Some(0.0));
    }

    #[test]
    fn describe_reports_all_fields() {
        let summary = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert!(close(summary.mean, 2.5));
        assert!(close(summary.std.unwrap(), (5.0_f64 / 3.0).sqrt()));
        assert_eq!(summary.min, 1.0);
        assert!(close(summary.q1, 1.75));
        assert!(close(summary.median, 2.5));
        assert!(close(summary.q3, 3.25));
        assert_eq!(summary.max, 4.0);
    }
}
