//! Placeholder response curve served by the preview endpoint.
//!
//! The curve does not model anything yet. It fixes the wire shape that a
//! real frequency-response computation will fill in later.

use serde::Serialize;

/// Default lower bound of the preview band.
pub const DEFAULT_MIN: i64 = 10;
/// Default upper bound of the preview band.
pub const DEFAULT_MAX: i64 = 315;

/// Frequencies and their response values, aligned by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewCurve {
    pub freqs: Vec<i64>,
    pub response: Vec<f64>,
}

impl PreviewCurve {
    /// Number of points in the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    /// `true` when the band is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}

/// Number of points `preview(min, max)` would produce.
#[must_use]
pub fn point_count(min: i64, max: i64) -> u64 {
    if max < min {
        0
    } else {
        max.abs_diff(min).saturating_add(1)
    }
}

/// `60 + 10 * |sin(i / 50)|` at position `i`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn response_at(position: usize) -> f64 {
    60.0 + 10.0 * (position as f64 / 50.0).sin().abs()
}

/// Build the curve for `min..=max`. The response is driven by each point's
/// position in the band, not by its frequency. An inverted band is empty.
#[must_use]
pub fn preview(min: i64, max: i64) -> PreviewCurve {
    let freqs: Vec<i64> = if max < min { Vec::new() } else { (min..=max).collect() };
    let response = (0..freqs.len()).map(response_at).collect();
    PreviewCurve { freqs, response }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_band_starts_at_baseline() {
        let curve = preview(10, 10);
        assert_eq!(curve.freqs, vec![10]);
        assert_eq!(curve.response.len(), 1);
        assert!((curve.response[0] - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_band_is_aligned() {
        let curve = preview(DEFAULT_MIN, DEFAULT_MAX);
        assert_eq!(curve.len(), 306);
        assert_eq!(curve.response.len(), curve.freqs.len());
        assert_eq!(curve.freqs.first(), Some(&10));
        assert_eq!(curve.freqs.last(), Some(&315));
    }

    #[test]
    fn response_uses_position_not_frequency() {
        let curve = preview(100, 101);
        let expected = 60.0 + 10.0 * (1.0_f64 / 50.0).sin().abs();
        assert!((curve.response[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn inverted_band_is_empty() {
        let curve = preview(20, 10);
        assert!(curve.is_empty());
        assert!(curve.response.is_empty());
        assert_eq!(point_count(20, 10), 0);
    }

    #[test]
    fn point_count_spans_full_i64_range_without_overflow() {
        assert_eq!(point_count(i64::MIN, i64::MAX), u64::MAX);
        assert_eq!(point_count(-5, 5), 11);
    }

    proptest::proptest! {
        #[test]
        fn proptest_response_stays_within_band(position in 0_usize..1_000_000) {
            let value = response_at(position);
            proptest::prop_assert!((60.0..=70.0).contains(&value));
        }
    }
}
