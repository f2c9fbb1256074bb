//! Lenient text-to-number coercion used by every write path.
//!
//! Nothing in this module returns an error: input that cannot be read as a
//! number is stored as null.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric field as it arrives in a request body: either a JSON number or
/// free text typed into a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A JSON number.
    Number(f64),
    /// A JSON string that may or may not hold a number.
    Text(String),
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Convert a request value to a float, or `None` when it holds no number.
///
/// `None`, `""` and the literal text `"null"` map to `None`, as does any text
/// that does not parse and any non-finite value.
#[must_use]
pub fn coerce_float(value: Option<&Scalar>) -> Option<f64> {
    let parsed = match value? {
        Scalar::Number(n) => *n,
        Scalar::Text(text) => parse_float_text(text)?,
    };
    parsed.is_finite().then_some(parsed)
}

fn parse_float_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// A frequency band stored as two integer bounds.
///
/// Both bounds are set or neither is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FreqRange {
    bounds: Option<(i64, i64)>,
}

impl FreqRange {
    /// A band with both bounds set.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { bounds: Some((min, max)) }
    }

    /// A band with neither bound set.
    #[must_use]
    pub const fn unset() -> Self {
        Self { bounds: None }
    }

    /// Rebuild a band from its two stored columns. A half-set pair is read
    /// as unset.
    #[must_use]
    pub fn from_columns(min: Option<i64>, max: Option<i64>) -> Self {
        match (min, max) {
            (Some(min), Some(max)) => Self::new(min, max),
            _ => Self::unset(),
        }
    }

    /// Lower bound, if set.
    #[must_use]
    pub fn min(self) -> Option<i64> {
        self.bounds.map(|(min, _)| min)
    }

    /// Upper bound, if set.
    #[must_use]
    pub fn max(self) -> Option<i64> {
        self.bounds.map(|(_, max)| max)
    }

    /// Both bounds, if set.
    #[must_use]
    pub fn bounds(self) -> Option<(i64, i64)> {
        self.bounds
    }
}

/// Renders `"{min}-{max}"`, or nothing when unset.
impl fmt::Display for FreqRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            Some((min, max)) => write!(f, "{min}-{max}"),
            None => Ok(()),
        }
    }
}

/// Parse a `"min-max"` band.
///
/// En-dash and em-dash are accepted in place of the hyphen. Each side is
/// read as a float and rounded half-to-even. Anything other than exactly two
/// numeric parts, or a bound that does not fit in an `i64`, gives an unset
/// band.
#[must_use]
pub fn parse_range(text: Option<&str>) -> FreqRange {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return FreqRange::unset();
    };
    let cleaned = text.replace(['\u{2013}', '\u{2014}'], "-");
    let mut parts = cleaned.split('-');
    let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
        return FreqRange::unset();
    };
    match (round_bound(left), round_bound(right)) {
        (Some(min), Some(max)) => FreqRange::new(min, max),
        _ => FreqRange::unset(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn round_bound(part: &str) -> Option<i64> {
    let value = part.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    // i64::MAX is not exactly representable; its f64 neighbour is 2^63.
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}

/// Format two stored columns as `"{min}-{max}"`, or empty text if either is
/// null.
#[must_use]
pub fn format_range(min: Option<i64>, max: Option<i64>) -> String {
    FreqRange::from_columns(min, max).to_string()
}
