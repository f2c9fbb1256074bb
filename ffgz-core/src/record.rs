//! Stored records, the fields that create them, and partial updates.

use chrono::{DateTime, Utc};

use crate::coerce::FreqRange;

/// Surrogate key shared by all three tables.
pub type RecordId = i64;

/// An isolator type: a model name with load, damping and stiffness along
/// three axes.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct TypeItem {
    /// Row id.
    pub id: RecordId,
    /// Model name, never blank.
    pub model: String,
    /// Rated load.
    pub load: Option<f64>,
    /// Damping ratio.
    pub damp: Option<f64>,
    /// Stiffness along x.
    pub kx: Option<f64>,
    /// Stiffness along y.
    pub ky: Option<f64>,
    /// Stiffness along z.
    pub kz: Option<f64>,
    /// Server clock at insert.
    pub created_at: DateTime<Utc>,
}

impl TypeItem {
    /// Assemble a stored row.
    #[must_use]
    pub fn new(id: RecordId, fields: NewType, created_at: DateTime<Utc>) -> Self {
        let NewType { model, load, damp, kx, ky, kz } = fields;
        Self { id, model, load, damp, kx, ky, kz, created_at }
    }

    /// Apply a partial update in place. Absent fields are left as they are.
    pub fn apply(&mut self, patch: TypePatch) {
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(load) = patch.load {
            self.load = load;
        }
        if let Some(damp) = patch.damp {
            self.damp = damp;
        }
        if let Some(kx) = patch.kx {
            self.kx = kx;
        }
        if let Some(ky) = patch.ky {
            self.ky = ky;
        }
        if let Some(kz) = patch.kz {
            self.kz = kz;
        }
    }
}

/// Validated fields for a new [`TypeItem`].
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct NewType {
    pub model: String,
    pub load: Option<f64>,
    pub damp: Option<f64>,
    pub kx: Option<f64>,
    pub ky: Option<f64>,
    pub kz: Option<f64>,
}

impl NewType {
    /// A type with only its model name set.
    #[must_use]
    pub fn named(model: impl Into<String>) -> Self {
        Self { model: model.into(), ..Self::default() }
    }
}

/// A partial update for a [`TypeItem`].
///
/// The outer `Option` says whether the field was sent; the inner one is the
/// (possibly null) new value.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct TypePatch {
    pub model: Option<String>,
    pub load: Option<Option<f64>>,
    pub damp: Option<Option<f64>>,
    pub kx: Option<Option<f64>>,
    pub ky: Option<Option<f64>>,
    pub kz: Option<Option<f64>>,
}

/// A pairing of an upper and a lower model with the frequency band and
/// maximum excitation measured for it.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct DataItem {
    pub id: RecordId,
    pub upper_model: String,
    pub lower_model: String,
    pub freq: FreqRange,
    pub max_excit: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl DataItem {
    /// Assemble a stored row.
    #[must_use]
    pub fn new(id: RecordId, fields: NewData, created_at: DateTime<Utc>) -> Self {
        let NewData { upper_model, lower_model, freq, max_excit } = fields;
        Self { id, upper_model, lower_model, freq, max_excit, created_at }
    }

    /// Apply a partial update in place. Absent fields are left as they are.
    pub fn apply(&mut self, patch: DataPatch) {
        if let Some(upper) = patch.upper_model {
            self.upper_model = upper;
        }
        if let Some(lower) = patch.lower_model {
            self.lower_model = lower;
        }
        if let Some(freq) = patch.freq {
            self.freq = freq;
        }
        if let Some(max_excit) = patch.max_excit {
            self.max_excit = max_excit;
        }
    }

    /// `"{upper}/{lower}"`, as written to the audit log.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.upper_model, self.lower_model)
    }
}

/// Validated fields for a new [`DataItem`].
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct NewData {
    pub upper_model: String,
    pub lower_model: String,
    pub freq: FreqRange,
    pub max_excit: Option<f64>,
}

impl NewData {
    /// A data entry with only its model pair set.
    #[must_use]
    pub fn pair(upper: impl Into<String>, lower: impl Into<String>) -> Self {
        Self { upper_model: upper.into(), lower_model: lower.into(), ..Self::default() }
    }
}

/// A partial update for a [`DataItem`].
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct DataPatch {
    pub upper_model: Option<String>,
    pub lower_model: Option<String>,
    pub freq: Option<FreqRange>,
    pub max_excit: Option<Option<f64>>,
}

/// One audit log entry. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct LogItem {
    pub id: RecordId,
    pub ts: DateTime<Utc>,
    pub action: String,
}

impl LogItem {
    /// Assemble a stored entry.
    #[must_use]
    pub fn new(id: RecordId, ts: DateTime<Utc>, action: String) -> Self {
        Self { id, ts, action }
    }

    /// Timestamp at second precision, e.g. `2024-03-01T09:15:02`.
    #[must_use]
    pub fn ts_text(&self) -> String {
        self.ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
