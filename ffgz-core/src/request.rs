//! Request body shapes accepted by the HTTP API.
//!
//! Bodies reject unknown keys. Update bodies keep "field absent" apart from
//! "field sent as null" so that a partial update only touches what was sent.

use serde::{Deserialize, Deserializer};

use crate::{
    coerce::{coerce_float, parse_range, Scalar},
    error::CoreError,
    record::{DataPatch, NewData, NewType, RecordId, TypePatch},
};

/// Marks a field as present even when its value is `null`.
///
/// Paired with `#[serde(default)]`, an absent key stays `None` while a sent
/// key becomes `Some(value)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trimmed, non-empty text or `None`.
fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

fn required(field: &'static str, text: Option<String>) -> Result<String, CoreError> {
    non_blank(text).ok_or(CoreError::MissingField { field })
}

/// Body of `POST /api/types`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTypeBody {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub load: Option<Scalar>,
    #[serde(default)]
    pub damp: Option<Scalar>,
    #[serde(default)]
    pub kx: Option<Scalar>,
    #[serde(default)]
    pub ky: Option<Scalar>,
    #[serde(default)]
    pub kz: Option<Scalar>,
}

impl CreateTypeBody {
    /// Check the required model name and coerce the numeric fields.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if `model` is absent or blank.
    pub fn validate(self) -> Result<NewType, CoreError> {
        Ok(NewType {
            model: required("model", self.model)?,
            load: coerce_float(self.load.as_ref()),
            damp: coerce_float(self.damp.as_ref()),
            kx: coerce_float(self.kx.as_ref()),
            ky: coerce_float(self.ky.as_ref()),
            kz: coerce_float(self.kz.as_ref()),
        })
    }
}

/// Body of `PUT /api/types/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTypeBody {
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub load: Option<Option<Scalar>>,
    #[serde(default, deserialize_with = "present")]
    pub damp: Option<Option<Scalar>>,
    #[serde(default, deserialize_with = "present")]
    pub kx: Option<Option<Scalar>>,
    #[serde(default, deserialize_with = "present")]
    pub ky: Option<Option<Scalar>>,
    #[serde(default, deserialize_with = "present")]
    pub kz: Option<Option<Scalar>>,
}

impl UpdateTypeBody {
    /// Turn the sent fields into a patch. A blank model is ignored.
    #[must_use]
    pub fn into_patch(self) -> TypePatch {
        let coerce = |field: Option<Option<Scalar>>| field.map(|v| coerce_float(v.as_ref()));
        TypePatch {
            model: non_blank(self.model.flatten()),
            load: coerce(self.load),
            damp: coerce(self.damp),
            kx: coerce(self.kx),
            ky: coerce(self.ky),
            kz: coerce(self.kz),
        }
    }
}

/// Body of `POST /api/data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDataBody {
    #[serde(default)]
    pub upper_model: Option<String>,
    #[serde(default)]
    pub lower_model: Option<String>,
    #[serde(default)]
    pub freq_range: Option<String>,
    #[serde(default)]
    pub max_excit: Option<Scalar>,
}

impl CreateDataBody {
    /// Check both model names, parse the band and coerce `max_excit`.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] if either model name is absent or
    /// blank.
    pub fn validate(self) -> Result<NewData, CoreError> {
        Ok(NewData {
            upper_model: required("upper_model", self.upper_model)?,
            lower_model: required("lower_model", self.lower_model)?,
            freq: parse_range(self.freq_range.as_deref()),
            max_excit: coerce_float(self.max_excit.as_ref()),
        })
    }
}

/// Body of `PUT /api/data/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDataBody {
    #[serde(default, deserialize_with = "present")]
    pub upper_model: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub lower_model: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub freq_range: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub max_excit: Option<Option<Scalar>>,
}

impl UpdateDataBody {
    /// Turn the sent fields into a patch. Blank model names are ignored; a
    /// sent `freq_range` always rewrites both bounds.
    #[must_use]
    pub fn into_patch(self) -> DataPatch {
        DataPatch {
            upper_model: non_blank(self.upper_model.flatten()),
            lower_model: non_blank(self.lower_model.flatten()),
            freq: self.freq_range.map(|text| parse_range(text.as_deref())),
            max_excit: self.max_excit.map(|v| coerce_float(v.as_ref())),
        }
    }
}

/// Body of both bulk-delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkDeleteBody {
    #[serde(default)]
    pub ids: Vec<RecordId>,
}

/// Body of `POST /api/logs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppendLogBody {
    #[serde(default)]
    pub action: Option<String>,
}

impl AppendLogBody {
    /// The action text; a missing or null key gives empty text.
    #[must_use]
    pub fn into_action(self) -> String {
        self.action.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::FreqRange;

    fn parse<'a, T: Deserialize<'a>>(json: &'a str) -> T {
        match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => panic!("failed to parse {json}: {e}"),
        }
    }

    #[test]
    fn create_type_requires_non_blank_model() {
        let body: CreateTypeBody = parse(r#"{"load": "1"}"#);
        assert_eq!(body.validate(), Err(CoreError::MissingField { field: "model" }));

        let body: CreateTypeBody = parse(r#"{"model": "   "}"#);
        assert_eq!(body.validate(), Err(CoreError::MissingField { field: "model" }));
    }

    #[test]
    fn create_type_trims_model_and_coerces_numbers() {
        let body: CreateTypeBody =
            parse(r#"{"model": " GZ-1 ", "load": "120", "damp": "", "kx": 3.5, "ky": null, "kz": "x"}"#);
        let new = match body.validate() {
            Ok(n) => n,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(new.model, "GZ-1");
        assert_eq!(new.load, Some(120.0));
        assert_eq!(new.damp, None);
        assert_eq!(new.kx, Some(3.5));
        assert_eq!(new.ky, None);
        assert_eq!(new.kz, None);
    }

    #[test]
    fn create_type_rejects_unknown_keys() {
        let result = serde_json::from_str::<CreateTypeBody>(r#"{"model": "A", "colour": "red"}"#);
        assert!(result.is_err(), "unknown keys must be rejected");
    }

    #[test]
    fn update_type_distinguishes_absent_from_null() {
        let body: UpdateTypeBody = parse(r#"{"load": null, "kx": "7"}"#);
        let patch = body.into_patch();
        assert_eq!(patch.load, Some(None), "explicit null clears the field");
        assert_eq!(patch.kx, Some(Some(7.0)));
        assert_eq!(patch.damp, None, "absent field is untouched");
        assert_eq!(patch.model, None);
    }

    #[test]
    fn update_type_ignores_blank_model() {
        let body: UpdateTypeBody = parse(r#"{"model": ""}"#);
        assert_eq!(body.into_patch().model, None);
        let body: UpdateTypeBody = parse(r#"{"model": null}"#);
        assert_eq!(body.into_patch().model, None);
    }

    #[test]
    fn create_data_requires_both_models() {
        let body: CreateDataBody = parse(r#"{"upper_model": "U"}"#);
        assert_eq!(body.validate(), Err(CoreError::MissingField { field: "lower_model" }));
    }

    #[test]
    fn create_data_parses_band() {
        let body: CreateDataBody =
            parse(r#"{"upper_model": "U", "lower_model": "L", "freq_range": "5–80", "max_excit": "0.3"}"#);
        let new = match body.validate() {
            Ok(n) => n,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(new.freq, FreqRange::new(5, 80));
        assert_eq!(new.max_excit, Some(0.3));
    }

    #[test]
    fn update_data_null_band_clears_both_bounds() {
        let body: UpdateDataBody = parse(r#"{"freq_range": null}"#);
        assert_eq!(body.into_patch().freq, Some(FreqRange::unset()));
        let body: UpdateDataBody = parse("{}");
        assert_eq!(body.into_patch().freq, None);
    }

    #[test]
    fn bulk_delete_defaults_to_empty_ids() {
        let body: BulkDeleteBody = parse("{}");
        assert!(body.ids.is_empty());
    }

    #[test]
    fn append_log_missing_action_is_empty_text() {
        let body: AppendLogBody = parse("{}");
        assert_eq!(body.into_action(), "");
        let body: AppendLogBody = parse(r#"{"action": "exported table"}"#);
        assert_eq!(body.into_action(), "exported table");
    }
}
