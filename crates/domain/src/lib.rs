// Rust guideline compliant 2026-10-19

//! Shared domain types for the meal-recommendation pipeline.
//!
//! Defines `FoodItem`, `UserState`, `FeatureVector`, the request/response
//! payloads, `ScoringError`, and the hexagonal port traits `Scaler` and
//! `Model`. All pipeline components depend on this crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of model input dimensions: 6 food nutrients, 6 targets, 6 current values.
pub const FEATURE_LEN: usize = 18;

/// Number of nutrient dimensions tracked per food and per user-state half.
pub const NUTRIENT_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Nutrients
// ---------------------------------------------------------------------------

/// The six nutrient dimensions, in model order.
///
/// Used both for catalog rows and for the target/current halves of a
/// [`UserState`]. Every field defaults to `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nutrients {
    /// Energy in kcal.
    pub energy: f64,
    /// Carbohydrate in g.
    pub carbohydrate: f64,
    /// Protein in g.
    pub protein: f64,
    /// Fat in g.
    pub fat: f64,
    /// Sugar in g.
    pub sugar: f64,
    /// Sodium in mg.
    pub sodium: f64,
}

impl Nutrients {
    /// Values in model order: energy, carbohydrate, protein, fat, sugar, sodium.
    #[must_use]
    pub fn to_array(self) -> [f64; NUTRIENT_LEN] {
        [self.energy, self.carbohydrate, self.protein, self.fat, self.sugar, self.sodium]
    }

    /// Inverse of [`to_array`](Self::to_array).
    #[must_use]
    pub fn from_array(values: [f64; NUTRIENT_LEN]) -> Self {
        let [energy, carbohydrate, protein, fat, sugar, sodium] = values;
        Self { energy, carbohydrate, protein, fat, sugar, sodium }
    }
}

/// One row of the immutable food catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    /// Display name; not guaranteed unique.
    pub name: String,
    /// Grouping label used by the diversity constraint.
    pub category: String,
    /// Resolved nutrients; unresolvable columns are `0.0`.
    pub nutrients: Nutrients,
}

// ---------------------------------------------------------------------------
// UserState
// ---------------------------------------------------------------------------

/// Request keys for the target half of the user state, in model order.
pub const TARGET_KEYS: [&str; NUTRIENT_LEN] =
    ["rec_cal", "rec_carb", "rec_pro", "rec_fat", "rec_sugar", "rec_na"];

/// Request keys for the already-consumed half of the user state, in model order.
pub const CURRENT_KEYS: [&str; NUTRIENT_LEN] =
    ["cur_cal", "cur_carb", "cur_pro", "cur_fat", "cur_sugar", "cur_na"];

/// Per-request nutritional state: daily targets and what was already eaten.
///
/// Deserializes from any JSON object. Keys are matched exactly against
/// [`TARGET_KEYS`] and [`CURRENT_KEYS`]; absent keys become `0.0` and unknown
/// keys are ignored. Present values must be numbers or numeric strings;
/// anything else reads as NaN, which the scaler rejects, so the request is
/// scored on the fallback path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct UserState {
    /// Recommended daily intake (`rec_*`).
    pub target: Nutrients,
    /// Intake consumed so far (`cur_*`).
    pub current: Nutrients,
}

impl UserState {
    /// Build a state from the recommended intake for `sex` and the intake so far.
    #[must_use]
    pub fn from_intake(sex: Sex, current: Nutrients) -> Self {
        Self { target: sex.recommended_intake(), current }
    }

    /// The 12 user-state values in model order: targets, then current values.
    #[must_use]
    pub fn to_array(self) -> [f64; 2 * NUTRIENT_LEN] {
        let mut out = [0.0; 2 * NUTRIENT_LEN];
        out[..NUTRIENT_LEN].copy_from_slice(&self.target.to_array());
        out[NUTRIENT_LEN..].copy_from_slice(&self.current.to_array());
        out
    }
}

impl From<HashMap<String, serde_json::Value>> for UserState {
    fn from(map: HashMap<String, serde_json::Value>) -> Self {
        let lookup = |keys: [&str; NUTRIENT_LEN]| {
            Nutrients::from_array(keys.map(|k| map.get(k).map_or(0.0, model_number)))
        };
        Self { target: lookup(TARGET_KEYS), current: lookup(CURRENT_KEYS) }
    }
}

/// Selects a row of the recommended daily intake table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Adult male reference intake.
    Male,
    /// Adult female reference intake.
    Female,
}

impl Sex {
    /// Reference daily intake used as the `rec_*` targets.
    #[must_use]
    pub fn recommended_intake(self) -> Nutrients {
        match self {
            Self::Male => Nutrients {
                energy: 2500.0,
                carbohydrate: 324.0,
                protein: 60.0,
                fat: 54.0,
                sugar: 50.0,
                sodium: 2000.0,
            },
            Self::Female => Nutrients {
                energy: 2000.0,
                carbohydrate: 270.0,
                protein: 50.0,
                fat: 45.0,
                sugar: 50.0,
                sodium: 2000.0,
            },
        }
    }
}

/// Read a loosely typed JSON value as a number.
///
/// Numbers are returned as-is, strings yield the first decimal number they
/// contain (`"350kcal"` -> `350.0`), everything else yields `0.0`.
#[must_use]
pub fn lenient_number(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => first_decimal(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Strict number for model input: JSON numbers and plain numeric strings,
/// NaN otherwise.
fn model_number(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// First `digits[.digits]` run in `s`, parsed as `f64`.
fn first_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    // A fraction only counts when at least one digit follows the dot.
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    s[start..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Feature vectors and scores
// ---------------------------------------------------------------------------

/// Fixed-order model input: food nutrients, target values, current values.
///
/// The order is the contract the external model was trained on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_LEN]);

impl FeatureVector {
    /// Concatenate a food row with the broadcast user state.
    #[must_use]
    pub fn new(food: &Nutrients, user: &UserState) -> Self {
        let mut values = [0.0; FEATURE_LEN];
        values[..NUTRIENT_LEN].copy_from_slice(&food.to_array());
        values[NUTRIENT_LEN..].copy_from_slice(&user.to_array());
        Self(values)
    }

    /// Borrow the raw values.
    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_LEN] {
        &self.0
    }
}

/// Which path produced the scores of one request. Never mixed within a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    /// Normalized output of the scaler + model.
    Model,
    /// Uniform fallback distribution after a scoring failure.
    Fallback,
}

/// A catalog row paired with its user-facing score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Row index into the catalog.
    pub index: usize,
    /// Normalized or fallback score.
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Inbound request. Both fields are optional and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendationRequest {
    /// Per-request nutritional state.
    #[serde(default)]
    pub user_state: UserState,
    /// Names the user has eaten recently; never recommended again.
    #[serde(default)]
    pub recent_food_names: Vec<String>,
}

/// Request keys of [`IntakeRequest::current_intake`], in model order.
pub const INTAKE_KEYS: [&str; NUTRIENT_LEN] = ["calories", "carbs", "protein", "fat", "sugar", "sodium"];

/// Inbound request phrased as "who I am and what I ate today".
///
/// Targets come from the reference intake of `sex`; intake values are read
/// with [`lenient_number`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    /// Selects the reference daily intake.
    #[serde(alias = "gender")]
    pub sex: Sex,
    /// Intake so far, keyed by [`INTAKE_KEYS`].
    pub current_intake: HashMap<String, serde_json::Value>,
    /// Recently eaten food names.
    #[serde(default)]
    pub food_list: Vec<String>,
}

impl From<IntakeRequest> for RecommendationRequest {
    fn from(req: IntakeRequest) -> Self {
        let current = Nutrients::from_array(
            INTAKE_KEYS.map(|k| req.current_intake.get(k).map_or(0.0, lenient_number)),
        );
        Self {
            user_state: UserState::from_intake(req.sex, current),
            recent_food_names: req.food_list,
        }
    }
}

/// One user-facing recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Menu display name.
    #[serde(rename = "recommend_menu")]
    pub menu: String,
    /// Energy of the item in kcal.
    pub calorie: f64,
    /// User-facing score.
    pub score: f64,
    /// Human-readable explanation embedding the score.
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Errors and ports
// ---------------------------------------------------------------------------

/// Errors from the `Scaler` and `Model` hexagonal ports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The normalization transform could not be applied.
    #[error("transform failed: {reason}")]
    TransformFailed {
        /// Human-readable description.
        reason: String,
    },
    /// The model could not produce predictions.
    #[error("prediction failed: {reason}")]
    PredictionFailed {
        /// Human-readable description.
        reason: String,
    },
    /// A port returned a different number of rows than it was given.
    #[error("shape mismatch: expected {expected} rows, got {actual}")]
    ShapeMismatch {
        /// Number of input rows.
        expected: usize,
        /// Number of rows returned.
        actual: usize,
    },
}

/// Hexagonal port: the normalization transform fitted alongside the model.
///
/// State is fixed at load time; `transform` must not mutate anything.
pub trait Scaler {
    /// Transform a batch of feature vectors, one output row per input row.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::TransformFailed` if the transform cannot be applied.
    fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScoringError>;
}

/// Hexagonal port: the opaque pre-trained predictive model.
///
/// The Scoring Adapter depends exclusively on this trait. Implementations must
/// be deterministic for identical input and identical loaded state.
pub trait Model {
    /// Predict one raw score per input row, in row order.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::PredictionFailed` if inference fails.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ScoringError>;

    /// Name of this model, used in logs (e.g. `"DEMO"`).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // UserState deserialization
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact integer-valued literals")]
    fn user_state_reads_known_keys_and_ignores_unknown() {
        let state: UserState = serde_json::from_str(
            r#"{"rec_cal": 2000, "cur_na": 830.5, "favourite_colour": "blue"}"#,
        )
        .unwrap();
        assert_eq!(state.target.energy, 2000.0);
        assert_eq!(state.current.sodium, 830.5);
        assert_eq!(state.target.sodium, 0.0);
        assert_eq!(state.current.energy, 0.0);
    }

    #[test]
    fn user_state_missing_keys_default_to_zero() {
        let state: UserState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, UserState::default());
        assert_eq!(state.to_array(), [0.0; 12]);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact literals")]
    fn user_state_accepts_plain_numeric_strings() {
        let state: UserState =
            serde_json::from_str(r#"{"cur_cal": " 350 ", "cur_pro": "12.5"}"#).unwrap();
        assert_eq!(state.current.energy, 350.0);
        assert_eq!(state.current.protein, 12.5);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact literal")]
    fn user_state_non_numeric_values_read_as_nan() {
        let state: UserState = serde_json::from_str(
            r#"{"rec_cal": "abc", "cur_pro": "12.5 g", "cur_fat": null, "cur_na": [1]}"#,
        )
        .unwrap();
        assert!(state.target.energy.is_nan());
        assert!(state.current.protein.is_nan());
        assert!(state.current.fat.is_nan());
        assert!(state.current.sodium.is_nan());
        assert_eq!(state.current.energy, 0.0);
    }

    #[test]
    fn user_state_array_order_is_targets_then_current() {
        let state = UserState {
            target: Nutrients::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            current: Nutrients::from_array([7.0, 8.0, 9.0, 10.0, 11.0, 12.0]),
        };
        assert_eq!(
            state.to_array(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
        );
    }

    // ------------------------------------------------------------------
    // Recommended intake
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact integer-valued literals")]
    fn from_intake_uses_reference_targets() {
        let current = Nutrients { energy: 600.0, ..Nutrients::default() };
        let male = UserState::from_intake(Sex::Male, current);
        let female = UserState::from_intake(Sex::Female, current);
        assert_eq!(male.target.energy, 2500.0);
        assert_eq!(male.target.carbohydrate, 324.0);
        assert_eq!(female.target.energy, 2000.0);
        assert_eq!(female.target.fat, 45.0);
        assert_eq!(male.current, current);
    }

    #[test]
    fn sex_deserializes_lowercase() {
        let sex: Sex = serde_json::from_str(r#""female""#).unwrap();
        assert_eq!(sex, Sex::Female);
    }

    // ------------------------------------------------------------------
    // lenient_number
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact literals")]
    fn lenient_number_cases() {
        use serde_json::json;
        assert_eq!(lenient_number(&json!(42)), 42.0);
        assert_eq!(lenient_number(&json!(0.25)), 0.25);
        assert_eq!(lenient_number(&json!("about 7.75 grams")), 7.75);
        assert_eq!(lenient_number(&json!("12.")), 12.0);
        assert_eq!(lenient_number(&json!("none")), 0.0);
        assert_eq!(lenient_number(&json!(null)), 0.0);
        assert_eq!(lenient_number(&json!(true)), 0.0);
        assert_eq!(lenient_number(&json!([1, 2])), 0.0);
    }

    // ------------------------------------------------------------------
    // FeatureVector
    // ------------------------------------------------------------------

    #[test]
    fn feature_vector_concatenates_in_model_order() {
        let food = Nutrients::from_array([100.0, 20.0, 5.0, 3.0, 1.0, 400.0]);
        let user = UserState {
            target: Nutrients::from_array([2000.0, 270.0, 50.0, 45.0, 50.0, 2000.0]),
            current: Nutrients::from_array([500.0, 60.0, 10.0, 12.0, 8.0, 700.0]),
        };
        let fv = FeatureVector::new(&food, &user);
        assert_eq!(fv.values().len(), FEATURE_LEN);
        assert_eq!(&fv.values()[..6], &food.to_array());
        assert_eq!(&fv.values()[6..12], &user.target.to_array());
        assert_eq!(&fv.values()[12..], &user.current.to_array());
    }

    // ------------------------------------------------------------------
    // Payloads
    // ------------------------------------------------------------------

    #[test]
    fn request_fields_are_optional() {
        let req: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, RecommendationRequest::default());
    }

    #[test]
    fn request_reads_recent_names() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"recent_food_names": ["Kimchi stew"], "extra": 1}"#).unwrap();
        assert_eq!(req.recent_food_names, vec!["Kimchi stew".to_owned()]);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact integer-valued literals")]
    fn intake_request_converts_to_user_state() {
        let req: IntakeRequest = serde_json::from_str(
            r#"{"gender": "male", "currentIntake": {"calories": "1,200kcal", "sodium": 900}, "foodList": ["Ramen"]}"#,
        )
        .unwrap();
        let req = RecommendationRequest::from(req);
        assert_eq!(req.user_state.target.energy, 2500.0);
        // Only the leading digit run is read, as for any lenient value.
        assert_eq!(req.user_state.current.energy, 1.0);
        assert_eq!(req.user_state.current.sodium, 900.0);
        assert_eq!(req.user_state.current.protein, 0.0);
        assert_eq!(req.recent_food_names, vec!["Ramen".to_owned()]);
    }

    #[test]
    fn intake_request_requires_sex() {
        let res: Result<IntakeRequest, _> = serde_json::from_str(r#"{"currentIntake": {}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn result_serializes_wire_field_names() {
        let r = RecommendationResult {
            menu: "Bibimbap".to_owned(),
            calorie: 560.0,
            score: 97.25,
            reason: "AI nutrition score 97.2!".to_owned(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["recommend_menu"], "Bibimbap");
        assert_eq!(v["calorie"], 560.0);
        assert_eq!(v["score"], 97.25);
        assert_eq!(v["reason"], "AI nutrition score 97.2!");
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    #[test]
    fn scoring_error_variants() {
        let e1 = ScoringError::TransformFailed { reason: "nan".to_owned() };
        let e2 = ScoringError::PredictionFailed { reason: "oops".to_owned() };
        let e3 = ScoringError::ShapeMismatch { expected: 3, actual: 2 };
        assert_eq!(e1.to_string(), "transform failed: nan");
        assert_eq!(e2.to_string(), "prediction failed: oops");
        assert_eq!(e3.to_string(), "shape mismatch: expected 3 rows, got 2");
    }

    /// Verify that minimal port implementations compile and satisfy all methods.
    #[test]
    fn port_traits_compile_with_minimal_impl() {
        struct Identity;

        impl Scaler for Identity {
            fn transform(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>, ScoringError> {
                Ok(rows.to_vec())
            }
        }

        impl Model for Identity {
            fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
                Ok(rows.iter().map(|r| r.values()[0]).collect())
            }

            fn name(&self) -> &'static str {
                "identity"
            }
        }

        let rows = vec![FeatureVector([1.0; FEATURE_LEN])];
        let scaled = Identity.transform(&rows).unwrap();
        assert_eq!(scaled, rows);
        assert_eq!(Identity.predict(&scaled).unwrap(), vec![1.0]);
        assert_eq!(Identity.name(), "identity");
    }
}
