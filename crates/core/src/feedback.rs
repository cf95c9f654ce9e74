//! Feedback score bounds and validation.

use crate::error::CoreError;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;
pub const RECOMMEND_MIN: i32 = 0;
pub const RECOMMEND_MAX: i32 = 10;

/// Validate an optional satisfaction rating (1-5).
pub fn validate_rating(rating: Option<i32>) -> Result<(), CoreError> {
    validate_bounded("rating", rating, RATING_MIN, RATING_MAX)
}

/// Validate an optional likelihood-to-recommend score (0-10).
pub fn validate_recommend_score(score: Option<i32>) -> Result<(), CoreError> {
    validate_bounded("recommend_score", score, RECOMMEND_MIN, RECOMMEND_MAX)
}

/// Open-ended answers must be a JSON object keyed by question. `null` or a
/// missing value is stored as `{}`.
pub fn normalize_open_ended(value: Option<serde_json::Value>) -> Result<serde_json::Value, CoreError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(serde_json::json!({})),
        Some(v @ serde_json::Value::Object(_)) => Ok(v),
        Some(_) => Err(CoreError::Validation(
            "open_ended must be a JSON object".into(),
        )),
    }
}

fn validate_bounded(field: &str, value: Option<i32>, min: i32, max: i32) -> Result<(), CoreError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_in_range_pass() {
        for r in RATING_MIN..=RATING_MAX {
            assert!(validate_rating(Some(r)).is_ok());
        }
        assert!(validate_rating(None).is_ok());
    }

    #[test]
    fn ratings_out_of_range_fail() {
        assert!(validate_rating(Some(0)).is_err());
        let err = validate_rating(Some(6)).unwrap_err();
        assert!(err.to_string().contains("rating must be between 1 and 5"));
    }

    #[test]
    fn recommend_score_bounds() {
        assert!(validate_recommend_score(Some(0)).is_ok());
        assert!(validate_recommend_score(Some(10)).is_ok());
        assert!(validate_recommend_score(Some(11)).is_err());
        assert!(validate_recommend_score(Some(-1)).is_err());
    }

    #[test]
    fn open_ended_defaults_to_empty_object() {
        assert_eq!(normalize_open_ended(None).unwrap(), serde_json::json!({}));
        assert_eq!(
            normalize_open_ended(Some(serde_json::Value::Null)).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn open_ended_rejects_non_objects() {
        assert!(normalize_open_ended(Some(serde_json::json!("great event"))).is_err());
        let answers = serde_json::json!({ "generalFeedback": "More snacks" });
        assert_eq!(normalize_open_ended(Some(answers.clone())).unwrap(), answers);
    }
}
