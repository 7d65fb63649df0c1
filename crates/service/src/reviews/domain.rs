use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::ids::parse_id;
use models::rating as entity;

/// Body of the add-review route. `created` is not accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewRating {
    /// Kept as a string so a malformed reference is reported as a bad id.
    pub service_id: String,
    pub email: String,
    pub title: String,
    pub comment: String,
    pub rating: f64,
}

/// Validated form of [`NewRating`].
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDraft {
    pub service_id: Uuid,
    pub email: String,
    pub title: String,
    pub comment: String,
    pub rating: f64,
}

impl NewRating {
    pub fn into_draft(self) -> Result<RatingDraft, ServiceError> {
        let service_id = parse_id(&self.service_id)?;
        entity::validate_email(&self.email)?;
        entity::validate_title(&self.title)?;
        entity::validate_comment(&self.comment)?;
        entity::validate_rating(self.rating)?;
        Ok(RatingDraft {
            service_id,
            email: self.email,
            title: self.title,
            comment: self.comment,
            rating: self.rating,
        })
    }
}

/// Body of the review patch route; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl RatingPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.comment.is_none() && self.rating.is_none()
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.is_empty() {
            return Err(ServiceError::Validation("no updatable fields supplied".into()));
        }
        if let Some(t) = &self.title { entity::validate_title(t)?; }
        if let Some(c) = &self.comment { entity::validate_comment(c)?; }
        if let Some(r) = self.rating { entity::validate_rating(r)?; }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_supplied_created_is_rejected() {
        let res = serde_json::from_value::<NewRating>(json!({
            "service_id": Uuid::new_v4(), "email": "a@x.com", "title": "t",
            "comment": "c", "rating": 4, "created": "2001-01-01T00:00:00Z"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn malformed_service_reference_is_invalid_id() {
        let input = NewRating {
            service_id: "123".into(),
            email: "a@x.com".into(),
            title: "t".into(),
            comment: "c".into(),
            rating: 4.0,
        };
        assert!(matches!(input.into_draft(), Err(ServiceError::InvalidId(_))));
    }

    #[test]
    fn out_of_range_rating_is_validation_error() {
        let input = NewRating {
            service_id: Uuid::new_v4().to_string(),
            email: "a@x.com".into(),
            title: "t".into(),
            comment: "c".into(),
            rating: 7.0,
        };
        assert!(matches!(input.into_draft(), Err(ServiceError::Validation(_))));
    }
}
