use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use models::service as entity;

/// Body of the admin insert route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: f64,
}

impl NewService {
    pub fn validate(&self) -> Result<(), ServiceError> {
        entity::validate_title(&self.title)?;
        entity::validate_description(&self.description)?;
        entity::validate_image(&self.image)?;
        entity::validate_price(self.price)?;
        Ok(())
    }
}

/// Body of the admin patch route; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicePatch {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.title.is_none() && self.price.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.is_empty() {
            return Err(ServiceError::Validation("no updatable fields supplied".into()));
        }
        if let Some(t) = &self.title { entity::validate_title(t)?; }
        if let Some(d) = &self.description { entity::validate_description(d)?; }
        if let Some(i) = &self.image { entity::validate_image(i)?; }
        if let Some(p) = self.price { entity::validate_price(p)?; }
        Ok(())
    }
}
