use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// A review tied to a service and its author.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub service_id: Uuid,
    pub email: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| errors::ModelError::Validation("invalid email".into()))?;
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

pub fn validate_comment(c: &str) -> Result<(), errors::ModelError> {
    if c.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment required".into()));
    }
    Ok(())
}

pub fn validate_rating(r: f64) -> Result<(), errors::ModelError> {
    if !r.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&r) {
        return Err(errors::ModelError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Insert a rating; `created` is always stamped here.
pub async fn create(
    db: &DatabaseConnection,
    service_id: Uuid,
    email: &str,
    title: &str,
    comment: &str,
    rating: f64,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_title(title)?;
    validate_comment(comment)?;
    validate_rating(rating)?;

    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(service_id),
        email: Set(email.to_string()),
        title: Set(title.to_string()),
        comment: Set(comment.to_string()),
        rating: Set(rating),
        created: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn list_by_service(db: &DatabaseConnection, service_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::ServiceId.eq(service_id))
        .order_by_desc(Column::Created)
        .all(db)
        .await?)
}

pub async fn list_by_email(db: &DatabaseConnection, email: &str) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email.to_string()))
        .order_by_desc(Column::Created)
        .all(db)
        .await?)
}

/// Set the supplied columns on one row; returns the number of rows matched.
pub async fn update_fields(
    db: &DatabaseConnection,
    id: Uuid,
    title: Option<&str>,
    comment: Option<&str>,
    rating: Option<f64>,
) -> Result<u64, errors::ModelError> {
    if title.is_none() && comment.is_none() && rating.is_none() {
        return Err(errors::ModelError::Validation("no updatable fields supplied".into()));
    }
    let mut update = Entity::update_many().filter(Column::Id.eq(id));
    if let Some(t) = title {
        validate_title(t)?;
        update = update.col_expr(Column::Title, Expr::value(t.to_string()));
    }
    if let Some(c) = comment {
        validate_comment(c)?;
        update = update.col_expr(Column::Comment, Expr::value(c.to_string()));
    }
    if let Some(r) = rating {
        validate_rating(r)?;
        update = update.col_expr(Column::Rating, Expr::value(r));
    }
    let res = update.exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
