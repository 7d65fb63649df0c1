use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// A listed offering. The id is exposed as `_id` on the wire.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    if t.chars().count() > 256 {
        return Err(errors::ModelError::Validation("title too long (<=256)".into()));
    }
    Ok(())
}

pub fn validate_description(d: &str) -> Result<(), errors::ModelError> {
    if d.trim().is_empty() {
        return Err(errors::ModelError::Validation("description required".into()));
    }
    Ok(())
}

pub fn validate_image(u: &str) -> Result<(), errors::ModelError> {
    if !(u.starts_with("http://") || u.starts_with("https://")) {
        return Err(errors::ModelError::Validation("image must be an http(s) url".into()));
    }
    Ok(())
}

pub fn validate_price(p: f64) -> Result<(), errors::ModelError> {
    if !p.is_finite() || p < 0.0 {
        return Err(errors::ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
    image: &str,
    price: f64,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    validate_description(description)?;
    validate_image(image)?;
    validate_price(price)?;

    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        image: Set(image.to_string()),
        price: Set(price),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Oldest first; `limit` caps the result when given.
pub async fn list(db: &DatabaseConnection, limit: Option<u64>) -> Result<Vec<Model>, errors::ModelError> {
    let mut query = Entity::find().order_by_asc(Column::CreatedAt);
    if let Some(n) = limit {
        query = query.limit(n);
    }
    Ok(query.all(db).await?)
}

/// Set the supplied columns on one row; returns the number of rows matched.
pub async fn update_fields(
    db: &DatabaseConnection,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    image: Option<&str>,
    price: Option<f64>,
) -> Result<u64, errors::ModelError> {
    if title.is_none() && description.is_none() && image.is_none() && price.is_none() {
        return Err(errors::ModelError::Validation("no updatable fields supplied".into()));
    }
    let mut update = Entity::update_many().filter(Column::Id.eq(id));
    if let Some(t) = title {
        validate_title(t)?;
        update = update.col_expr(Column::Title, Expr::value(t.to_string()));
    }
    if let Some(d) = description {
        validate_description(d)?;
        update = update.col_expr(Column::Description, Expr::value(d.to_string()));
    }
    if let Some(i) = image {
        validate_image(i)?;
        update = update.col_expr(Column::Image, Expr::value(i.to_string()));
    }
    if let Some(p) = price {
        validate_price(p)?;
        update = update.col_expr(Column::Price, Expr::value(p));
    }
    let res = update.exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
