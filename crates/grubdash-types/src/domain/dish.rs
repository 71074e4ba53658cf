use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::fields::{conflicting_id, non_empty_text, positive_integer};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

/// Dish fields exactly as a client sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishInput {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub image_url: Option<Value>,
}

/// Validated, writable dish fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishFields {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishField {
    Name,
    Description,
    Price,
    ImageUrl,
}

impl fmt::Display for DishField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DishField::Name => "name",
            DishField::Description => "description",
            DishField::Price => "price",
            DishField::ImageUrl => "image_url",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DishError {
    #[error("Dish must include a name")]
    MissingName,
    #[error("Dish must include a description")]
    MissingDescription,
    #[error("Dish must have a price that is an integer greater than 0")]
    InvalidPrice,
    #[error("Dish must include an image_url")]
    MissingImageUrl,
    #[error("Dish id does not match route id. Dish: {body}, Route: {route}")]
    IdMismatch { body: String, route: String },
    #[error("Invalid {0} provided for updating the dish")]
    InvalidUpdate(DishField),
}

impl From<DishField> for DishError {
    fn from(field: DishField) -> Self {
        match field {
            DishField::Name => DishError::MissingName,
            DishField::Description => DishError::MissingDescription,
            DishField::Price => DishError::InvalidPrice,
            DishField::ImageUrl => DishError::MissingImageUrl,
        }
    }
}

impl DishInput {
    /// Checks a create payload. The body `id`, if any, is ignored.
    pub fn validate_new(self) -> Result<DishFields, DishError> {
        Ok(self.fields()?)
    }

    /// Checks an update payload against the dish it targets.
    pub fn validate_update(mut self, route_id: &str) -> Result<DishFields, DishError> {
        if let Some(body) = conflicting_id(self.id.take(), route_id) {
            return Err(DishError::IdMismatch {
                body,
                route: route_id.to_owned(),
            });
        }
        self.fields().map_err(DishError::InvalidUpdate)
    }

    // Order matters: the first failing field is the one reported.
    fn fields(self) -> Result<DishFields, DishField> {
        let name = non_empty_text(self.name).ok_or(DishField::Name)?;
        let description = non_empty_text(self.description).ok_or(DishField::Description)?;
        let price = positive_integer(self.price).ok_or(DishField::Price)?;
        let image_url = non_empty_text(self.image_url).ok_or(DishField::ImageUrl)?;
        Ok(DishFields {
            name,
            description,
            price,
            image_url,
        })
    }
}

impl Dish {
    pub fn new(id: String, fields: DishFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image_url: fields.image_url,
        }
    }

    /// Validates `input` and overwrites every writable field. The id never changes.
    pub fn apply_update(&mut self, input: DishInput) -> Result<(), DishError> {
        let fields = input.validate_update(&self.id)?;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.image_url = fields.image_url;
        Ok(())
    }
}
