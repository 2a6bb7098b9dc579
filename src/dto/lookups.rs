use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::fields::filled,
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateManufacturerRequest {
    #[serde(rename = "ManufacturerName")]
    pub name: Option<String>,
}

impl CreateManufacturerRequest {
    pub fn validate(self) -> AppResult<String> {
        filled(self.name)
            .map(|name| name.trim().to_string())
            .ok_or_else(|| AppError::MissingFields("ManufacturerName is required.".into()))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[serde(rename = "CustomerName")]
    pub name: Option<String>,
}

impl CreateCustomerRequest {
    pub fn validate(self) -> AppResult<String> {
        filled(self.name)
            .map(|name| name.trim().to_string())
            .ok_or_else(|| AppError::MissingFields("CustomerName is required.".into()))
    }
}
