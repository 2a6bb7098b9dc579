use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::fields::{filled, nonzero, opt_bool, opt_i32, replacement},
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(rename = "ProductName")]
    pub product_name: Option<String>,
    #[serde(rename = "GenericName")]
    pub generic_name: Option<String>,
    #[serde(rename = "Strength")]
    pub strength: Option<String>,
    #[serde(rename = "PharmaceuticalForm")]
    pub pharmaceutical_form: Option<String>,
    #[serde(rename = "RouteOfAdministration")]
    pub route_of_administration: Option<String>,
    #[serde(rename = "ManufacturerID", default, deserialize_with = "opt_i32")]
    pub manufacturer_id: Option<i32>,
    #[serde(rename = "ATC_Code")]
    pub atc_code: Option<String>,
    /// May be an empty string, but must be present.
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "PrescriptionRequired", default, deserialize_with = "opt_bool")]
    pub prescription_required: Option<bool>,
    #[serde(rename = "DrugIdentificationNumber")]
    pub drug_identification_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub generic_name: String,
    pub strength: String,
    pub pharmaceutical_form: String,
    pub route_of_administration: String,
    pub manufacturer_id: i32,
    pub atc_code: String,
    pub description: String,
    pub prescription_required: bool,
    pub drug_identification_number: String,
}

impl CreateProductRequest {
    pub fn validate(self) -> AppResult<NewProduct> {
        let missing =
            || AppError::MissingFields("Missing required fields for product creation.".into());
        Ok(NewProduct {
            product_name: filled(self.product_name).ok_or_else(missing)?,
            generic_name: filled(self.generic_name).ok_or_else(missing)?,
            strength: filled(self.strength).ok_or_else(missing)?,
            pharmaceutical_form: filled(self.pharmaceutical_form).ok_or_else(missing)?,
            route_of_administration: filled(self.route_of_administration).ok_or_else(missing)?,
            manufacturer_id: nonzero(self.manufacturer_id).ok_or_else(missing)?,
            atc_code: filled(self.atc_code).ok_or_else(missing)?,
            description: self.description.ok_or_else(missing)?,
            prescription_required: self.prescription_required.ok_or_else(missing)?,
            drug_identification_number: filled(self.drug_identification_number)
                .ok_or_else(missing)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(rename = "ProductName")]
    pub product_name: Option<String>,
    #[serde(rename = "GenericName")]
    pub generic_name: Option<String>,
    #[serde(rename = "Strength")]
    pub strength: Option<String>,
    #[serde(rename = "PharmaceuticalForm")]
    pub pharmaceutical_form: Option<String>,
    #[serde(rename = "RouteOfAdministration")]
    pub route_of_administration: Option<String>,
    #[serde(rename = "ManufacturerID", default, deserialize_with = "opt_i32")]
    pub manufacturer_id: Option<i32>,
    #[serde(rename = "ATC_Code")]
    pub atc_code: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "PrescriptionRequired", default, deserialize_with = "opt_bool")]
    pub prescription_required: Option<bool>,
    #[serde(rename = "DrugIdentificationNumber")]
    pub drug_identification_number: Option<String>,
}

/// Fields to overwrite on an existing product; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub product_name: Option<String>,
    pub generic_name: Option<String>,
    pub strength: Option<String>,
    pub pharmaceutical_form: Option<String>,
    pub route_of_administration: Option<String>,
    pub manufacturer_id: Option<i32>,
    pub atc_code: Option<String>,
    pub description: Option<String>,
    pub prescription_required: Option<bool>,
    pub drug_identification_number: Option<String>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.generic_name.is_none()
            && self.strength.is_none()
            && self.pharmaceutical_form.is_none()
            && self.route_of_administration.is_none()
            && self.manufacturer_id.is_none()
            && self.atc_code.is_none()
            && self.description.is_none()
            && self.prescription_required.is_none()
            && self.drug_identification_number.is_none()
    }

    pub fn validate(self) -> AppResult<ProductChanges> {
        if self.is_empty() {
            return Err(AppError::MissingFields("No product fields supplied for update.".into()));
        }
        if self.manufacturer_id == Some(0) {
            return Err(AppError::BadRequest("ManufacturerID cannot be empty.".into()));
        }
        Ok(ProductChanges {
            product_name: replacement("ProductName", self.product_name)?,
            generic_name: replacement("GenericName", self.generic_name)?,
            strength: replacement("Strength", self.strength)?,
            pharmaceutical_form: replacement("PharmaceuticalForm", self.pharmaceutical_form)?,
            route_of_administration: replacement(
                "RouteOfAdministration",
                self.route_of_administration,
            )?,
            manufacturer_id: self.manufacturer_id,
            atc_code: replacement("ATC_Code", self.atc_code)?,
            description: self.description,
            prescription_required: self.prescription_required,
            drug_identification_number: replacement(
                "DrugIdentificationNumber",
                self.drug_identification_number,
            )?,
        })
    }
}
