use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::fields::{
        ensure_not_negative, filled, nonzero, opt_f64, opt_i32, parse_date, replacement,
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateInventoryRequest {
    #[serde(rename = "ProductID", default, deserialize_with = "opt_i32")]
    pub product_id: Option<i32>,
    #[serde(rename = "BatchNumber")]
    pub batch_number: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: Option<String>,
    #[serde(rename = "QuantityInStock", default, deserialize_with = "opt_i32")]
    pub quantity_in_stock: Option<i32>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "CostPrice", default, deserialize_with = "opt_f64")]
    pub cost_price: Option<f64>,
    #[serde(rename = "SellingPrice", default, deserialize_with = "opt_f64")]
    pub selling_price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub product_id: i32,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub quantity_in_stock: i32,
    pub location: Option<String>,
    pub cost_price: f64,
    pub selling_price: f64,
}

fn ensure_quantity(quantity: i32) -> AppResult<i32> {
    if quantity < 0 {
        return Err(AppError::BadRequest("QuantityInStock cannot be negative.".into()));
    }
    Ok(quantity)
}

impl CreateInventoryRequest {
    pub fn validate(self) -> AppResult<NewInventoryItem> {
        let missing =
            || AppError::MissingFields("Missing required fields for inventory creation.".into());
        let expiry = filled(self.expiry_date).ok_or_else(missing)?;
        Ok(NewInventoryItem {
            product_id: nonzero(self.product_id).ok_or_else(missing)?,
            batch_number: filled(self.batch_number).ok_or_else(missing)?,
            expiry_date: parse_date("ExpiryDate", &expiry)?,
            quantity_in_stock: ensure_quantity(self.quantity_in_stock.ok_or_else(missing)?)?,
            location: filled(self.location),
            cost_price: ensure_not_negative("CostPrice", self.cost_price.ok_or_else(missing)?)?,
            selling_price: ensure_not_negative(
                "SellingPrice",
                self.selling_price.ok_or_else(missing)?,
            )?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateInventoryRequest {
    #[serde(rename = "ProductID", default, deserialize_with = "opt_i32")]
    pub product_id: Option<i32>,
    #[serde(rename = "BatchNumber")]
    pub batch_number: Option<String>,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: Option<String>,
    #[serde(rename = "QuantityInStock", default, deserialize_with = "opt_i32")]
    pub quantity_in_stock: Option<i32>,
    /// An empty string clears the location.
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "CostPrice", default, deserialize_with = "opt_f64")]
    pub cost_price: Option<f64>,
    #[serde(rename = "SellingPrice", default, deserialize_with = "opt_f64")]
    pub selling_price: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub product_id: Option<i32>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub quantity_in_stock: Option<i32>,
    pub location: Option<Option<String>>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
}

impl UpdateInventoryRequest {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.batch_number.is_none()
            && self.expiry_date.is_none()
            && self.quantity_in_stock.is_none()
            && self.location.is_none()
            && self.cost_price.is_none()
            && self.selling_price.is_none()
    }

    pub fn validate(self) -> AppResult<InventoryChanges> {
        if self.is_empty() {
            return Err(AppError::MissingFields(
                "No inventory fields supplied for update.".into(),
            ));
        }
        if self.product_id == Some(0) {
            return Err(AppError::BadRequest("ProductID cannot be empty.".into()));
        }
        let expiry_date = match replacement("ExpiryDate", self.expiry_date)? {
            Some(raw) => Some(parse_date("ExpiryDate", &raw)?),
            None => None,
        };
        Ok(InventoryChanges {
            product_id: self.product_id,
            batch_number: replacement("BatchNumber", self.batch_number)?,
            expiry_date,
            quantity_in_stock: self.quantity_in_stock.map(ensure_quantity).transpose()?,
            location: self.location.map(|l| filled(Some(l))),
            cost_price: self
                .cost_price
                .map(|p| ensure_not_negative("CostPrice", p))
                .transpose()?,
            selling_price: self
                .selling_price
                .map(|p| ensure_not_negative("SellingPrice", p))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_parses_form_values() {
        let req: CreateInventoryRequest = serde_json::from_value(json!({
            "ProductID": "2",
            "BatchNumber": "B-1001",
            "ExpiryDate": "2027-03-31",
            "QuantityInStock": "120",
            "Location": "",
            "CostPrice": "1.20",
            "SellingPrice": 2.5
        }))
        .unwrap();
        let item = req.validate().unwrap();
        assert_eq!(item.product_id, 2);
        assert_eq!(item.quantity_in_stock, 120);
        assert_eq!(item.location, None);
        assert_eq!(item.expiry_date, NaiveDate::from_ymd_opt(2027, 3, 31).unwrap());
    }

    #[test]
    fn create_rejects_negative_stock() {
        let req = CreateInventoryRequest {
            product_id: Some(1),
            batch_number: Some("B".into()),
            expiry_date: Some("2027-01-01".into()),
            quantity_in_stock: Some(-1),
            location: None,
            cost_price: Some(1.0),
            selling_price: Some(2.0),
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn create_requires_expiry() {
        let req = CreateInventoryRequest {
            product_id: Some(1),
            batch_number: Some("B".into()),
            quantity_in_stock: Some(1),
            cost_price: Some(1.0),
            selling_price: Some(2.0),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(AppError::MissingFields(_))));
    }

    #[test]
    fn update_clears_location_with_empty_string() {
        let req: UpdateInventoryRequest = serde_json::from_value(json!({"Location": ""})).unwrap();
        let changes = req.validate().unwrap();
        assert_eq!(changes.location, Some(None));
    }
}
