use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::fields::{ensure_not_negative, filled, opt_f64, opt_i32, parse_date},
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    /// `YYYY-MM-DD`.
    #[serde(rename = "SaleDate")]
    pub sale_date: Option<String>,
    /// Omitted, null or empty for walk-in customers.
    #[serde(rename = "CustomerID", default, deserialize_with = "opt_i32")]
    pub customer_id: Option<i32>,
    #[serde(rename = "TotalAmount", default, deserialize_with = "opt_f64")]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewSale {
    pub sale_date: NaiveDate,
    pub customer_id: Option<i32>,
    pub total_amount: f64,
}

impl CreateSaleRequest {
    pub fn validate(self) -> AppResult<NewSale> {
        let missing =
            || AppError::MissingFields("Missing required fields for sale creation.".into());
        let sale_date = filled(self.sale_date).ok_or_else(missing)?;
        Ok(NewSale {
            sale_date: parse_date("SaleDate", &sale_date)?,
            customer_id: self.customer_id.filter(|id| *id != 0),
            total_amount: ensure_not_negative(
                "TotalAmount",
                self.total_amount.ok_or_else(missing)?,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walk_in_sale_has_no_customer() {
        let req: CreateSaleRequest = serde_json::from_value(json!({
            "SaleDate": "2026-10-18",
            "CustomerID": "",
            "TotalAmount": "19.99"
        }))
        .unwrap();
        let sale = req.validate().unwrap();
        assert_eq!(sale.customer_id, None);
        assert_eq!(sale.total_amount, 19.99);
    }

    #[test]
    fn total_is_required() {
        let req: CreateSaleRequest =
            serde_json::from_value(json!({"SaleDate": "2026-10-18"})).unwrap();
        assert!(matches!(req.validate(), Err(AppError::MissingFields(_))));
    }
}
