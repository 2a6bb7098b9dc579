//! Wire representations returned to clients. Field names follow the dashboard's
//! column naming (`ProductID`, `ATC_Code`, `user_id`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{customers, inventory, manufacturers, products, sales, users};

#[derive(Debug, Serialize, ToSchema)]
pub struct User {
    pub user_id: String,
    pub user_department: String,
    pub user_type: String,
    pub user_status: i32,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.user_id,
            user_department: model.department,
            user_type: model.user_type,
            user_status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Manufacturer {
    #[serde(rename = "ManufacturerID")]
    pub id: i32,
    #[serde(rename = "ManufacturerName")]
    pub name: String,
}

impl From<manufacturers::Model> for Manufacturer {
    fn from(model: manufacturers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub id: i32,
    #[serde(rename = "CustomerName")]
    pub name: String,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub id: i32,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "GenericName")]
    pub generic_name: String,
    #[serde(rename = "Strength")]
    pub strength: String,
    #[serde(rename = "PharmaceuticalForm")]
    pub pharmaceutical_form: String,
    #[serde(rename = "RouteOfAdministration")]
    pub route_of_administration: String,
    #[serde(rename = "ManufacturerID")]
    pub manufacturer_id: i32,
    #[serde(rename = "ManufacturerName")]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "ATC_Code")]
    pub atc_code: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "PrescriptionRequired")]
    pub prescription_required: bool,
    #[serde(rename = "DrugIdentificationNumber")]
    pub drug_identification_number: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_entity(model: products::Model, manufacturer: Option<manufacturers::Model>) -> Self {
        Self {
            id: model.id,
            product_name: model.product_name,
            generic_name: model.generic_name,
            strength: model.strength,
            pharmaceutical_form: model.pharmaceutical_form,
            route_of_administration: model.route_of_administration,
            manufacturer_id: model.manufacturer_id,
            manufacturer_name: manufacturer.map(|m| m.name),
            atc_code: model.atc_code,
            description: model.description,
            prescription_required: model.prescription_required,
            drug_identification_number: model.drug_identification_number,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryItem {
    #[serde(rename = "InventoryID")]
    pub id: i32,
    #[serde(rename = "ProductID")]
    pub product_id: i32,
    #[serde(rename = "ProductName")]
    pub product_name: Option<String>,
    #[serde(rename = "BatchNumber")]
    pub batch_number: String,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "QuantityInStock")]
    pub quantity_in_stock: i32,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "CostPrice")]
    pub cost_price: f64,
    #[serde(rename = "SellingPrice")]
    pub selling_price: f64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn from_entity(model: inventory::Model, product: Option<products::Model>) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            product_name: product.map(|p| p.product_name),
            batch_number: model.batch_number,
            expiry_date: model.expiry_date,
            quantity_in_stock: model.quantity_in_stock,
            location: model.location,
            cost_price: model.cost_price,
            selling_price: model.selling_price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Sale {
    #[serde(rename = "SaleID")]
    pub id: i32,
    #[serde(rename = "SaleDate")]
    pub sale_date: NaiveDate,
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<i32>,
    #[serde(rename = "CustomerName")]
    pub customer_name: Option<String>,
    #[serde(rename = "TotalAmount")]
    pub total_amount: f64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn from_entity(model: sales::Model, customer: Option<customers::Model>) -> Self {
        Self {
            id: model.id,
            sale_date: model.sale_date,
            customer_id: model.customer_id,
            customer_name: customer.map(|c| c.name),
            total_amount: model.total_amount,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
