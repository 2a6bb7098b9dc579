use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        inventory::{CreateInventoryRequest, UpdateInventoryRequest},
        lookups::{CreateCustomerRequest, CreateManufacturerRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        sales::CreateSaleRequest,
        summary::{CountSummary, InventorySummary, SalesTotal},
    },
    models::{Customer, InventoryItem, Manufacturer, Product, Sale, User},
    routes::{auth, dispatch, health, inventory, lookups, products, sales, summary},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        dispatch::dispatch,
        auth::register,
        auth::login,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        inventory::list_inventory,
        inventory::get_inventory_item,
        inventory::create_inventory_item,
        inventory::update_inventory_item,
        inventory::delete_inventory_item,
        sales::list_sales,
        sales::get_sale,
        sales::create_sale,
        sales::delete_sale,
        lookups::list_manufacturers,
        lookups::create_manufacturer,
        lookups::list_customers,
        lookups::create_customer,
        summary::products_count,
        summary::inventory_count,
        summary::sales_today
    ),
    components(
        schemas(
            User,
            Product,
            InventoryItem,
            Sale,
            Manufacturer,
            Customer,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            CreateInventoryRequest,
            UpdateInventoryRequest,
            CreateSaleRequest,
            CreateManufacturerRequest,
            CreateCustomerRequest,
            CountSummary,
            InventorySummary,
            SalesTotal
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Dispatch", description = "Action-keyed single endpoint"),
        (name = "Auth", description = "User accounts"),
        (name = "Products", description = "Product catalogue"),
        (name = "Inventory", description = "Stock batches"),
        (name = "Sales", description = "Recorded sales"),
        (name = "Lookups", description = "Manufacturers and customers"),
        (name = "Summary", description = "Dashboard counters"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_documents_a_json_body() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");
        let post = &doc["paths"]["/api/dispatch"]["post"];
        assert!(post["requestBody"]["content"]["application/json"].is_object(), "{post}");
        let params: Vec<_> = post["parameters"]
            .as_array()
            .expect("parameters")
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(params, ["action", "id"]);
    }
}
