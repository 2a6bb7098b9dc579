use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
    sea_query::Expr,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::inventory::{InventoryChanges, NewInventoryItem},
    entity::{
        Inventory, Products,
        inventory::{ActiveModel, Column},
        products,
    },
    error::{AppError, AppResult},
    models::InventoryItem,
    response::ApiResponse,
    services::{contains_ci, search_term},
    state::AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("Inventory item not found.".into())
}

/// Inventory batches joined with their product name, soonest expiry first.
pub async fn list_inventory(
    state: &AppState,
    q: Option<&str>,
) -> AppResult<ApiResponse<Vec<InventoryItem>>> {
    let mut finder = Inventory::find().find_also_related(Products);

    if let Some(term) = search_term(q) {
        finder = finder.filter(
            Condition::any()
                .add(contains_ci(products::Column::ProductName, term))
                .add(contains_ci(Column::BatchNumber, term))
                .add(contains_ci(Column::Location, term)),
        );
    }

    let items: Vec<InventoryItem> = finder
        .order_by_asc(Column::ExpiryDate)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(item, product)| InventoryItem::from_entity(item, product))
        .collect();

    let message = if items.is_empty() {
        "No inventory items found."
    } else {
        "Inventory retrieved successfully."
    };
    Ok(ApiResponse::success(message, items))
}

pub async fn get_inventory_item(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<InventoryItem>> {
    let (item, product) = Inventory::find_by_id(id)
        .find_also_related(Products)
        .one(&state.orm)
        .await?
        .ok_or_else(not_found)?;
    Ok(ApiResponse::success(
        "Inventory item retrieved successfully.",
        InventoryItem::from_entity(item, product),
    ))
}

pub async fn create_inventory_item(
    state: &AppState,
    payload: NewInventoryItem,
) -> AppResult<ApiResponse<InventoryItem>> {
    let product = find_product(state, payload.product_id).await?;

    let active = ActiveModel {
        id: NotSet,
        product_id: Set(payload.product_id),
        batch_number: Set(payload.batch_number),
        expiry_date: Set(payload.expiry_date),
        quantity_in_stock: Set(payload.quantity_in_stock),
        location: Set(payload.location),
        cost_price: Set(payload.cost_price),
        selling_price: Set(payload.selling_price),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let item = active.insert(&state.orm).await?;
    tracing::info!(inventory_id = item.id, product_id = item.product_id, "inventory item created");

    Ok(ApiResponse::success(
        "Inventory item created successfully.",
        InventoryItem::from_entity(item, Some(product)),
    ))
}

pub async fn update_inventory_item(
    state: &AppState,
    id: i32,
    changes: InventoryChanges,
) -> AppResult<ApiResponse<InventoryItem>> {
    let existing = Inventory::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(not_found)?;

    let product = find_product(state, changes.product_id.unwrap_or(existing.product_id)).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(value) = changes.product_id {
        active.product_id = Set(value);
    }
    if let Some(value) = changes.batch_number {
        active.batch_number = Set(value);
    }
    if let Some(value) = changes.expiry_date {
        active.expiry_date = Set(value);
    }
    if let Some(value) = changes.quantity_in_stock {
        active.quantity_in_stock = Set(value);
    }
    if let Some(value) = changes.location {
        active.location = Set(value);
    }
    if let Some(value) = changes.cost_price {
        active.cost_price = Set(value);
    }
    if let Some(value) = changes.selling_price {
        active.selling_price = Set(value);
    }

    let item = active.update(&state.orm).await?;
    tracing::info!(inventory_id = id, "inventory item updated");

    Ok(ApiResponse::success(
        "Inventory item updated successfully.",
        InventoryItem::from_entity(item, Some(product)),
    ))
}

pub async fn delete_inventory_item(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let result = Inventory::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    tracing::info!(inventory_id = id, "inventory item deleted");
    Ok(ApiResponse::ok("Inventory item deleted successfully."))
}

/// Number of batches and total units on hand.
pub async fn inventory_totals(state: &AppState) -> AppResult<(u64, i64)> {
    let count = Inventory::find().count(&state.orm).await?;
    let units: Option<i64> = Inventory::find()
        .select_only()
        .column_as(Expr::col(Column::QuantityInStock).sum(), "units")
        .into_tuple::<Option<i64>>()
        .one(&state.orm)
        .await?
        .flatten();
    Ok((count, units.unwrap_or(0)))
}

async fn find_product(state: &AppState, id: i32) -> AppResult<products::Model> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Product {id} does not exist.")))
}
