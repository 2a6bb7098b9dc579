use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::products::{NewProduct, ProductChanges},
    entity::{
        Inventory, Manufacturers, Products, inventory, manufacturers,
        products::{self, ActiveModel, Column},
    },
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    services::{contains_ci, search_term},
    state::AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("Product not found.".into())
}

/// All products with their manufacturer name, optionally filtered by a search term
/// over product name, generic name and manufacturer name.
pub async fn list_products(
    state: &AppState,
    q: Option<&str>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let mut finder = Products::find().find_also_related(Manufacturers);

    if let Some(term) = search_term(q) {
        finder = finder.filter(
            Condition::any()
                .add(contains_ci(Column::ProductName, term))
                .add(contains_ci(Column::GenericName, term))
                .add(contains_ci(manufacturers::Column::Name, term)),
        );
    }

    let items: Vec<Product> = finder
        .order_by_asc(Column::ProductName)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(product, manufacturer)| Product::from_entity(product, manufacturer))
        .collect();

    let message = if items.is_empty() {
        "No products found."
    } else {
        "Products retrieved successfully."
    };
    Ok(ApiResponse::success(message, items))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let (product, manufacturer) = Products::find_by_id(id)
        .find_also_related(Manufacturers)
        .one(&state.orm)
        .await?
        .ok_or_else(not_found)?;
    Ok(ApiResponse::success(
        "Product retrieved successfully.",
        Product::from_entity(product, manufacturer),
    ))
}

pub async fn create_product(
    state: &AppState,
    payload: NewProduct,
) -> AppResult<ApiResponse<Product>> {
    let manufacturer = find_manufacturer(state, payload.manufacturer_id).await?;
    ensure_din_available(state, &payload.drug_identification_number, None).await?;

    let active = ActiveModel {
        id: NotSet,
        product_name: Set(payload.product_name),
        generic_name: Set(payload.generic_name),
        strength: Set(payload.strength),
        pharmaceutical_form: Set(payload.pharmaceutical_form),
        route_of_administration: Set(payload.route_of_administration),
        manufacturer_id: Set(payload.manufacturer_id),
        atc_code: Set(payload.atc_code),
        description: Set(payload.description),
        prescription_required: Set(payload.prescription_required),
        drug_identification_number: Set(payload.drug_identification_number),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let product = active.insert(&state.orm).await?;
    tracing::info!(product_id = product.id, "product created");

    Ok(ApiResponse::success(
        "Product created successfully.",
        Product::from_entity(product, Some(manufacturer)),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    changes: ProductChanges,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(not_found)?;

    let manufacturer_id = changes.manufacturer_id.unwrap_or(existing.manufacturer_id);
    let manufacturer = find_manufacturer(state, manufacturer_id).await?;
    if let Some(din) = changes.drug_identification_number.as_deref() {
        ensure_din_available(state, din, Some(id)).await?;
    }

    let mut active: ActiveModel = existing.into();
    if let Some(value) = changes.product_name {
        active.product_name = Set(value);
    }
    if let Some(value) = changes.generic_name {
        active.generic_name = Set(value);
    }
    if let Some(value) = changes.strength {
        active.strength = Set(value);
    }
    if let Some(value) = changes.pharmaceutical_form {
        active.pharmaceutical_form = Set(value);
    }
    if let Some(value) = changes.route_of_administration {
        active.route_of_administration = Set(value);
    }
    if let Some(value) = changes.manufacturer_id {
        active.manufacturer_id = Set(value);
    }
    if let Some(value) = changes.atc_code {
        active.atc_code = Set(value);
    }
    if let Some(value) = changes.description {
        active.description = Set(value);
    }
    if let Some(value) = changes.prescription_required {
        active.prescription_required = Set(value);
    }
    if let Some(value) = changes.drug_identification_number {
        active.drug_identification_number = Set(value);
    }

    let product = active.update(&state.orm).await?;
    tracing::info!(product_id = id, "product updated");

    Ok(ApiResponse::success(
        "Product updated successfully.",
        Product::from_entity(product, Some(manufacturer)),
    ))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let stocked = Inventory::find()
        .filter(inventory::Column::ProductId.eq(id))
        .count(&state.orm)
        .await?;
    if stocked > 0 {
        return Err(AppError::Conflict(
            "Product has inventory records and cannot be deleted.".into(),
        ));
    }

    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::ok("Product deleted successfully."))
}

pub async fn count_products(state: &AppState) -> AppResult<u64> {
    Ok(Products::find().count(&state.orm).await?)
}

async fn find_manufacturer(state: &AppState, id: i32) -> AppResult<manufacturers::Model> {
    Manufacturers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Manufacturer {id} does not exist.")))
}

async fn ensure_din_available(state: &AppState, din: &str, except: Option<i32>) -> AppResult<()> {
    let mut finder = Products::find().filter(products::Column::DrugIdentificationNumber.eq(din));
    if let Some(id) = except {
        finder = finder.filter(products::Column::Id.ne(id));
    }
    if finder.one(&state.orm).await?.is_some() {
        return Err(AppError::Conflict(
            "A product with this drug identification number already exists.".into(),
        ));
    }
    Ok(())
}
