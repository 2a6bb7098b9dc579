//! Manufacturers and customers: small lookup tables behind the dashboard's dropdowns.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::{Customers, Manufacturers, customers, manufacturers},
    error::{AppError, AppResult},
    models::{Customer, Manufacturer},
    response::ApiResponse,
    state::AppState,
};

pub async fn list_manufacturers(state: &AppState) -> AppResult<ApiResponse<Vec<Manufacturer>>> {
    let items = Manufacturers::find()
        .order_by_asc(manufacturers::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Manufacturer::from)
        .collect();
    Ok(ApiResponse::success("Manufacturers", items))
}

pub async fn create_manufacturer(
    state: &AppState,
    name: String,
) -> AppResult<ApiResponse<Manufacturer>> {
    let taken = Manufacturers::find()
        .filter(manufacturers::Column::Name.eq(name.as_str()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::Conflict(format!("Manufacturer '{name}' already exists.")));
    }

    let manufacturer = manufacturers::ActiveModel {
        id: NotSet,
        name: Set(name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Manufacturer created successfully.",
        Manufacturer::from(manufacturer),
    ))
}

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<Vec<Customer>>> {
    let items = Customers::find()
        .order_by_asc(customers::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();
    Ok(ApiResponse::success("Customers", items))
}

pub async fn create_customer(state: &AppState, name: String) -> AppResult<ApiResponse<Customer>> {
    let customer = customers::ActiveModel {
        id: NotSet,
        name: Set(name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Customer created successfully.",
        Customer::from(customer),
    ))
}
