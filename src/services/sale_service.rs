use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
    sea_query::Expr,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::sales::NewSale,
    entity::{
        Customers, Sales, customers,
        sales::{ActiveModel, Column},
    },
    error::{AppError, AppResult},
    models::Sale,
    response::ApiResponse,
    services::{contains_as_text, contains_ci, search_term},
    state::AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("Sale not found.".into())
}

/// Sales with customer names, newest first. A search term is a substring of the
/// customer name, the sale id, or the `YYYY-MM-DD` sale date.
pub async fn list_sales(state: &AppState, q: Option<&str>) -> AppResult<ApiResponse<Vec<Sale>>> {
    let mut finder = Sales::find().find_also_related(Customers);

    if let Some(term) = search_term(q) {
        finder = finder.filter(
            Condition::any()
                .add(contains_ci(customers::Column::Name, term))
                .add(contains_as_text(Column::Id, term))
                .add(contains_as_text(Column::SaleDate, term)),
        );
    }

    let items: Vec<Sale> = finder
        .order_by_desc(Column::SaleDate)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(sale, customer)| Sale::from_entity(sale, customer))
        .collect();

    let message = if items.is_empty() {
        "No sales found."
    } else {
        "Sales retrieved successfully."
    };
    Ok(ApiResponse::success(message, items))
}

pub async fn get_sale(state: &AppState, id: i32) -> AppResult<ApiResponse<Sale>> {
    let (sale, customer) = Sales::find_by_id(id)
        .find_also_related(Customers)
        .one(&state.orm)
        .await?
        .ok_or_else(not_found)?;
    Ok(ApiResponse::success(
        "Sale retrieved successfully.",
        Sale::from_entity(sale, customer),
    ))
}

/// Records the sale header only; stock levels are left untouched.
pub async fn create_sale(state: &AppState, payload: NewSale) -> AppResult<ApiResponse<Sale>> {
    let customer = match payload.customer_id {
        Some(id) => Some(
            Customers::find_by_id(id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Customer {id} does not exist.")))?,
        ),
        None => None,
    };

    let active = ActiveModel {
        id: NotSet,
        sale_date: Set(payload.sale_date),
        customer_id: Set(payload.customer_id),
        total_amount: Set(payload.total_amount),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let sale = active.insert(&state.orm).await?;
    tracing::info!(sale_id = sale.id, total = sale.total_amount, "sale recorded");

    Ok(ApiResponse::success(
        "Sale recorded successfully.",
        Sale::from_entity(sale, customer),
    ))
}

pub async fn delete_sale(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let result = Sales::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(not_found());
    }
    tracing::info!(sale_id = id, "sale deleted");
    Ok(ApiResponse::ok("Sale deleted successfully."))
}

/// Sum of `total_amount` for sales dated `day`.
pub async fn total_for_day(state: &AppState, day: NaiveDate) -> AppResult<f64> {
    let total: Option<f64> = Sales::find()
        .select_only()
        .column_as(Expr::col(Column::TotalAmount).sum(), "total")
        .filter(Column::SaleDate.eq(day))
        .into_tuple::<Option<f64>>()
        .one(&state.orm)
        .await?
        .flatten();
    Ok(total.unwrap_or(0.0))
}
