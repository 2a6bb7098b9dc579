//! Single-endpoint API: the HTTP method plus an `action` query parameter select
//! the operation, e.g. `POST /api/dispatch?action=createProduct`.
//!
//! Plain `OPTIONS` requests never reach this handler; they are answered by the
//! preflight layer in `routes`.
//!
//! Every action validates its input first; validation failures keep their own
//! 400 status. Failures reported by the operation itself use the status listed
//! for that action, while database and internal errors stay 500.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::IntoParams;

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        products::{CreateProductRequest, UpdateProductRequest},
    },
    error::{AppError, AppResult},
    extract::QueryParams,
    response::ApiResponse,
    services::{auth_service, product_service},
    state::AppState,
};

const UPDATE_MISSING: &str = "Product ID or data missing for update.";

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DispatchQuery {
    /// Operation name, e.g. `createUser` or `getProductById`.
    #[serde(default)]
    pub action: String,
    /// Numeric record id for single-record actions.
    pub id: Option<String>,
}

impl DispatchQuery {
    fn record_id(&self) -> Option<i32> {
        self.id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
    }
}

#[utoipa::path(
    post,
    path = "/api/dispatch",
    params(DispatchQuery),
    request_body(
        content = Object,
        description = "JSON body for POST and PUT actions",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Action succeeded"),
        (status = 201, description = "Record created"),
        (status = 400, description = "Missing fields, invalid action or failed operation"),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "Record not found"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "Dispatch"
)]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    QueryParams(query): QueryParams<DispatchQuery>,
    body: Bytes,
) -> Response {
    let action = query.action.trim();
    tracing::debug!(%method, action, "dispatch");

    match method {
        Method::POST => {
            if action.is_empty() {
                return action_not_specified();
            }
            post_action(&state, action, parse_body(&body)).await
        }
        Method::GET => get_action(&state, action, &query).await,
        Method::PUT => {
            if action.is_empty() {
                return action_not_specified();
            }
            put_action(&state, action, &query, parse_body(&body)).await
        }
        Method::DELETE => {
            if action.is_empty() {
                return action_not_specified();
            }
            delete_action(&state, action, &query).await
        }
        _ => AppError::MethodNotAllowed.into_response(),
    }
}

async fn post_action(state: &AppState, action: &str, body: Value) -> Response {
    match action {
        "createUser" => match validated(&body, RegisterRequest::validate) {
            Ok(user) => respond(
                auth_service::register_user(state, user).await,
                StatusCode::CREATED,
                StatusCode::BAD_REQUEST,
            ),
            Err(err) => err.into_response(),
        },
        "loginUser" => match validated(&body, LoginRequest::validate) {
            Ok(credentials) => respond(
                auth_service::login_user(state, credentials).await,
                StatusCode::OK,
                StatusCode::UNAUTHORIZED,
            ),
            Err(err) => err.into_response(),
        },
        "createProduct" => match validated(&body, CreateProductRequest::validate) {
            Ok(product) => respond(
                product_service::create_product(state, product).await,
                StatusCode::CREATED,
                StatusCode::BAD_REQUEST,
            ),
            Err(err) => err.into_response(),
        },
        _ => invalid_action("POST"),
    }
}

async fn get_action(state: &AppState, action: &str, query: &DispatchQuery) -> Response {
    match action {
        "getProducts" => respond(
            product_service::list_products(state, None).await,
            StatusCode::OK,
            StatusCode::NOT_FOUND,
        ),
        "getProductById" => match query.record_id() {
            Some(id) => respond(
                product_service::get_product(state, id).await,
                StatusCode::OK,
                StatusCode::NOT_FOUND,
            ),
            None => missing("Product ID is missing or invalid."),
        },
        _ => invalid_action("GET"),
    }
}

async fn put_action(
    state: &AppState,
    action: &str,
    query: &DispatchQuery,
    body: Value,
) -> Response {
    match action {
        "updateProduct" => {
            let Some(id) = query.record_id() else {
                return missing(UPDATE_MISSING);
            };
            let request = match decode::<UpdateProductRequest>(&body) {
                Ok(request) if !request.is_empty() => request,
                Ok(_) => return missing(UPDATE_MISSING),
                Err(err) => return err.into_response(),
            };
            match request.validate() {
                Ok(changes) => respond(
                    product_service::update_product(state, id, changes).await,
                    StatusCode::OK,
                    StatusCode::BAD_REQUEST,
                ),
                Err(err) => err.into_response(),
            }
        }
        _ => invalid_action("PUT"),
    }
}

async fn delete_action(state: &AppState, action: &str, query: &DispatchQuery) -> Response {
    match action {
        "deleteProduct" => match query.record_id() {
            Some(id) => respond(
                product_service::delete_product(state, id).await,
                StatusCode::OK,
                StatusCode::BAD_REQUEST,
            ),
            None => missing("Product ID missing for delete."),
        },
        _ => invalid_action("DELETE"),
    }
}

/// Map an operation result onto the action's status convention.
fn respond<T: Serialize>(
    result: AppResult<ApiResponse<T>>,
    ok: StatusCode,
    failed: StatusCode,
) -> Response {
    match result {
        Ok(body) => (ok, Json(body)).into_response(),
        Err(err) if err.is_internal() => err.into_response(),
        Err(err) => err.into_response_with(failed),
    }
}

/// Anything that is not a JSON object is treated as an empty body, so a
/// malformed payload surfaces as missing fields.
fn parse_body(body: &Bytes) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Default::default()),
    }
}

fn decode<T: DeserializeOwned>(body: &Value) -> AppResult<T> {
    serde_json::from_value(body.clone())
        .map_err(|err| AppError::BadRequest(format!("Invalid request body: {err}")))
}

/// Decode the body as `T`, then run its validation.
fn validated<T, V>(body: &Value, validate: impl FnOnce(T) -> AppResult<V>) -> AppResult<V>
where
    T: DeserializeOwned,
{
    decode::<T>(body).and_then(validate)
}

fn missing(message: &str) -> Response {
    AppError::MissingFields(message.to_string()).into_response()
}

fn action_not_specified() -> Response {
    AppError::InvalidAction("Action not specified.".into()).into_response()
}

fn invalid_action(method: &str) -> Response {
    AppError::InvalidAction(format!("Invalid {method} action.")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_becomes_empty_object() {
        let value = parse_body(&Bytes::from_static(b"{not json"));
        assert_eq!(value, Value::Object(Default::default()));

        let value = parse_body(&Bytes::from_static(b"[1, 2]"));
        assert_eq!(value, Value::Object(Default::default()));
    }

    #[test]
    fn record_id_must_be_numeric() {
        let query = DispatchQuery {
            action: "getProductById".into(),
            id: Some(" 12 ".into()),
        };
        assert_eq!(query.record_id(), Some(12));

        let query = DispatchQuery {
            action: "getProductById".into(),
            id: Some("twelve".into()),
        };
        assert_eq!(query.record_id(), None);
    }
}
