use serde::Deserialize;
use utoipa::IntoParams;

/// Optional search filter for list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring to match.
    pub q: Option<String>,
}
