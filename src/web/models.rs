use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};

use crate::core::Id;
use crate::model::{Item, ShoppingList};

use super::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    /// One-shot notice for the next page render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, flash: None }
    }

    pub fn with_flash(data: T, flash: impl Into<String>) -> Self {
        Self {
            data,
            flash: Some(flash.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToggleItemRequest {
    /// Target state; the current state is flipped when absent.
    pub purchased: Option<bool>,
}

impl ToggleItemRequest {
    /// The body is optional: an empty body means "flip". Anything else must
    /// be a JSON object sent as `application/json`.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let is_json = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
        if !is_json {
            return Err(AppError::validation(
                "Expected request with `Content-Type: application/json`",
            ));
        }

        serde_json::from_slice(body)
            .map_err(|err| AppError::validation(format!("Invalid toggle request: {err}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub id: Id,
    pub title: String,
    pub done: bool,
    pub size: usize,
    pub remaining: usize,
}

impl From<&ShoppingList> for ListSummary {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id(),
            title: list.title().to_string(),
            done: list.is_done(),
            size: list.size(),
            remaining: list.not_purchased().size(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsView {
    pub shopping_lists: Vec<ListSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub shopping_list: ListSummary,
    pub items: Vec<Item>,
}
