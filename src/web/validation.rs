use crate::core::Id;
use crate::model::{MAX_TITLE_CHARS, ShoppingList};

use super::error::{AppError, AppResult};

/// Trim a submitted title and check it is 1 to 100 characters long.
/// `kind` names the entity in messages ("list", "item").
pub fn normalize_title(raw: &str, kind: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::validation(format!("The {kind} title is required.")));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::validation(format!(
            "The {kind} title must be between 1 and {MAX_TITLE_CHARS} characters."
        )));
    }
    Ok(title.to_string())
}

/// List titles must be unique within a session. `except` skips the list
/// being renamed.
pub fn ensure_unique_list_title(
    lists: &[ShoppingList],
    title: &str,
    except: Option<Id>,
) -> AppResult<()> {
    let taken = lists
        .iter()
        .filter(|list| Some(list.id()) != except)
        .any(|list| list.title() == title);

    if taken {
        return Err(AppError::validation("List title must be unique."));
    }
    Ok(())
}
