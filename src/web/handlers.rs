use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
};
use tracing::info;

use crate::{
    core::Id,
    model::{Item, ShoppingList, sort_items, sort_shopping_lists},
    session::{SessionGuard, dehydrate, rehydrate},
};

use super::{
    error::{AppError, AppResult},
    models::{
        ApiMessage, ApiResponse, ListSummary, ListView, ListsView, TitleRequest,
        ToggleItemRequest,
    },
    session::CurrentSession,
    state::AppState,
    validation::{ensure_unique_list_title, normalize_title},
};

/// A session's lists, rehydrated for the duration of one request. The
/// session stays locked until the workspace is dropped; changes are only
/// written back by [`Workspace::commit`].
struct Workspace {
    records: SessionGuard,
    lists: Vec<ShoppingList>,
}

impl Workspace {
    async fn open(state: &AppState, session: CurrentSession) -> AppResult<Self> {
        let records = state.sessions.checkout(session.0).await?;
        let lists = rehydrate(&records)?;
        Ok(Self { records, lists })
    }

    fn position(&self, list_id: Id) -> AppResult<usize> {
        self.lists
            .iter()
            .position(|list| list.id() == list_id)
            .ok_or_else(|| AppError::not_found("shopping list not found"))
    }

    fn list(&self, list_id: Id) -> AppResult<&ShoppingList> {
        let index = self.position(list_id)?;
        Ok(&self.lists[index])
    }

    fn list_mut(&mut self, list_id: Id) -> AppResult<&mut ShoppingList> {
        let index = self.position(list_id)?;
        Ok(&mut self.lists[index])
    }

    fn commit(mut self) {
        *self.records = dehydrate(&self.lists);
    }
}

fn item_index(list: &ShoppingList, item_id: Id) -> AppResult<usize> {
    list.find_by_id(item_id)
        .and_then(|item| list.find_index_of(item))
        .ok_or_else(|| AppError::not_found("item not found"))
}

fn list_view(list: &ShoppingList) -> ListView {
    ListView {
        shopping_list: ListSummary::from(list),
        items: sort_items(list).into_iter().cloned().collect(),
    }
}

pub async fn healthcheck() -> Json<ApiResponse<ApiMessage>> {
    Json(ApiResponse::new(ApiMessage {
        message: "ok".to_string(),
    }))
}

pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

pub async fn list_lists(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> AppResult<Json<ApiResponse<ListsView>>> {
    let workspace = Workspace::open(&state, session).await?;

    let shopping_lists = sort_shopping_lists(&workspace.lists)
        .into_iter()
        .map(ListSummary::from)
        .collect();

    Ok(Json(ApiResponse::new(ListsView { shopping_lists })))
}

pub async fn create_list(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Json(payload): Json<TitleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ListSummary>>)> {
    let title = normalize_title(&payload.title, "list")?;

    let mut workspace = Workspace::open(&state, session).await?;
    ensure_unique_list_title(&workspace.lists, &title, None)?;

    let list = ShoppingList::new(title, &state.ids);
    let summary = ListSummary::from(&list);
    workspace.lists.push(list);
    workspace.commit();

    info!(session = %session.0, list_id = summary.id, "shopping list created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_flash(summary, "The list has been created.")),
    ))
}

pub async fn show_list(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(list_id): Path<Id>,
) -> AppResult<Json<ApiResponse<ListView>>> {
    let workspace = Workspace::open(&state, session).await?;
    let list = workspace.list(list_id)?;
    Ok(Json(ApiResponse::new(list_view(list))))
}

pub async fn rename_list(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(list_id): Path<Id>,
    Json(payload): Json<TitleRequest>,
) -> AppResult<Json<ApiResponse<ListSummary>>> {
    let title = normalize_title(&payload.title, "list")?;

    let mut workspace = Workspace::open(&state, session).await?;
    workspace.position(list_id)?;
    ensure_unique_list_title(&workspace.lists, &title, Some(list_id))?;

    let list = workspace.list_mut(list_id)?;
    list.set_title(title);
    let summary = ListSummary::from(&*list);
    workspace.commit();

    info!(session = %session.0, list_id, "shopping list renamed");
    Ok(Json(ApiResponse::with_flash(summary, "List updated.")))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(list_id): Path<Id>,
) -> AppResult<StatusCode> {
    let mut workspace = Workspace::open(&state, session).await?;
    let index = workspace.position(list_id)?;
    let removed = workspace.lists.remove(index);
    workspace.commit();

    info!(session = %session.0, list_id, title = removed.title(), "shopping list deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_all(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(list_id): Path<Id>,
) -> AppResult<Json<ApiResponse<ListView>>> {
    let mut workspace = Workspace::open(&state, session).await?;
    let list = workspace.list_mut(list_id)?;
    list.mark_all_purchased();
    let view = list_view(list);
    workspace.commit();

    info!(session = %session.0, list_id, "all items marked purchased");
    Ok(Json(ApiResponse::with_flash(
        view,
        "All items have been marked as purchased.",
    )))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(list_id): Path<Id>,
    Json(payload): Json<TitleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    let title = normalize_title(&payload.title, "item")?;

    let mut workspace = Workspace::open(&state, session).await?;
    let list = workspace.list_mut(list_id)?;
    let item = Item::new(title, &state.ids);
    list.add(item.clone())?;
    workspace.commit();

    info!(session = %session.0, list_id, item_id = item.id(), "item added");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_flash(item, "The item has been added.")),
    ))
}

pub async fn toggle_item(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path((list_id, item_id)): Path<(Id, Id)>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<Item>>> {
    let requested = ToggleItemRequest::from_body(&headers, &body)?.purchased;

    let mut workspace = Workspace::open(&state, session).await?;
    let list = workspace.list_mut(list_id)?;
    let index = item_index(list, item_id)?;

    let target = match requested {
        Some(purchased) => purchased,
        None => !list.item_at(index)?.is_purchased(),
    };
    if target {
        list.mark_purchased_at(index)?;
    } else {
        list.mark_not_purchased_at(index)?;
    }
    let item = list.item_at(index)?.clone();
    workspace.commit();

    info!(session = %session.0, list_id, item_id, purchased = target, "item toggled");
    let flash = if target {
        format!("\"{}\" marked as purchased.", item.title())
    } else {
        format!("\"{}\" marked as not purchased.", item.title())
    };
    Ok(Json(ApiResponse::with_flash(item, flash)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path((list_id, item_id)): Path<(Id, Id)>,
) -> AppResult<StatusCode> {
    let mut workspace = Workspace::open(&state, session).await?;
    let list = workspace.list_mut(list_id)?;
    let index = item_index(list, item_id)?;
    let removed = list.remove_at(index)?;
    workspace.commit();

    info!(session = %session.0, list_id, item_id, title = removed.title(), "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
