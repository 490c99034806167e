use crate::day;
use crate::errors::AppError;
use crate::models::{AddItemForm, CheckItemForm, DeleteItemForm, Item, ListRef};
use crate::state::AppState;
use crate::ui::render_list;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{debug, info};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let items = state.store.list_default_items().await?;
    Ok(Html(render_list(day::today(), &items)))
}

pub async fn show_list(
    State(state): State<AppState>,
    Path(list_name): Path<String>,
) -> Result<Response, AppError> {
    let target = ListRef::resolve(&list_name, day::today());
    let ListRef::Named(name) = &target else {
        return Ok(found(target.path()));
    };

    if let Some(list) = state.store.find_list_by_name(name).await? {
        return Ok(Html(render_list(&list.name, &list.items)).into_response());
    }

    if state.store.create_list(name).await? {
        info!("created list {name:?}");
    }
    Ok(found(target.path()))
}

pub async fn add_item(
    State(state): State<AppState>,
    Form(form): Form<AddItemForm>,
) -> Result<Response, AppError> {
    let task = form.task_input.trim();
    if task.is_empty() {
        return Err(AppError::bad_request("taskInput must not be empty"));
    }

    let item = Item::new(task);
    let target = ListRef::resolve(&form.list, day::today());
    match &target {
        ListRef::Default => state.store.add_default_item(item).await?,
        ListRef::Named(name) => {
            if state.store.append_item_to_list(name, item).await? {
                info!("created list {name:?} on first item");
            }
        }
    }

    Ok(found(target.path()))
}

pub async fn check_item(
    State(state): State<AppState>,
    Form(form): Form<CheckItemForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&form.checkbox)?;
    let target = ListRef::resolve(&form.list_name, day::today());
    let toggled = match &target {
        ListRef::Default => state.store.toggle_default_item(id).await?,
        ListRef::Named(name) => state.store.toggle_list_item(name, id).await?,
    };

    let item = toggled.ok_or_else(|| AppError::not_found(format!("no item {id}")))?;
    debug!("item {id} checked={}", item.is_checked);
    Ok(found(target.path()))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Form(form): Form<DeleteItemForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&form.delete)?;
    let target = ListRef::resolve(&form.list_name, day::today());
    let removed = match &target {
        ListRef::Default => state.store.delete_default_item(id).await?,
        ListRef::Named(name) => state
            .store
            .remove_item_from_list(name, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("no list {name:?}")))?,
    };

    if !removed {
        debug!("delete of unknown item {id} ignored");
    }
    Ok(found(target.path()))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request(format!("invalid item id {raw:?}")))
}

/// `302 Found` back to a list page.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
