/*
 * Responsibility
 * - /todo CRUD for the authenticated member
 * - ownership is enforced in the repo queries (member_id in WHERE)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Local;

use crate::{
    api::v1::{
        dto::todos::{CreateTodoRequest, TodoResponse, UpdateTodoRequest},
        extractors::AuthPrincipal,
    },
    error::AppError,
    repos::todo_repo,
    state::AppState,
};

pub async fn list_todos(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let rows = todo_repo::list_by_member(&state.db, principal.id).await?;
    Ok(Json(rows.into_iter().map(TodoResponse::from).collect()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REQUEST", m))?;

    let add_date = req.add_date.unwrap_or_else(|| Local::now().date_naive());
    let row = todo_repo::create(&state.db, principal.id, req.content.trim(), add_date).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(row))))
}

pub async fn update_todo(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(todo_id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_REQUEST", m))?;

    let row = todo_repo::update(
        &state.db,
        todo_id,
        principal.id,
        req.content.as_deref().map(str::trim),
        req.is_complete,
    )
    .await?
    .ok_or(AppError::not_found("todo"))?;

    Ok(Json(TodoResponse::from(row)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(todo_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if todo_repo::delete(&state.db, todo_id, principal.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("todo"))
    }
}
