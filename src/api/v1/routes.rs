/*
 * Responsibility
 * - URL layout under /api
 * - protection is per handler (AuthPrincipal extractor), the JWT filter runs on all of them
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    members::{check_nickname, login, me, signup},
    ranks::{list_ranks, refresh_ranks},
    todos::{create_todo, delete_todo, list_todos, update_todo},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/check-nickname", post(check_nickname))
        .route("/members/me", get(me))
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{todo_id}", put(update_todo).delete(delete_todo))
        .route("/rank/{category}", get(list_ranks).post(refresh_ranks))
}
