use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};

use crate::errors::UserError;
use crate::services::user_service;
use crate::state::users::{User, UserStore};

/// Build all user routes under /users
pub fn routes(store: UserStore) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(replace_user)
                .delete(delete_user),
        )
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// GET /users
// ─────────────────────────────────────────────────────────────
//
async fn list_users(State(store): State<UserStore>) -> Json<Vec<User>> {
    Json(user_service::list(&store))
}

//
// ─────────────────────────────────────────────────────────────
// GET /users/{id}
// Record or 404
// ─────────────────────────────────────────────────────────────
//
async fn get_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
) -> Result<Json<User>, UserError> {
    user_service::get(&store, &id).map(Json)
}

//
// ─────────────────────────────────────────────────────────────
// POST /users
// Store assigns the id, 201 with the created record
// ─────────────────────────────────────────────────────────────
//
async fn create_user(
    State(store): State<UserStore>,
    Json(payload): Json<Map<String, Value>>,
) -> (StatusCode, Json<User>) {
    let user = user_service::insert(&store, payload);
    tracing::info!(id = user.id, "Created user");
    (StatusCode::CREATED, Json(user))
}

//
// ─────────────────────────────────────────────────────────────
// PUT /users/{id}
// Full replace, 404 if absent
// ─────────────────────────────────────────────────────────────
//
async fn replace_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<User>, UserError> {
    user_service::replace(&store, &id, payload).map(Json)
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /users/{id}
// Always 204, even when nothing matched
// ─────────────────────────────────────────────────────────────
//
async fn delete_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
) -> StatusCode {
    user_service::delete(&store, &id);
    StatusCode::NO_CONTENT
}
