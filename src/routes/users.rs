use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::{self, favorites, users};
use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, PathId};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/favorites/{user_id}", get(list_favorites))
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let users = users::all(&conn)?;
    Ok(Json(json!({
        "msg": "Hello, this is your GET /users response",
        "users": users,
    })))
}

async fn create_user(State(state): State<AppState>, body: JsonBody) -> AppResult<Json<Value>> {
    let email = body.require_str("email", "You must send the email field")?;
    let password = body.require_str("password", "You must send your password")?;

    let hash = hash_password(password.to_string(), state.config.auth.bcrypt_cost).await?;

    let conn = state.db.get()?;
    let user = users::insert(&conn, email, &hash, true).map_err(|e| {
        if db::is_unique_violation(&e) {
            AppError::bad_request(format!("A user with email {} already exists", email))
        } else {
            e.into()
        }
    })?;
    tracing::info!(user_id = user.id, "Created user");

    Ok(Json(json!({ "msg": "Completado", "new_user_info": user })))
}

/// Runs bcrypt on the blocking pool so runtime workers stay free for other requests.
async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;
    Ok(hash)
}

async fn list_favorites(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let favorites = favorites::for_user(&conn, user_id)?;
    Ok(Json(json!({
        "msg": "Hello, this is your user's favorites response",
        "user_id": user_id,
        "favorites": favorites,
    })))
}
