use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::{self, planets};
use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, PathId};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/planets", get(list_planets).put(rename_planet))
        .route("/planets/{id}", get(get_planet).delete(delete_planet))
}

async fn list_planets(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let planets = planets::all(&conn)?;
    Ok(Json(json!({ "msg": "Completed", "planets": planets })))
}

async fn rename_planet(State(state): State<AppState>, body: JsonBody) -> AppResult<Json<Value>> {
    let id = body.require_i64("id", "You must send the id of the planet to modify")?;
    let name = body.require_str("name", "You must send the new name of the planet")?;

    let conn = state.db.get()?;
    let planet = planets::rename(&conn, id, name)
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                AppError::bad_request(format!("A planet named {} already exists", name))
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Planet with ID {} not found", id)))?;
    tracing::info!(planet_id = id, "Renamed planet");

    Ok(Json(json!({ "msg": "Completed", "planet": planet })))
}

async fn get_planet(State(state): State<AppState>, PathId(id): PathId) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let planet = planets::find(&conn, id)?
        .ok_or_else(|| AppError::bad_request(format!("There is no planet with ID {}", id)))?;

    Ok(Json(json!({
        "msg": "Hello, this is your GET /planets response",
        "planet_id": id,
        "planet_info": planet,
    })))
}

async fn delete_planet(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    if !planets::delete(&conn, id)? {
        return Err(AppError::bad_request("The planet does not exist"));
    }
    tracing::info!(planet_id = id, "Deleted planet");

    Ok(Json(json!({ "msg": "Completed" })))
}
