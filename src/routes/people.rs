use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::characters;
use crate::error::{AppError, AppResult};
use crate::extractors::PathId;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/people", get(list_people))
        .route("/people/{id}", get(get_person))
}

async fn list_people(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let people = characters::all(&conn)?;
    Ok(Json(json!({ "msg": "Completed", "people": people })))
}

async fn get_person(State(state): State<AppState>, PathId(id): PathId) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let person = characters::find(&conn, id)?
        .ok_or_else(|| AppError::bad_request(format!("There is no person with ID {}", id)))?;

    Ok(Json(json!({
        "msg": "Hello, this is your GET /people response",
        "people_id": id,
        "people_info": person,
    })))
}
