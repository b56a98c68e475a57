use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rusqlite::Connection;
use serde_json::{json, Value};

use crate::db::models::FavoriteTarget;
use crate::db::{self, characters, favorites, planets, users};
use crate::error::{AppError, AppResult};
use crate::extractors::{FavoriteOwner, JsonBody, PathId};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/favorite/planet/{id}",
            post(add_planet).delete(remove_planet),
        )
        .route(
            "/favorite/people/{id}",
            post(add_character).delete(remove_character),
        )
}

/// Wording that differs between planet and character favorites.
struct Labels {
    body_field: &'static str,
    noun: &'static str,
    title: &'static str,
}

impl Labels {
    fn of(target: FavoriteTarget) -> Self {
        match target {
            FavoriteTarget::Planet(_) => Labels {
                body_field: "planets_id",
                noun: "planet",
                title: "Planet",
            },
            FavoriteTarget::Character(_) => Labels {
                body_field: "character_id",
                noun: "character",
                title: "Character",
            },
        }
    }
}

fn target_exists(conn: &Connection, target: FavoriteTarget) -> rusqlite::Result<bool> {
    Ok(match target {
        FavoriteTarget::Planet(id) => planets::find(conn, id)?.is_some(),
        FavoriteTarget::Character(id) => characters::find(conn, id)?.is_some(),
    })
}

async fn add_planet(
    State(state): State<AppState>,
    owner: FavoriteOwner,
    PathId(id): PathId,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    add_favorite(&state, owner, FavoriteTarget::Planet(id), &body)
}

async fn add_character(
    State(state): State<AppState>,
    owner: FavoriteOwner,
    PathId(id): PathId,
    body: JsonBody,
) -> AppResult<Json<Value>> {
    add_favorite(&state, owner, FavoriteTarget::Character(id), &body)
}

async fn remove_planet(
    State(state): State<AppState>,
    owner: FavoriteOwner,
    PathId(id): PathId,
) -> AppResult<Json<Value>> {
    remove_favorite(&state, owner, FavoriteTarget::Planet(id))
}

async fn remove_character(
    State(state): State<AppState>,
    owner: FavoriteOwner,
    PathId(id): PathId,
) -> AppResult<Json<Value>> {
    remove_favorite(&state, owner, FavoriteTarget::Character(id))
}

fn duplicate(noun: &str) -> AppError {
    AppError::bad_request(format!(
        "This {} has already been added to your favorites",
        noun
    ))
}

/// Only a UNIQUE hit means the favorite already exists; a foreign-key miss
/// (target deleted after the existence check) stays a store fault.
fn insert_error(err: rusqlite::Error, noun: &str) -> AppError {
    if db::is_unique_violation(&err) {
        duplicate(noun)
    } else {
        err.into()
    }
}

fn add_favorite(
    state: &AppState,
    FavoriteOwner(user_id): FavoriteOwner,
    target: FavoriteTarget,
    body: &JsonBody,
) -> AppResult<Json<Value>> {
    let labels = Labels::of(target);
    let path_id = target.id();

    let body_id = body.require_i64(
        labels.body_field,
        &format!("You must send the {} field", labels.body_field),
    )?;
    if body_id != path_id {
        return Err(AppError::bad_request(format!(
            "{} {} in the body does not match {} in the path",
            labels.body_field, body_id, path_id
        )));
    }

    let conn = state.db.get()?;
    if users::find(&conn, user_id)?.is_none() {
        return Err(AppError::not_found(format!(
            "User with ID {} not found",
            user_id
        )));
    }
    if !target_exists(&conn, target)? {
        return Err(AppError::not_found(format!(
            "{} with ID {} not found",
            labels.title, path_id
        )));
    }

    if favorites::find(&conn, user_id, target)?.is_some() {
        return Err(duplicate(labels.noun));
    }
    let favorite = favorites::insert(&conn, user_id, target)
        .map_err(|e| insert_error(e, labels.noun))?;
    tracing::info!(
        user_id,
        favorite_id = favorite.id,
        "Added {} favorite",
        labels.noun
    );

    Ok(Json(json!({
        "msg": format!("{} added to favorites", labels.title),
        "favorite": favorite,
    })))
}

fn remove_favorite(
    state: &AppState,
    FavoriteOwner(user_id): FavoriteOwner,
    target: FavoriteTarget,
) -> AppResult<Json<Value>> {
    let labels = Labels::of(target);

    let conn = state.db.get()?;
    let removed = favorites::delete(&conn, user_id, target)?
        .ok_or_else(|| AppError::not_found("Favorite not found"))?;
    tracing::info!(
        user_id,
        favorite_id = removed.id,
        "Removed {} favorite",
        labels.noun
    );

    Ok(Json(json!({
        "msg": format!("{} deleted from favorites", labels.title),
    })))
}
