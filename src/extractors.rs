use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::state::AppState;

pub const MISSING_BODY: &str = "You must send information in the request body";

/// A request body that must be a JSON object.
///
/// Unlike `axum::Json`, a missing, malformed or non-object body is rejected with
/// the API's own 400 error instead of axum's plain-text rejection, and the
/// content type is not checked.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Map<String, Value>);

impl JsonBody {
    /// A string field that must be present.
    pub fn require_str(&self, key: &str, missing: &str) -> Result<&str, AppError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(AppError::bad_request(missing)),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(AppError::bad_request(format!(
                "Field `{}` must be a string",
                key
            ))),
        }
    }

    /// An integer field that must be present.
    pub fn require_i64(&self, key: &str, missing: &str) -> Result<i64, AppError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(AppError::bad_request(missing)),
            Some(v) => v.as_i64().ok_or_else(|| {
                AppError::bad_request(format!("Field `{}` must be an integer", key))
            }),
        }
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::bad_request(MISSING_BODY))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonBody(map)),
            _ => Err(AppError::bad_request(MISSING_BODY)),
        }
    }
}

/// A single integer path parameter, such as the `{id}` in `/planets/{id}`.
///
/// A non-integer segment is rejected with the API's JSON 400 rather than
/// axum's plain-text `PathRejection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(PathId(id))
    }
}

/// The user favorite mutations act on behalf of.
///
/// There is no authentication yet, so this resolves to the configured
/// `favorites.owner_id`. A session-based lookup belongs here once login exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteOwner(pub i64);

impl FromRequestParts<AppState> for FavoriteOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(FavoriteOwner(state.config.favorites.owner_id))
    }
}
