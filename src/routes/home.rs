use axum::Json;
use serde::Serialize;

use crate::routes::ENDPOINTS;

#[derive(Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
}

#[derive(Serialize)]
pub struct Sitemap {
    pub msg: &'static str,
    pub endpoints: Vec<Endpoint>,
}

pub async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap {
        msg: "Holonet API endpoints",
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path)| Endpoint { method, path })
            .collect(),
    })
}
