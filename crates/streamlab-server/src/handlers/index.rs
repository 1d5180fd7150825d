//! Endpoint index handler

use axum::Json;
use streamlab_core::ApiIndex;

use crate::catalog::ENDPOINTS;

/// GET /api
/// List all streaming endpoints
pub async fn api_index() -> Json<ApiIndex> {
    Json(ApiIndex {
        message: "streamlab demo API".to_string(),
        endpoints: ENDPOINTS.iter().map(|s| s.to_string()).collect(),
    })
}
