use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::present;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

/// Images are immutable once uploaded, so a day of client caching is safe.
const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct DirectImageQuery {
    pub(crate) filename: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ImageProxyQuery {
    pub(crate) path: Option<String>,
}

fn image_response(bytes: Vec<u8>, content_type: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
        ],
        bytes,
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/images/direct",
    tag = "images",
    params(
        ("filename" = String, Query, description = "Uploaded image filename")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Missing filename"),
        (status = 404, description = "Image not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn direct_image(
    State(state): State<AppState>,
    Query(query): Query<DirectImageQuery>,
) -> AppResult<Response> {
    let Some(filename) = present(query.filename) else {
        return Err(AppError::BadRequest("No filename provided".to_string()));
    };

    let (bytes, content_type) = state.media.open(&filename).await?;
    Ok(image_response(bytes, content_type))
}

#[utoipa::path(
    get,
    path = "/api/uploads/posts/{filename}",
    tag = "images",
    params(
        ("filename" = String, Path, description = "Uploaded image filename")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Image not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn uploaded_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let (bytes, content_type) = state.media.open(&filename).await?;
    Ok(image_response(bytes, content_type))
}

#[utoipa::path(
    get,
    path = "/api/images/proxy",
    tag = "images",
    params(
        ("path" = String, Query, description = "Relative path into the uploads directory")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Missing path"),
        (status = 403, description = "Path outside the uploads directory"),
        (status = 404, description = "Image not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn image_proxy(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> AppResult<Response> {
    let Some(path) = present(query.path) else {
        return Err(AppError::BadRequest("No image path provided".to_string()));
    };

    let (bytes, content_type) = state.media.open_proxied(&path).await?;
    Ok(image_response(bytes, content_type))
}
