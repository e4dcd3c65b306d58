use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::media::{direct_image, image_proxy, uploaded_image};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/images/direct", get(direct_image))
        .route("/api/images/proxy", get(image_proxy))
        .route("/api/uploads/posts/{filename}", get(uploaded_image))
}
