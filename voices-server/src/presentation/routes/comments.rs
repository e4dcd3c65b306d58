use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::comments::{
    create_comment, delete_comment, user_comment_count,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_comment))
        .route("/count", get(user_comment_count))
        .route("/{id}", delete(delete_comment))
}
