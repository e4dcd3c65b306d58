use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{
    change_password, login, register, update_profile, user_info,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/change_password", post(change_password))
        .route("/update_profile", post(update_profile))
        .route("/user_info", get(user_info))
}
