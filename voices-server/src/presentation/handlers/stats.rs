use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::stats_service::PlatformStats;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StatsDto {
    pub(crate) total_posts: i64,
    pub(crate) total_institutions: i64,
    pub(crate) total_users: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StatsResponseDto {
    pub(crate) status: &'static str,
    pub(crate) stats: StatsDto,
}

impl From<PlatformStats> for StatsDto {
    fn from(stats: PlatformStats) -> Self {
        Self {
            total_posts: stats.total_posts,
            total_institutions: stats.total_institutions,
            total_users: stats.total_users,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Platform-wide counters", body = StatsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn platform_stats(
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponseDto>> {
    let stats = state.stats_service.platform_stats().await?;

    Ok(Json(StatsResponseDto {
        status: "success",
        stats: stats.into(),
    }))
}
