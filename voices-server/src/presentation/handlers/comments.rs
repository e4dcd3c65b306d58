use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::posts::{CommentDto, CountResponseDto};
use super::{present, present_id};
use crate::domain::comment::CreateCommentRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateCommentDto {
    pub(crate) post_id: Option<i64>,
    pub(crate) user_id: Option<i64>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct DeleteCommentDto {
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CommentCountQuery {
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreateCommentResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) comment: CommentDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DeleteCommentResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) post_id: i64,
}

#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = CreateCommentResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Json(dto): Json<CreateCommentDto>,
) -> AppResult<(StatusCode, Json<CreateCommentResponseDto>)> {
    let (Some(post_id), Some(user_id), Some(content)) = (
        present_id(dto.post_id),
        present_id(dto.user_id),
        present(dto.content),
    ) else {
        return Err(AppError::BadRequest(
            "Post ID, user ID, and content are required to create a comment.".to_string(),
        ));
    };

    let comment = state
        .comment_service
        .create_comment(post_id, user_id, CreateCommentRequest { content })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCommentResponseDto {
            status: "success",
            message: "Comment added successfully".to_string(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    request_body = DeleteCommentDto,
    responses(
        (status = 200, description = "Comment deleted", body = DeleteCommentResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Not the author or comment missing"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<DeleteCommentDto>,
) -> AppResult<Json<DeleteCommentResponseDto>> {
    let Some(user_id) = present_id(dto.user_id) else {
        return Err(AppError::BadRequest(
            "Comment ID and user ID are required".to_string(),
        ));
    };

    let post_id = state.comment_service.delete_comment(id, user_id).await?;

    Ok(Json(DeleteCommentResponseDto {
        status: "success",
        message: "Comment deleted successfully".to_string(),
        post_id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/comments/count",
    tag = "comments",
    params(
        ("user_id" = i64, Query, description = "Comment author id")
    ),
    responses(
        (status = 200, description = "How many comments the user wrote", body = CountResponseDto),
        (status = 400, description = "Missing user id"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn user_comment_count(
    State(state): State<AppState>,
    Query(query): Query<CommentCountQuery>,
) -> AppResult<Json<CountResponseDto>> {
    let Some(user_id) = present_id(query.user_id) else {
        return Err(AppError::BadRequest("User ID is required".to_string()));
    };

    let count = state.comment_service.user_comment_count(user_id).await?;

    Ok(Json(CountResponseDto {
        status: "success",
        count,
    }))
}
