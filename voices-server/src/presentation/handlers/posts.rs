use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{MessageResponseDto, present, present_id};
use crate::application::post_service::PostDetail;
use crate::data::comment_repository::CommentWithAuthor;
use crate::data::post_repository::PostSummary;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    pub(crate) user_id: Option<i64>,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) institution: Option<String>,
    #[serde(default)]
    pub(crate) images: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdatePostDto {
    pub(crate) user_id: Option<i64>,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) institution: Option<String>,
    #[serde(default)]
    pub(crate) images: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ToggleLikeDto {
    pub(crate) post_id: Option<i64>,
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ViewerQuery {
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct FeedQuery {
    pub(crate) limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UserPostsQuery {
    pub(crate) user_id: Option<i64>,
    pub(crate) count_only: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) user: AuthorDto,
}

impl From<CommentWithAuthor> for CommentDto {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            user: AuthorDto {
                id: comment.user_id,
                name: comment.user_name,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) images: Vec<String>,
    pub(crate) likes: i64,
    pub(crate) user_liked: bool,
    pub(crate) user: AuthorDto,
    pub(crate) comments: Vec<CommentDto>,
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            id: detail.post.id,
            title: detail.post.title,
            content: detail.post.content,
            category: detail.post.category,
            institution: detail.post.institution,
            created_at: detail.post.created_at,
            updated_at: detail.post.updated_at,
            images: detail.post.images,
            likes: detail.likes,
            user_liked: detail.user_liked,
            user: AuthorDto {
                id: detail.post.user_id,
                name: detail.post.user_name,
            },
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostSummaryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) institution: String,
    pub(crate) images: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) user: AuthorDto,
    pub(crate) likes_count: i64,
    pub(crate) comments_count: i64,
}

impl From<PostSummary> for PostSummaryDto {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.post.id,
            title: summary.post.title,
            content: summary.post.content,
            category: summary.post.category,
            institution: summary.post.institution,
            images: summary.post.images,
            created_at: summary.post.created_at,
            updated_at: summary.post.updated_at,
            user: AuthorDto {
                id: summary.post.user_id,
                name: summary.post.user_name,
            },
            likes_count: summary.likes_count,
            comments_count: summary.comments_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatePostResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) post_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailResponseDto {
    pub(crate) status: &'static str,
    pub(crate) post: PostDetailDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UpdatePostResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) post: PostDetailDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListResponseDto {
    pub(crate) status: &'static str,
    pub(crate) posts: Vec<PostSummaryDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CountResponseDto {
    pub(crate) status: &'static str,
    pub(crate) count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ToggleLikeResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) liked: bool,
    pub(crate) likes_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadImageResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) file_path: String,
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = CreatePostResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Owner not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<CreatePostResponseDto>)> {
    let (Some(user_id), Some(title), Some(content), Some(category), Some(institution)) = (
        present_id(dto.user_id),
        present(dto.title),
        present(dto.content),
        present(dto.category),
        present(dto.institution),
    ) else {
        return Err(AppError::BadRequest(
            "User ID, title, content, category, and institution are required to create a post."
                .to_string(),
        ));
    };

    let post_id = state
        .post_service
        .create_post(
            user_id,
            CreatePostRequest {
                title,
                content,
                category,
                institution,
                images: dto.images,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponseDto {
            status: "success",
            message: "Post created successfully".to_string(),
            post_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id"),
        ("user_id" = Option<i64>, Query, description = "Viewer id for the user_liked flag")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDetailResponseDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<PostDetailResponseDto>> {
    let detail = state
        .post_service
        .get_post(id, present_id(query.user_id))
        .await?;

    Ok(Json(PostDetailResponseDto {
        status: "success",
        post: detail.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/recent",
    tag = "posts",
    params(
        ("limit" = Option<i64>, Query, description = "How many posts to return")
    ),
    responses(
        (status = 200, description = "Most recent posts", body = PostListResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn recent_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<PostListResponseDto>> {
    let posts = state.post_service.recent_posts(query.limit).await?;

    Ok(Json(PostListResponseDto {
        status: "success",
        posts: posts.into_iter().map(PostSummaryDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/trending",
    tag = "posts",
    params(
        ("limit" = Option<i64>, Query, description = "How many posts to return")
    ),
    responses(
        (status = 200, description = "Most supported posts", body = PostListResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn trending_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<PostListResponseDto>> {
    let posts = state.post_service.trending_posts(query.limit).await?;

    Ok(Json(PostListResponseDto {
        status: "success",
        posts: posts.into_iter().map(PostSummaryDto::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/user",
    tag = "posts",
    params(
        ("user_id" = i64, Query, description = "Post owner id"),
        ("count_only" = Option<String>, Query, description = "Return only the post count when 1/true")
    ),
    responses(
        (status = 200, description = "The user's posts or their count", body = PostListResponseDto),
        (status = 400, description = "Missing user id"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn user_posts(
    State(state): State<AppState>,
    Query(query): Query<UserPostsQuery>,
) -> AppResult<Response> {
    let Some(user_id) = present_id(query.user_id) else {
        return Err(AppError::BadRequest("User ID is required".to_string()));
    };

    let count_only = matches!(query.count_only.as_deref(), Some("1") | Some("true"));
    if count_only {
        let count = state.post_service.user_post_count(user_id).await?;
        return Ok(Json(CountResponseDto {
            status: "success",
            count,
        })
        .into_response());
    }

    let posts = state.post_service.user_posts(user_id).await?;
    Ok(Json(PostListResponseDto {
        status: "success",
        posts: posts.into_iter().map(PostSummaryDto::from).collect(),
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = UpdatePostResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Not the owner or post missing"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<Json<UpdatePostResponseDto>> {
    let Some(user_id) = present_id(dto.user_id) else {
        return Err(AppError::BadRequest(
            "Post ID and user ID are required".to_string(),
        ));
    };
    let (Some(title), Some(content), Some(category), Some(institution)) = (
        present(dto.title),
        present(dto.content),
        present(dto.category),
        present(dto.institution),
    ) else {
        return Err(AppError::BadRequest(
            "Title, content, category and institution are required".to_string(),
        ));
    };

    let detail = state
        .post_service
        .update_post(
            user_id,
            id,
            UpdatePostRequest {
                title,
                content,
                category,
                institution,
                images: dto.images,
            },
        )
        .await?;

    Ok(Json(UpdatePostResponseDto {
        status: "success",
        message: "Post updated successfully".to_string(),
        post: detail.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id"),
        ("user_id" = i64, Query, description = "Requesting owner id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponseDto),
        (status = 400, description = "Missing user id"),
        (status = 403, description = "Not the owner or post missing"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ViewerQuery>,
) -> AppResult<Json<MessageResponseDto>> {
    let Some(user_id) = present_id(query.user_id) else {
        return Err(AppError::BadRequest(
            "Post ID and user ID are required".to_string(),
        ));
    };

    state.post_service.delete_post(user_id, id).await?;

    Ok(Json(MessageResponseDto::success(
        "Post deleted successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/posts/toggle_like",
    tag = "posts",
    request_body = ToggleLikeDto,
    responses(
        (status = 200, description = "Support removed", body = ToggleLikeResponseDto),
        (status = 201, description = "Support added", body = ToggleLikeResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn toggle_like(
    State(state): State<AppState>,
    Json(dto): Json<ToggleLikeDto>,
) -> AppResult<(StatusCode, Json<ToggleLikeResponseDto>)> {
    let (Some(post_id), Some(user_id)) = (present_id(dto.post_id), present_id(dto.user_id)) else {
        return Err(AppError::BadRequest(
            "Post ID and user ID are required to toggle support.".to_string(),
        ));
    };

    let toggle = state.post_service.toggle_like(post_id, user_id).await?;

    let (status, message) = if toggle.liked {
        (StatusCode::CREATED, "Post supported successfully")
    } else {
        (StatusCode::OK, "Support removed successfully")
    };

    Ok((
        status,
        Json(ToggleLikeResponseDto {
            status: "success",
            message: message.to_string(),
            liked: toggle.liked,
            likes_count: toggle.likes_count,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/posts/upload_image",
    tag = "posts",
    responses(
        (status = 200, description = "File uploaded", body = UploadImageResponseDto),
        (status = 400, description = "Missing file or invalid format/size"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadImageResponseDto>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("No file uploaded or file upload error: {err}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let declared_mime = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|err| {
            AppError::BadRequest(format!("No file uploaded or file upload error: {err}"))
        })?;

        let stored = state
            .media
            .save(&original_name, declared_mime.as_deref(), &data)
            .await?;

        return Ok(Json(UploadImageResponseDto {
            status: "success",
            message: "File uploaded successfully".to_string(),
            file_path: stored.public_path,
        }));
    }

    Err(AppError::BadRequest(
        "No file uploaded or file upload error: missing 'image' field".to_string(),
    ))
}
