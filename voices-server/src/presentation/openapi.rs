use utoipa::OpenApi;

use crate::presentation::handlers::MessageResponseDto;
use crate::presentation::handlers::auth::{
    ChangePasswordDto, LoginDto, LoginResponseDto, ProfileResponseDto, RegisterDto,
    UpdateProfileDto, UserDto, UserInfoResponseDto,
};
use crate::presentation::handlers::comments::{
    CreateCommentDto, CreateCommentResponseDto, DeleteCommentDto, DeleteCommentResponseDto,
};
use crate::presentation::handlers::posts::{
    AuthorDto, CommentDto, CountResponseDto, CreatePostDto, CreatePostResponseDto,
    PostDetailDto, PostDetailResponseDto, PostListResponseDto, PostSummaryDto, ToggleLikeDto,
    ToggleLikeResponseDto, UpdatePostDto, UpdatePostResponseDto, UploadImageResponseDto,
};
use crate::presentation::handlers::stats::{StatsDto, StatsResponseDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::change_password,
        crate::presentation::handlers::auth::update_profile,
        crate::presentation::handlers::auth::user_info,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::recent_posts,
        crate::presentation::handlers::posts::trending_posts,
        crate::presentation::handlers::posts::user_posts,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::toggle_like,
        crate::presentation::handlers::posts::upload_image,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::comments::user_comment_count,
        crate::presentation::handlers::media::direct_image,
        crate::presentation::handlers::media::uploaded_image,
        crate::presentation::handlers::media::image_proxy,
        crate::presentation::handlers::stats::platform_stats
    ),
    components(
        schemas(
            MessageResponseDto,
            RegisterDto,
            LoginDto,
            ChangePasswordDto,
            UpdateProfileDto,
            UserDto,
            LoginResponseDto,
            ProfileResponseDto,
            UserInfoResponseDto,
            CreatePostDto,
            UpdatePostDto,
            ToggleLikeDto,
            AuthorDto,
            CommentDto,
            PostDetailDto,
            PostSummaryDto,
            CreatePostResponseDto,
            PostDetailResponseDto,
            UpdatePostResponseDto,
            PostListResponseDto,
            CountResponseDto,
            ToggleLikeResponseDto,
            UploadImageResponseDto,
            CreateCommentDto,
            DeleteCommentDto,
            CreateCommentResponseDto,
            DeleteCommentResponseDto,
            StatsDto,
            StatsResponseDto
        )
    ),
    tags(
        (name = "auth", description = "Account registration, login and profile endpoints"),
        (name = "posts", description = "Post publishing, feeds and support endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "images", description = "Uploaded image delivery endpoints"),
        (name = "stats", description = "Platform statistics")
    )
)]
pub(crate) struct ApiDoc;
