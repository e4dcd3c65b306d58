use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{MessageResponseDto, present, present_id};
use crate::domain::user::{LoginRequest, RegisterRequest, UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RegisterDto {
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ChangePasswordDto {
    pub(crate) user_id: Option<i64>,
    pub(crate) current_password: Option<String>,
    pub(crate) new_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileDto {
    pub(crate) user_id: Option<i64>,
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UserInfoQuery {
    pub(crate) user_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileResponseDto {
    pub(crate) status: &'static str,
    pub(crate) message: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserInfoResponseDto {
    pub(crate) status: &'static str,
    pub(crate) user: UserDto,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = MessageResponseDto),
        (status = 400, description = "Missing fields, invalid input or duplicate email"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<MessageResponseDto>)> {
    let (Some(name), Some(email), Some(password)) = (
        present(dto.name),
        present(dto.email),
        present(dto.password),
    ) else {
        return Err(AppError::BadRequest(
            "Name, email, and password are required".to_string(),
        ));
    };

    state
        .auth_service
        .register(RegisterRequest {
            name,
            email,
            password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponseDto::success("User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Incorrect email or password"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<Json<LoginResponseDto>> {
    let (Some(email), Some(password)) = (present(dto.email), present(dto.password)) else {
        return Err(AppError::BadRequest(
            "Please provide both email and password to login.".to_string(),
        ));
    };

    let user = state
        .auth_service
        .login(LoginRequest { email, password })
        .await?;

    Ok(Json(LoginResponseDto {
        status: "success",
        message: "Login successful".to_string(),
        user: user.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/change_password",
    tag = "auth",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponseDto),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Current password is incorrect"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn change_password(
    State(state): State<AppState>,
    Json(dto): Json<ChangePasswordDto>,
) -> AppResult<Json<MessageResponseDto>> {
    let (Some(user_id), Some(current_password), Some(new_password)) = (
        present_id(dto.user_id),
        present(dto.current_password),
        present(dto.new_password),
    ) else {
        return Err(AppError::BadRequest(
            "User ID, current password, and new password are required to change password."
                .to_string(),
        ));
    };

    state
        .auth_service
        .change_password(user_id, &current_password, &new_password)
        .await?;

    Ok(Json(MessageResponseDto::success(
        "Password changed successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/update_profile",
    tag = "auth",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponseDto),
        (status = 400, description = "Missing fields or email already in use"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<Json<ProfileResponseDto>> {
    let (Some(user_id), Some(name), Some(email)) = (
        present_id(dto.user_id),
        present(dto.name),
        present(dto.email),
    ) else {
        return Err(AppError::BadRequest(
            "User ID, name, and email are required to update profile.".to_string(),
        ));
    };

    let user = state
        .auth_service
        .update_profile(user_id, UpdateProfileRequest { name, email })
        .await?;

    Ok(Json(ProfileResponseDto {
        status: "success",
        message: "Profile updated successfully".to_string(),
        user: user.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/user_info",
    tag = "auth",
    params(
        ("user_id" = i64, Query, description = "User id")
    ),
    responses(
        (status = 200, description = "User info", body = UserInfoResponseDto),
        (status = 400, description = "Missing user id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn user_info(
    State(state): State<AppState>,
    Query(query): Query<UserInfoQuery>,
) -> AppResult<Json<UserInfoResponseDto>> {
    let Some(user_id) = present_id(query.user_id) else {
        return Err(AppError::BadRequest("User ID is required".to_string()));
    };

    let user = state.auth_service.user_info(user_id).await?;

    Ok(Json(UserInfoResponseDto {
        status: "success",
        user: user.into(),
    }))
}
