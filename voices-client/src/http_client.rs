use std::time::Duration;

use reqwest::{Client, Method, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{VoicesClientError, VoicesClientResult};
use crate::models::{
    Comment, LikeToggle, PlatformStats, PostDetail, PostInput, PostSummary, User,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequestDto<'a> {
    user_id: i64,
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateProfileRequestDto<'a> {
    user_id: i64,
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PostRequestDto<'a> {
    user_id: i64,
    title: &'a str,
    content: &'a str,
    category: &'a str,
    institution: &'a str,
    images: &'a [String],
}

#[derive(Debug, Serialize)]
struct ToggleLikeRequestDto {
    post_id: i64,
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct CreateCommentRequestDto<'a> {
    post_id: i64,
    user_id: i64,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteCommentRequestDto {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponseDto {
    user: User,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponseDto {
    post_id: i64,
}

#[derive(Debug, Deserialize)]
struct PostDetailResponseDto {
    post: PostDetail,
}

#[derive(Debug, Deserialize)]
struct PostListResponseDto {
    posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize)]
struct CountResponseDto {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct CreateCommentResponseDto {
    comment: Comment,
}

#[derive(Debug, Deserialize)]
struct DeleteCommentResponseDto {
    post_id: i64,
}

#[derive(Debug, Deserialize)]
struct UploadImageResponseDto {
    file_path: String,
}

#[derive(Debug, Deserialize)]
struct StatsResponseDto {
    stats: PlatformStats,
}

#[derive(Debug, Deserialize)]
struct MessageResponseDto {
    #[allow(dead_code)]
    message: String,
}

/// HTTP client for the voices-server REST API.
///
/// There are no session tokens: operations acting on behalf of a user take
/// an explicit `user_id`, mirroring the server contract.
#[derive(Debug, Clone)]
pub struct VoicesClient {
    base_url: String,
    client: Client,
}

impl VoicesClient {
    /// Creates a client pointing at the server's base URL, e.g.
    /// `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> VoicesClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .message
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        VoicesClientError::from_http_status(status, Some(message))
    }

    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> VoicesClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(VoicesClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(VoicesClientError::from_reqwest)
    }

    async fn get_json<TQuery, TRes>(&self, path: &str, query: &TQuery) -> VoicesClientResult<TRes>
    where
        TQuery: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(VoicesClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(VoicesClientError::from_reqwest)
    }

    /// Registers a new account.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> VoicesClientResult<()> {
        let payload = RegisterRequestDto {
            name,
            email,
            password,
        };
        let _: MessageResponseDto = self
            .send_json(Method::POST, "/api/auth/register", &payload)
            .await?;
        Ok(())
    }

    /// Logs in and returns the account; the same generic error covers an
    /// unknown email and a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> VoicesClientResult<User> {
        let payload = LoginRequestDto { email, password };
        let dto: UserResponseDto = self
            .send_json(Method::POST, "/api/auth/login", &payload)
            .await?;
        Ok(dto.user)
    }

    /// Fetches account info by id.
    pub async fn user_info(&self, user_id: i64) -> VoicesClientResult<User> {
        let dto: UserResponseDto = self
            .get_json("/api/auth/user_info", &[("user_id", user_id)])
            .await?;
        Ok(dto.user)
    }

    /// Changes the account password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> VoicesClientResult<()> {
        let payload = ChangePasswordRequestDto {
            user_id,
            current_password,
            new_password,
        };
        let _: MessageResponseDto = self
            .send_json(Method::POST, "/api/auth/change_password", &payload)
            .await?;
        Ok(())
    }

    /// Updates the account's name and email.
    pub async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> VoicesClientResult<User> {
        let payload = UpdateProfileRequestDto {
            user_id,
            name,
            email,
        };
        let dto: UserResponseDto = self
            .send_json(Method::POST, "/api/auth/update_profile", &payload)
            .await?;
        Ok(dto.user)
    }

    /// Publishes a post and returns its id.
    pub async fn create_post(&self, user_id: i64, post: &PostInput) -> VoicesClientResult<i64> {
        let payload = PostRequestDto {
            user_id,
            title: &post.title,
            content: &post.content,
            category: &post.category,
            institution: &post.institution,
            images: &post.images,
        };
        let dto: CreatePostResponseDto = self
            .send_json(Method::POST, "/api/posts", &payload)
            .await?;
        Ok(dto.post_id)
    }

    /// Fetches one post with comments and support counters. Pass the viewer
    /// id to resolve the `user_liked` flag.
    pub async fn get_post(
        &self,
        post_id: i64,
        viewer_id: Option<i64>,
    ) -> VoicesClientResult<PostDetail> {
        let query: Vec<(&str, i64)> = viewer_id
            .map(|id| vec![("user_id", id)])
            .unwrap_or_default();
        let dto: PostDetailResponseDto = self
            .get_json(&format!("/api/posts/{post_id}"), &query)
            .await?;
        Ok(dto.post)
    }

    /// Returns the newest posts.
    pub async fn recent_posts(&self, limit: Option<i64>) -> VoicesClientResult<Vec<PostSummary>> {
        let query: Vec<(&str, i64)> = limit.map(|l| vec![("limit", l)]).unwrap_or_default();
        let dto: PostListResponseDto = self.get_json("/api/posts/recent", &query).await?;
        Ok(dto.posts)
    }

    /// Returns the most supported posts.
    pub async fn trending_posts(
        &self,
        limit: Option<i64>,
    ) -> VoicesClientResult<Vec<PostSummary>> {
        let query: Vec<(&str, i64)> = limit.map(|l| vec![("limit", l)]).unwrap_or_default();
        let dto: PostListResponseDto = self.get_json("/api/posts/trending", &query).await?;
        Ok(dto.posts)
    }

    /// Lists a user's own posts, newest first.
    pub async fn user_posts(&self, user_id: i64) -> VoicesClientResult<Vec<PostSummary>> {
        let dto: PostListResponseDto = self
            .get_json("/api/posts/user", &[("user_id", user_id)])
            .await?;
        Ok(dto.posts)
    }

    /// Counts a user's posts without fetching them.
    pub async fn user_post_count(&self, user_id: i64) -> VoicesClientResult<i64> {
        let dto: CountResponseDto = self
            .get_json(
                "/api/posts/user",
                &[
                    ("user_id", user_id.to_string()),
                    ("count_only", "1".to_string()),
                ],
            )
            .await?;
        Ok(dto.count)
    }

    /// Replaces a post's content; only the owner may do this.
    pub async fn update_post(
        &self,
        user_id: i64,
        post_id: i64,
        post: &PostInput,
    ) -> VoicesClientResult<PostDetail> {
        let payload = PostRequestDto {
            user_id,
            title: &post.title,
            content: &post.content,
            category: &post.category,
            institution: &post.institution,
            images: &post.images,
        };
        let dto: PostDetailResponseDto = self
            .send_json(Method::PUT, &format!("/api/posts/{post_id}"), &payload)
            .await?;
        Ok(dto.post)
    }

    /// Deletes a post and everything attached to it; only the owner may do
    /// this.
    pub async fn delete_post(&self, user_id: i64, post_id: i64) -> VoicesClientResult<()> {
        let url = self.endpoint(&format!("/api/posts/{post_id}"));

        let response = self
            .client
            .delete(url)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(VoicesClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }

    /// Toggles support on a post and returns the fresh state.
    pub async fn toggle_like(&self, post_id: i64, user_id: i64) -> VoicesClientResult<LikeToggle> {
        let payload = ToggleLikeRequestDto { post_id, user_id };
        self.send_json(Method::POST, "/api/posts/toggle_like", &payload)
            .await
    }

    /// Adds a comment to a post.
    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> VoicesClientResult<Comment> {
        let payload = CreateCommentRequestDto {
            post_id,
            user_id,
            content,
        };
        let dto: CreateCommentResponseDto = self
            .send_json(Method::POST, "/api/comments", &payload)
            .await?;
        Ok(dto.comment)
    }

    /// Deletes one's own comment, returning the parent post id.
    pub async fn delete_comment(
        &self,
        comment_id: i64,
        user_id: i64,
    ) -> VoicesClientResult<i64> {
        let payload = DeleteCommentRequestDto { user_id };
        let dto: DeleteCommentResponseDto = self
            .send_json(Method::DELETE, &format!("/api/comments/{comment_id}"), &payload)
            .await?;
        Ok(dto.post_id)
    }

    /// Counts a user's comments.
    pub async fn user_comment_count(&self, user_id: i64) -> VoicesClientResult<i64> {
        let dto: CountResponseDto = self
            .get_json("/api/comments/count", &[("user_id", user_id)])
            .await?;
        Ok(dto.count)
    }

    /// Uploads one image and returns its public path, ready to be attached
    /// to a post.
    pub async fn upload_image(
        &self,
        filename: &str,
        mime: &str,
        data: Vec<u8>,
    ) -> VoicesClientResult<String> {
        let part = multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(VoicesClientError::Http)?;
        let form = multipart::Form::new().part("image", part);

        let url = self.endpoint("/api/posts/upload_image");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(VoicesClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dto = response
            .json::<UploadImageResponseDto>()
            .await
            .map_err(VoicesClientError::from_reqwest)?;
        Ok(dto.file_path)
    }

    /// Fetches platform-wide counters.
    pub async fn platform_stats(&self) -> VoicesClientResult<PlatformStats> {
        let no_query: [(&str, i64); 0] = [];
        let dto: StatsResponseDto = self.get_json("/api/stats", &no_query).await?;
        Ok(dto.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = VoicesClient::new("http://localhost:8080/");
        let full = client.endpoint("/api/posts/recent");
        assert_eq!(full, "http://localhost:8080/api/posts/recent");
    }

    #[test]
    fn post_detail_envelope_decodes() {
        let body = r#"{
            "status": "success",
            "post": {
                "id": 1,
                "title": "t",
                "content": "c",
                "category": "harassment",
                "institution": "State College",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z",
                "images": ["/api/uploads/posts/a.png"],
                "likes": 0,
                "user_liked": false,
                "user": {"id": 2, "name": "Alice"},
                "comments": []
            }
        }"#;

        let dto: PostDetailResponseDto = serde_json::from_str(body).expect("must decode");
        assert_eq!(dto.post.id, 1);
        assert_eq!(dto.post.likes, 0);
        assert!(dto.post.comments.is_empty());
        assert_eq!(dto.post.user.name, "Alice");
    }

    #[test]
    fn error_envelope_decodes_message() {
        let body = r#"{"status":"error","message":"Email already exists"}"#;
        let dto: ErrorResponseDto = serde_json::from_str(body).expect("must decode");
        assert_eq!(dto.message.as_deref(), Some("Email already exists"));
    }
}
