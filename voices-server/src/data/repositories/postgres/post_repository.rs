use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{fk_violation_constraint, map_db_error};
use crate::data::post_repository::{
    LikeToggle, NewPost, PostPatch, PostRepository, PostStats, PostSummary, PostWithAuthor,
};
use crate::domain::error::DomainError;
use crate::domain::images::decode_public_images;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    user_name: String,
    title: String,
    content: String,
    category: String,
    institution: String,
    images: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    #[sqlx(flatten)]
    post: PostRow,
    likes_count: i64,
    comments_count: i64,
}

impl From<PostRow> for PostWithAuthor {
    fn from(row: PostRow) -> Self {
        let images = decode_public_images(row.images.as_deref());
        PostWithAuthor {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            title: row.title,
            content: row.content,
            category: row.category,
            institution: row.institution,
            images,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PostSummaryRow> for PostSummary {
    fn from(row: PostSummaryRow) -> Self {
        PostSummary {
            post: row.post.into(),
            likes_count: row.likes_count,
            comments_count: row.comments_count,
        }
    }
}

const SUMMARY_SELECT: &str = r#"
    SELECT p.id,
           p.user_id,
           u.name AS user_name,
           p.title,
           p.content,
           p.category,
           p.institution,
           p.images,
           p.created_at,
           p.updated_at,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (user_id, title, content, category, institution, images)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.institution)
        .bind(&input.images_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if fk_violation_constraint(&err).is_some() {
                DomainError::NotFound("user".to_string())
            } else {
                map_db_error(err)
            }
        })
    }

    async fn get_post_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id,
                   p.user_id,
                   u.name AS user_name,
                   p.title,
                   p.content,
                   p.category,
                   p.institution,
                   p.images,
                   p.created_at,
                   p.updated_at
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(PostWithAuthor::from))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<PostSummary>, DomainError> {
        let sql = format!("{SUMMARY_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, PostSummaryRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn list_trending(&self, limit: i64) -> Result<Vec<PostSummary>, DomainError> {
        let ranked_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT p.id
            FROM posts p
            LEFT JOIN likes l ON l.post_id = p.id
            GROUP BY p.id
            ORDER BY COUNT(l.id) DESC, p.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if ranked_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("{SUMMARY_SELECT} WHERE p.id = ANY($1)");
        let rows = sqlx::query_as::<_, PostSummaryRow>(&sql)
            .bind(&ranked_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        // Re-fetching loses the ranking; restore it.
        let mut by_id: HashMap<i64, PostSummary> = rows
            .into_iter()
            .map(|row| (row.post.id, PostSummary::from(row)))
            .collect();
        Ok(ranked_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<PostSummary>, DomainError> {
        let sql = format!(
            "{SUMMARY_SELECT} WHERE p.user_id = $1 ORDER BY p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PostSummaryRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn count_by_user(&self, user_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3,
                content = $4,
                category = $5,
                institution = $6,
                images = $7,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.category)
        .bind(&patch.institution)
        .bind(&patch.images_json)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post_owned(&self, post_id: i64, owner_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeToggle, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let liked = if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO likes (post_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (post_id, user_id) DO NOTHING
                "#,
            )
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| match fk_violation_constraint(&err) {
                Some(constraint) if constraint.contains("user_id") => {
                    DomainError::NotFound("user".to_string())
                }
                Some(_) => DomainError::NotFound("post".to_string()),
                None => map_db_error(err),
            })?;
            true
        } else {
            false
        };

        let likes_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LikeToggle { liked, likes_count })
    }

    async fn likes_count(&self, post_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn user_liked(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn platform_stats(&self) -> Result<PostStats, DomainError> {
        let total_posts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total_institutions = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT institution) FROM posts WHERE institution <> ''",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(PostStats {
            total_posts,
            total_institutions,
        })
    }
}
