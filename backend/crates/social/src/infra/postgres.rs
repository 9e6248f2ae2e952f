//! PostgreSQL Repository Implementations

use auth::domain::User;
use auth::infra::postgres::{USER_COLUMNS, UserRow};
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{Author, Comment, LikeChange, Post};
use crate::domain::follow::{FollowAction, apply_follow};
use crate::domain::repository::{
    AuthorRepository, CommentRepository, FollowChange, FollowRepository, PostRepository,
};
use crate::error::{SocialError, SocialResult};

const POST_COLUMNS: &str = "id, user_id, description, img, likes, created_at, updated_at";

/// PostgreSQL-backed posts, comments and follow graph
#[derive(Clone)]
pub struct PgSocialRepository {
    pool: PgPool,
}

impl PgSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgSocialRepository {
    async fn create_post(&self, post: &Post) -> SocialResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, description, img, likes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.user_id.as_uuid())
        .bind(&post.desc)
        .bind(&post.img)
        .bind(to_uuids(&post.likes))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_post(&self, post_id: &PostId) -> SocialResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update_post(&self, post: &Post) -> SocialResult<()> {
        sqlx::query(
            r#"
            UPDATE posts SET
                description = $2,
                img = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.desc)
        .bind(&post.img)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_post(&self, post_id: &PostId) -> SocialResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn find_posts_by_user(&self, user_id: &UserId) -> SocialResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> SocialResult<Option<(Post, LikeChange)>> {
        // Single statement: concurrent toggles serialize on the row lock
        let row = sqlx::query_as::<_, LikedPostRow>(&format!(
            r#"
            UPDATE posts SET
                likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END,
                updated_at = $3
            WHERE id = $1
            RETURNING {POST_COLUMNS}, $2 = ANY(likes) AS liked
            "#
        ))
        .bind(post_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let change = if r.liked {
                LikeChange::Liked
            } else {
                LikeChange::Unliked
            };
            (r.post.into_post(), change)
        }))
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgSocialRepository {
    async fn create_comment(&self, comment: &Comment) -> SocialResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, user_id, text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment(&self, comment_id: &CommentId) -> SocialResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, text, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> SocialResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn find_comments_by_post(&self, post_id: &PostId) -> SocialResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, text, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }
}

// ============================================================================
// Author Repository Implementation
// ============================================================================

impl AuthorRepository for PgSocialRepository {
    async fn find_authors(&self, user_ids: &[UserId]) -> SocialResult<Vec<Author>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, username, email, profile_picture
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(to_uuids(user_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuthorRow::into_author).collect())
    }
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

async fn lock_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
) -> SocialResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
    ))
    .bind(user_id.as_uuid())
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(UserRow::into_user))
}

async fn write_follow_sets(tx: &mut Transaction<'_, Postgres>, user: &User) -> SocialResult<()> {
    sqlx::query(
        r#"
        UPDATE users SET
            followers = $2,
            followings = $3,
            updated_at = $4
        WHERE id = $1
        "#,
    )
    .bind(user.user_id.as_uuid())
    .bind(to_uuids(&user.followers))
    .bind(to_uuids(&user.followings))
    .bind(user.updated_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

impl FollowRepository for PgSocialRepository {
    async fn change_follow(
        &self,
        caller: &UserId,
        target: &UserId,
        action: FollowAction,
    ) -> SocialResult<FollowChange> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in id order so A->B and B->A cannot deadlock
        let (first, second) = if caller <= target {
            (caller, target)
        } else {
            (target, caller)
        };
        let first_user = lock_user(&mut tx, first).await?;
        let second_user = lock_user(&mut tx, second).await?;
        let (caller_user, target_user) = if first == caller {
            (first_user, second_user)
        } else {
            (second_user, first_user)
        };

        let mut target_user = target_user.ok_or(SocialError::UserNotFound)?;
        let mut caller_user = caller_user
            .ok_or_else(|| SocialError::Internal("Caller vanished during follow".to_string()))?;

        let outcome = apply_follow(action, &mut caller_user, &mut target_user)?;

        write_follow_sets(&mut tx, &caller_user).await?;
        write_follow_sets(&mut tx, &target_user).await?;

        tx.commit().await?;

        Ok(FollowChange {
            outcome,
            caller: caller_user,
            target: target_user,
        })
    }
}

// ============================================================================
// Row Types (for sqlx mapping)
// ============================================================================

fn to_uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    description: String,
    img: Option<String>,
    likes: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            desc: self.description,
            img: self.img,
            likes: self.likes.into_iter().map(UserId::from_uuid).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LikedPostRow {
    #[sqlx(flatten)]
    post: PostRow,
    liked: bool,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.id),
            post_id: PostId::from_uuid(self.post_id),
            user_id: UserId::from_uuid(self.user_id),
            text: self.text,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: Uuid,
    username: String,
    email: String,
    profile_picture: String,
}

impl AuthorRow {
    fn into_author(self) -> Author {
        Author {
            user_id: UserId::from_uuid(self.id),
            user_name: self.username,
            email: self.email,
            profile_picture: self.profile_picture,
        }
    }
}
