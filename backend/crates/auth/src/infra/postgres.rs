//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credential::Credential, user::Profile, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Column list shared by every user SELECT (never includes the hash)
pub const USER_COLUMNS: &str = r#"
    id,
    username,
    email,
    profile_picture,
    cover_picture,
    bio,
    city,
    from_place,
    relationship,
    followers,
    followings,
    is_admin,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (
                id,
                username,
                email,
                profile_picture,
                cover_picture,
                followers,
                followings,
                is_admin,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(&user.profile.profile_picture)
        .bind(&user.profile.cover_picture)
        .bind(to_uuids(&user.followers))
        .bind(to_uuids(&user.followings))
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            if is_unique_violation(&e) {
                return Err(AuthError::EmailTaken);
            }
            return Err(e.into());
        }

        sqlx::query(
            r#"
            INSERT INTO user_credentials (user_id, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.password_hash.as_phc_string())
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        user: &User,
        credential: Option<&Credential>,
    ) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                profile_picture = $4,
                cover_picture = $5,
                bio = $6,
                city = $7,
                from_place = $8,
                relationship = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(&user.profile.profile_picture)
        .bind(&user.profile.cover_picture)
        .bind(&user.profile.bio)
        .bind(&user.profile.city)
        .bind(&user.profile.from)
        .bind(&user.profile.relationship)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await;

        // Dropping `tx` on the error paths rolls the transaction back
        if let Err(e) = updated {
            if is_unique_violation(&e) {
                return Err(AuthError::EmailTaken);
            }
            return Err(e.into());
        }

        if let Some(credential) = credential {
            sqlx::query(
                r#"
                UPDATE user_credentials SET
                    password_hash = $2,
                    updated_at = $3
                WHERE user_id = $1
                "#,
            )
            .bind(credential.user_id.as_uuid())
            .bind(credential.password_hash.as_phc_string())
            .bind(credential.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        // user_credentials rows go with it (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAuthRepository {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, password_hash, created_at, updated_at
            FROM user_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }
}

// ============================================================================
// Row Types (for sqlx mapping)
// ============================================================================

fn to_uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

/// Raw `users` row; public so the social store can reuse the mapping
#[derive(sqlx::FromRow)]
pub struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    profile_picture: String,
    cover_picture: String,
    bio: Option<String>,
    city: Option<String>,
    from_place: Option<String>,
    relationship: Option<String>,
    followers: Vec<Uuid>,
    followings: Vec<Uuid>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            profile: Profile {
                profile_picture: self.profile_picture,
                cover_picture: self.cover_picture,
                bio: self.bio,
                city: self.city,
                from: self.from_place,
                relationship: self.relationship,
            },
            followers: self.followers.into_iter().map(UserId::from_uuid).collect(),
            followings: self.followings.into_iter().map(UserId::from_uuid).collect(),
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
