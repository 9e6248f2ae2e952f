//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
///
/// Missing fields deserialize as empty strings so the validator can report
/// them together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User fields plus a fresh token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}

impl AuthPayload {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            user: UserResponse::from(user),
            token,
        }
    }
}

// ============================================================================
// User
// ============================================================================

/// A user as returned to its owner. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub cover_picture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    pub followers: Vec<UserId>,
    pub followings: Vec<UserId>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            profile_picture: user.profile.profile_picture.clone(),
            cover_picture: user.profile.cover_picture.clone(),
            bio: user.profile.bio.clone(),
            city: user.profile.city.clone(),
            from: user.profile.from.clone(),
            relationship: user.profile.relationship.clone(),
            followers: user.followers.clone(),
            followings: user.followings.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
