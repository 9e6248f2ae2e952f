//! User Name Value Object
//!
//! 表示用のユーザー名。ログインにはメールアドレスを使うため一意性は要求しない。
//!
//! ## 不変条件
//! - NFKC正規化・前後の空白除去の後、長さ 3〜30 文字
//! - 制御文字を含まない

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Name should be between 3-30 characters.")]
pub struct UserNameError;

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        let len = trimmed.chars().count();
        if !(USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len) {
            return Err(UserNameError);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
