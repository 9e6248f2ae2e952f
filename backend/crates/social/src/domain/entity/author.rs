//! Author Summary
//!
//! The slice of a user that is embedded in post and comment listings.

use std::collections::HashMap;

use auth::domain::User;
use kernel::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub profile_picture: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            profile_picture: user.profile.profile_picture.clone(),
        }
    }
}

/// Authors keyed by user id
///
/// A missing entry means the author account no longer exists.
#[derive(Debug, Clone, Default)]
pub struct Authors(HashMap<UserId, Author>);

impl Authors {
    pub fn get(&self, user_id: &UserId) -> Option<&Author> {
        self.0.get(user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Author> for Authors {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        Self(iter.into_iter().map(|a| (a.user_id, a)).collect())
    }
}

/// Distinct ids in first-seen order
pub fn distinct_ids(ids: impl IntoIterator<Item = UserId>) -> Vec<UserId> {
    let mut out: Vec<UserId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_ids_keeps_first_seen_order() {
        let a = UserId::new();
        let b = UserId::new();
        assert_eq!(distinct_ids([a, b, a, b, a]), vec![a, b]);
        assert!(distinct_ids(Vec::new()).is_empty());
    }

    #[test]
    fn test_authors_lookup() {
        let author = Author {
            user_id: UserId::new(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            profile_picture: String::new(),
        };
        let id = author.user_id;
        let authors: Authors = [author].into_iter().collect();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors.get(&id).map(|a| a.user_name.as_str()), Some("alice"));
        assert!(authors.get(&UserId::new()).is_none());
    }
}
