//! User Entity
//!
//! Profile and follow graph for an account. The password hash is NOT part
//! of this entity; it lives in [`Credential`](super::credential::Credential)
//! so every ordinary user load excludes it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_name::UserName};
use kernel::id::UserId;

/// Free-form profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub profile_picture: String,
    pub cover_picture: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub from: Option<String>,
    pub relationship: Option<String>,
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    /// Login identifier (unique, lowercased)
    pub email: Email,
    pub profile: Profile,
    /// Users following this user
    pub followers: Vec<UserId>,
    /// Users this user follows
    pub followings: Vec<UserId>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty profile and no follow edges
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            profile: Profile::default(),
            followers: Vec::new(),
            followings: Vec::new(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_following(&self, other: &UserId) -> bool {
        self.followings.contains(other)
    }

    pub fn is_followed_by(&self, other: &UserId) -> bool {
        self.followers.contains(other)
    }

    // ========================================================================
    // Follow graph (set semantics, self edges ignored)
    // ========================================================================

    /// Add `target` to followings. Returns false if nothing changed.
    pub fn add_following(&mut self, target: UserId) -> bool {
        if target == self.user_id || self.is_following(&target) {
            return false;
        }
        self.followings.push(target);
        self.touch();
        true
    }

    /// Remove `target` from followings. Returns false if nothing changed.
    pub fn remove_following(&mut self, target: &UserId) -> bool {
        let before = self.followings.len();
        self.followings.retain(|id| id != target);
        let changed = self.followings.len() != before;
        if changed {
            self.touch();
        }
        changed
    }

    /// Add `follower` to followers. Returns false if nothing changed.
    pub fn add_follower(&mut self, follower: UserId) -> bool {
        if follower == self.user_id || self.is_followed_by(&follower) {
            return false;
        }
        self.followers.push(follower);
        self.touch();
        true
    }

    /// Remove `follower` from followers. Returns false if nothing changed.
    pub fn remove_follower(&mut self, follower: &UserId) -> bool {
        let before = self.followers.len();
        self.followers.retain(|id| id != follower);
        let changed = self.followers.len() != before;
        if changed {
            self.touch();
        }
        changed
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User::new(
            UserName::new(name).unwrap(),
            Email::new(format!("{name}@example.com")).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let u = user("alice");
        assert!(u.followers.is_empty());
        assert!(u.followings.is_empty());
        assert!(!u.is_admin);
        assert_eq!(u.profile.profile_picture, "");
    }

    #[test]
    fn test_following_is_a_set() {
        let mut a = user("alice");
        let b = user("bob");

        assert!(a.add_following(b.user_id));
        assert!(!a.add_following(b.user_id));
        assert_eq!(a.followings.len(), 1);

        assert!(a.remove_following(&b.user_id));
        assert!(!a.remove_following(&b.user_id));
        assert!(a.followings.is_empty());
    }

    #[test]
    fn test_self_edges_ignored() {
        let mut a = user("alice");
        let own = a.user_id;
        assert!(!a.add_following(own));
        assert!(!a.add_follower(own));
        assert!(a.followings.is_empty() && a.followers.is_empty());
    }
}
