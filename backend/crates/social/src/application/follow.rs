//! Follow Use Case

use std::sync::Arc;

use auth::domain::User;

use crate::application::guard::parse_user_id;
use crate::domain::follow::{FollowAction, check_target};
use crate::domain::repository::{FollowChange, FollowRepository};
use crate::error::SocialResult;

pub struct FollowUseCase<F>
where
    F: FollowRepository,
{
    follows: Arc<F>,
}

impl<F> FollowUseCase<F>
where
    F: FollowRepository,
{
    pub fn new(follows: Arc<F>) -> Self {
        Self { follows }
    }

    /// ## Returns
    /// * `SelfFollow` / `SelfUnfollow` - caller targeted itself
    /// * `UserNotFound` - malformed or unknown target
    /// * `NotFollowing` - explicit unfollow without an edge
    pub async fn execute(
        &self,
        caller: &User,
        raw_target: &str,
        action: FollowAction,
    ) -> SocialResult<FollowChange> {
        let target = parse_user_id(raw_target)?;
        check_target(action, &caller.user_id, &target)?;

        let change = self
            .follows
            .change_follow(&caller.user_id, &target, action)
            .await?;

        tracing::info!(
            user_id = %caller.user_id,
            target_id = %target,
            outcome = ?change.outcome,
            "Follow graph changed"
        );

        Ok(change)
    }
}
