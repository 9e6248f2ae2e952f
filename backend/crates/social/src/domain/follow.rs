//! Follow Graph
//!
//! Decides what a follow request does and applies it to both ends of the
//! edge. Repositories call [`apply_follow`] while holding locks on both
//! user rows, so the two sides never disagree.

use auth::domain::User;
use kernel::id::UserId;

/// What the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    /// Follow if not following, otherwise unfollow
    Toggle,
    /// Unfollow; fails if not following
    Unfollow,
}

/// What actually happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FollowError {
    #[error("You can not follow yourself!!")]
    SelfFollow,

    #[error("You can not unfollow yourself!!")]
    SelfUnfollow,

    #[error("You already do not follow this user!")]
    NotFollowing,
}

/// Reject self-targeted requests before anything is loaded
pub fn check_target(
    action: FollowAction,
    caller: &UserId,
    target: &UserId,
) -> Result<(), FollowError> {
    if caller != target {
        return Ok(());
    }
    Err(match action {
        FollowAction::Toggle => FollowError::SelfFollow,
        FollowAction::Unfollow => FollowError::SelfUnfollow,
    })
}

/// Decide the outcome from the caller's current followings
pub fn decide(action: FollowAction, already_following: bool) -> Result<FollowOutcome, FollowError> {
    match (action, already_following) {
        (FollowAction::Toggle, false) => Ok(FollowOutcome::Followed),
        (FollowAction::Toggle, true) | (FollowAction::Unfollow, true) => {
            Ok(FollowOutcome::Unfollowed)
        }
        (FollowAction::Unfollow, false) => Err(FollowError::NotFollowing),
    }
}

/// Decide and mutate both users in memory
///
/// The caller's `followings` and the target's `followers` always change
/// together.
pub fn apply_follow(
    action: FollowAction,
    caller: &mut User,
    target: &mut User,
) -> Result<FollowOutcome, FollowError> {
    check_target(action, &caller.user_id, &target.user_id)?;

    let outcome = decide(action, caller.is_following(&target.user_id))?;
    match outcome {
        FollowOutcome::Followed => {
            caller.add_following(target.user_id);
            target.add_follower(caller.user_id);
        }
        FollowOutcome::Unfollowed => {
            caller.remove_following(&target.user_id);
            target.remove_follower(&caller.user_id);
        }
    }
    Ok(outcome)
}
