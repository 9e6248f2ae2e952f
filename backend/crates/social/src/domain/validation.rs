//! Input checks for post, comment and profile payloads
//!
//! Same shape as the auth validator: one message per failing rule.

use auth::domain::validation::{ValidationReport, validate_password_strength};
use auth::domain::value_object::{Email, UserName};

pub const POST_DESC_MAX_LENGTH: usize = 500;
pub const BIO_MAX_LENGTH: usize = 200;
pub const PLACE_MAX_LENGTH: usize = 50;

pub const POST_DESC_REQUIRED_MESSAGE: &str = "Post description is required.";
pub const POST_DESC_TOO_LONG_MESSAGE: &str = "Post description should be at most 500 characters.";
pub const COMMENT_TEXT_REQUIRED_MESSAGE: &str = "Comment text is required.";

// ============================================================================
// Posts & comments
// ============================================================================

fn check_desc(report: &mut ValidationReport, desc: &str) {
    if desc.trim().is_empty() {
        report.push(POST_DESC_REQUIRED_MESSAGE);
    } else if desc.chars().count() > POST_DESC_MAX_LENGTH {
        report.push(POST_DESC_TOO_LONG_MESSAGE);
    }
}

/// New post: `desc` is required
pub fn validate_new_post(desc: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_desc(&mut report, desc);
    report
}

/// Post update: `desc` is checked only when present
pub fn validate_post_update(desc: Option<&str>) -> ValidationReport {
    let mut report = ValidationReport::default();
    if let Some(desc) = desc {
        check_desc(&mut report, desc);
    }
    report
}

pub fn validate_comment(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    if text.trim().is_empty() {
        report.push(COMMENT_TEXT_REQUIRED_MESSAGE);
    }
    report
}

// ============================================================================
// Profile
// ============================================================================

/// Fields of a profile update, as received
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileFields<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub city: Option<&'a str>,
    pub from: Option<&'a str>,
    pub relationship: Option<&'a str>,
}

fn check_max(report: &mut ValidationReport, field: &str, value: Option<&str>, max: usize) {
    if value.is_some_and(|v| v.chars().count() > max) {
        report.push(format!("{field} should be at most {max} characters."));
    }
}

pub fn validate_profile_update(fields: &ProfileFields<'_>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(username) = fields.username {
        report.check(UserName::new(username));
    }
    if let Some(email) = fields.email {
        report.check(Email::new(email));
    }
    if let Some(password) = fields.password {
        report.extend(validate_password_strength(password));
    }

    check_max(&mut report, "Bio", fields.bio, BIO_MAX_LENGTH);
    check_max(&mut report, "City", fields.city, PLACE_MAX_LENGTH);
    check_max(&mut report, "From", fields.from, PLACE_MAX_LENGTH);
    check_max(&mut report, "Relationship", fields.relationship, PLACE_MAX_LENGTH);

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_desc_bounds() {
        assert!(validate_new_post("hello").is_ok());
        assert_eq!(validate_new_post("   ").errors(), [POST_DESC_REQUIRED_MESSAGE]);
        assert!(validate_new_post(&"a".repeat(500)).is_ok());
        assert_eq!(
            validate_new_post(&"a".repeat(501)).errors(),
            [POST_DESC_TOO_LONG_MESSAGE]
        );
        assert!(validate_post_update(None).is_ok());
        assert!(!validate_post_update(Some("")).is_ok());
    }

    #[test]
    fn test_comment_text_required() {
        assert!(validate_comment("nice").is_ok());
        assert_eq!(validate_comment("").errors(), [COMMENT_TEXT_REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_profile_update_collects_errors() {
        let long_bio = "b".repeat(201);
        let fields = ProfileFields {
            username: Some("al"),
            password: Some("weak"),
            bio: Some(&long_bio),
            city: Some("Paris"),
            ..Default::default()
        };
        let report = validate_profile_update(&fields);
        assert_eq!(report.errors().len(), 3);
        assert!(report.errors().iter().any(|e| e.starts_with("Bio")));
    }

    #[test]
    fn test_empty_profile_update_is_ok() {
        assert!(validate_profile_update(&ProfileFields::default()).is_ok());
    }
}
