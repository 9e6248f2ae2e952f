//! Input Validator
//!
//! Pure field checks for the register and login payloads. Every failing
//! rule contributes one message; nothing short-circuits except the
//! all-fields-empty case.

use platform::password::check_policy;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::WEAK_PASSWORD_MESSAGE,
};

pub const FILL_ALL_FIELDS_MESSAGE: &str = "Please fill all the fields.";

/// Outcome of validating a payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record the error message of a failed check, if any
    pub fn check<T, E: ToString>(&mut self, result: Result<T, E>) {
        if let Err(e) = result {
            self.push(e.to_string());
        }
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }
}

/// Validate a registration payload
pub fn validate_register(user_name: &str, email: &str, password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if user_name.is_empty() && email.is_empty() && password.is_empty() {
        report.push(FILL_ALL_FIELDS_MESSAGE);
        return report;
    }

    report.check(UserName::new(user_name));
    report.check(Email::new(email));
    validate_password(&mut report, password);

    report
}

/// Validate a login payload
///
/// Applies the full strength policy to the password, not just presence.
pub fn validate_login(email: &str, password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if email.is_empty() && password.is_empty() {
        report.push(FILL_ALL_FIELDS_MESSAGE);
        return report;
    }

    report.check(Email::new(email));
    validate_password(&mut report, password);

    report
}

/// Validate only the password strength (used by profile updates)
pub fn validate_password_strength(password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_password(&mut report, password);
    report
}

fn validate_password(report: &mut ValidationReport, password: &str) {
    if check_policy(password).is_err() {
        report.push(WEAK_PASSWORD_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_empty() {
        let report = validate_register("", "", "");
        assert_eq!(report.errors(), [FILL_ALL_FIELDS_MESSAGE]);
    }

    #[test]
    fn test_register_ok() {
        assert!(validate_register("alice", "alice@example.com", "GoodPass1").is_ok());
    }

    #[test]
    fn test_register_collects_every_error() {
        let report = validate_register("al", "not-an-email", "short1");
        assert_eq!(
            report.errors(),
            [
                "Name should be between 3-30 characters.",
                "Please enter a valid email.",
                WEAK_PASSWORD_MESSAGE,
            ]
        );
    }

    #[test]
    fn test_password_vectors() {
        for weak in ["short1", "alllowercase1", "ALLUPPER1", "NoDigitsHere"] {
            let report = validate_register("alice", "alice@example.com", weak);
            assert_eq!(report.errors(), [WEAK_PASSWORD_MESSAGE], "{weak}");
        }
        assert!(validate_password_strength("GoodPass1").is_ok());
    }

    #[test]
    fn test_login_checks_strength() {
        assert!(validate_login("alice@example.com", "GoodPass1").is_ok());
        assert_eq!(
            validate_login("alice@example.com", "weak").errors(),
            [WEAK_PASSWORD_MESSAGE]
        );
        assert_eq!(validate_login("", "").errors(), [FILL_ALL_FIELDS_MESSAGE]);
    }
}
