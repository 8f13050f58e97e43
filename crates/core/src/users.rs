//! User account input validation.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::inventory::validate_required_text;

/// Maximum length of an employee number (the login key).
pub const MAX_EMPLOYEE_NUMBER_LENGTH: usize = 50;

/// Validate an employee number: non-empty, no whitespace, bounded length.
pub fn validate_employee_number(employee_number: &str) -> Result<(), CoreError> {
    if employee_number.is_empty() {
        return Err(CoreError::Validation(
            "employee_number must not be empty".into(),
        ));
    }
    if employee_number.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "employee_number must not contain whitespace".into(),
        ));
    }
    if employee_number.chars().count() > MAX_EMPLOYEE_NUMBER_LENGTH {
        return Err(CoreError::Validation(format!(
            "employee_number must be at most {MAX_EMPLOYEE_NUMBER_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the syntax of an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.to_string().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate the descriptive fields of a new account.
pub fn validate_profile(full_name: &str, section: &str) -> Result<(), CoreError> {
    validate_required_text("full_name", full_name)?;
    validate_required_text("section", section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_number_rules() {
        assert!(validate_employee_number("EMP042").is_ok());
        assert!(validate_employee_number("").is_err());
        assert!(validate_employee_number("EMP 042").is_err());
        assert!(validate_employee_number(&"E".repeat(51)).is_err());
    }

    #[test]
    fn email_syntax() {
        assert!(validate_email("lab.tech@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn profile_requires_name_and_section() {
        assert!(validate_profile("Ada Lovelace", "Chemistry").is_ok());
        assert!(validate_profile("", "Chemistry").is_err());
        assert!(validate_profile("Ada Lovelace", " ").is_err());
    }
}
