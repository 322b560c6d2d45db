//! Field validation for registration payloads.
//!
//! Runs before the use case so the core only ever sees well-formed input.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use crate::presentation::handlers::user_handler::RegisterRequest;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email should be valid";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// field name -> human readable message
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validate a registration request, collecting at most one message per field.
pub fn validate_register_request(request: &RegisterRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if request.email.trim().is_empty() {
        errors.insert("email", EMAIL_REQUIRED);
    } else if !request.email.validate_email() {
        errors.insert("email", EMAIL_INVALID);
    }

    if request.password.trim().is_empty() {
        errors.insert("password", PASSWORD_REQUIRED);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[rstest]
    #[case("a@x.com", "secret1")]
    #[case("first.last+tag@example.co.jp", "p")]
    fn accepts_well_formed_input(#[case] email: &str, #[case] password: &str) {
        assert!(validate_register_request(&request(email, password)).is_ok());
    }

    #[rstest]
    #[case("", EMAIL_REQUIRED)]
    #[case("   ", EMAIL_REQUIRED)]
    #[case("not-an-email", EMAIL_INVALID)]
    #[case("a@", EMAIL_INVALID)]
    #[case("@x.com", EMAIL_INVALID)]
    fn rejects_bad_email_only(#[case] email: &str, #[case] expected: &str) {
        let errors = validate_register_request(&request(email, "secret1")).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some(&expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_password_only(#[case] password: &str) {
        let errors = validate_register_request(&request("b@x.com", password)).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password"), Some(&PASSWORD_REQUIRED));
    }

    #[rstest]
    fn reports_every_bad_field() {
        let errors = validate_register_request(&request("", "")).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }
}
