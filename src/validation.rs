/**
 * Request Validation
 *
 * Schema checks for every request body the API accepts. Request DTOs
 * deserialize with all fields optional, so a missing field lands here
 * instead of in axum's generic 422 rejection; each check fails with a
 * 400 that names the violated field, and the validated structs carry
 * the typed values the handlers actually use.
 */

use std::str::FromStr;

use crate::auth::handlers::types::{LoginRequest, SignupRequest, UpdateSubscriptionRequest};
use crate::auth::users::Subscription;
use crate::contacts::handlers::ContactRequest;
use crate::error::ApiError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signup payload after validation
#[derive(Debug)]
pub struct ValidatedSignup {
    pub email: String,
    pub password: String,
    pub subscription: Subscription,
}

/// Login payload after validation
#[derive(Debug)]
pub struct ValidatedLogin {
    pub email: String,
    pub password: String,
}

/// Contact payload after validation (shared by POST and PUT)
#[derive(Debug)]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
}

/// Good enough for an account system that verifies addresses by mail:
/// one `@` with a non-empty local part and a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.len() >= 3
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn require<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("\"{field}\" is required"))),
    }
}

fn parse_subscription(raw: &str) -> Result<Subscription, ApiError> {
    Subscription::from_str(raw).map_err(|_| {
        ApiError::bad_request(format!(
            "\"subscription\" must be one of [{}]",
            Subscription::VALUES.join(", ")
        ))
    })
}

/// Validate a signup body: email format, password length, subscription
/// in the enum (defaulting to starter when absent).
pub fn validate_signup(request: &SignupRequest) -> Result<ValidatedSignup, ApiError> {
    let email = require(&request.email, "email")?;
    if !is_valid_email(email) {
        return Err(ApiError::bad_request("\"email\" must be a valid email"));
    }

    let password = require(&request.password, "password")?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "\"password\" must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let subscription = match request.subscription.as_deref() {
        Some(raw) => parse_subscription(raw)?,
        None => Subscription::default(),
    };

    Ok(ValidatedSignup {
        email: email.to_string(),
        password: password.to_string(),
        subscription,
    })
}

/// Validate a login body: both fields present, email well-formed.
pub fn validate_login(request: &LoginRequest) -> Result<ValidatedLogin, ApiError> {
    let email = require(&request.email, "email")?;
    if !is_valid_email(email) {
        return Err(ApiError::bad_request("\"email\" must be a valid email"));
    }
    let password = require(&request.password, "password")?;

    Ok(ValidatedLogin {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Validate a subscription update: the field is required here.
pub fn validate_subscription_update(
    request: &UpdateSubscriptionRequest,
) -> Result<Subscription, ApiError> {
    let raw = require(&request.subscription, "subscription")?;
    parse_subscription(raw)
}

/// Validate a contact body: name is required, the rest is optional.
/// Used for both create and full replace.
pub fn validate_contact(request: &ContactRequest) -> Result<ValidatedContact, ApiError> {
    let name = match request.name.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => return Err(ApiError::bad_request("missing required name field")),
    };

    if let Some(email) = request.email.as_deref() {
        if !email.is_empty() && !is_valid_email(email) {
            return Err(ApiError::bad_request("\"email\" must be a valid email"));
        }
    }

    Ok(ValidatedContact {
        name,
        email: request.email.clone().unwrap_or_default(),
        phone: request.phone.clone().unwrap_or_default(),
        favorite: request.favorite.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: Option<&str>, password: Option<&str>, sub: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
            subscription: sub.map(str::to_string),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn test_signup_valid() {
        let validated =
            validate_signup(&signup(Some("a@x.com"), Some("123456"), Some("pro"))).unwrap();
        assert_eq!(validated.email, "a@x.com");
        assert_eq!(validated.subscription, Subscription::Pro);
    }

    #[test]
    fn test_signup_defaults_to_starter() {
        let validated = validate_signup(&signup(Some("a@x.com"), Some("123456"), None)).unwrap();
        assert_eq!(validated.subscription, Subscription::Starter);
    }

    #[test]
    fn test_signup_missing_email() {
        let err = validate_signup(&signup(None, Some("123456"), None)).unwrap_err();
        assert!(err.message().contains("email"));
    }

    #[test]
    fn test_signup_short_password() {
        let err = validate_signup(&signup(Some("a@x.com"), Some("12345"), None)).unwrap_err();
        assert!(err.message().contains("password"));
    }

    #[test]
    fn test_signup_unknown_subscription() {
        let err =
            validate_signup(&signup(Some("a@x.com"), Some("123456"), Some("gold"))).unwrap_err();
        assert!(err.message().contains("subscription"));
    }

    #[test]
    fn test_subscription_update_requires_field() {
        let err = validate_subscription_update(&UpdateSubscriptionRequest { subscription: None })
            .unwrap_err();
        assert!(err.message().contains("subscription"));

        let tier = validate_subscription_update(&UpdateSubscriptionRequest {
            subscription: Some("business".to_string()),
        })
        .unwrap();
        assert_eq!(tier, Subscription::Business);
    }

    #[test]
    fn test_contact_requires_name() {
        let request = ContactRequest {
            name: None,
            email: Some("bob@x.com".to_string()),
            phone: None,
            favorite: None,
        };
        let err = validate_contact(&request).unwrap_err();
        assert_eq!(err.message(), "missing required name field");
    }

    #[test]
    fn test_contact_defaults() {
        let request = ContactRequest {
            name: Some("Bob".to_string()),
            email: None,
            phone: None,
            favorite: None,
        };
        let validated = validate_contact(&request).unwrap();
        assert_eq!(validated.name, "Bob");
        assert_eq!(validated.email, "");
        assert!(!validated.favorite);
    }
}
