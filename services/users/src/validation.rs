//! Input validation for the create and update payloads

use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{UserFields, UserPayload};
use crate::repositories::UserRepository;

const MAX_STRING_LENGTH: usize = 255;
const MIN_PASSWORD_LENGTH: usize = 8;

/// Per-field validation messages, in the order the fields were checked
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// First message, followed by a count of the remaining ones
    pub fn summary(&self) -> String {
        let mut messages = self.fields.iter().flat_map(|(_, messages)| messages);
        let Some(first) = messages.next() else {
            return "The given data was invalid.".to_string();
        };

        match messages.count() {
            0 => first.clone(),
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Validate the body of `POST /user`
pub async fn validate_create(
    payload: UserPayload,
    users: &UserRepository,
) -> Result<UserFields, ApiError> {
    validate(payload, users, None).await
}

/// Validate the body of `PUT|PATCH /user/{id}`
///
/// Every field is required: an update overwrites the whole record. The user
/// being updated may keep its own email.
pub async fn validate_update(
    payload: UserPayload,
    users: &UserRepository,
    user_id: i64,
) -> Result<UserFields, ApiError> {
    validate(payload, users, Some(user_id)).await
}

async fn validate(
    payload: UserPayload,
    users: &UserRepository,
    except: Option<i64>,
) -> Result<UserFields, ApiError> {
    let mut errors = ValidationErrors::new();

    let name = required_string(&mut errors, "name", payload.name, true);
    let email = required_string(&mut errors, "email", payload.email, true);
    let password = required_string(&mut errors, "password", payload.password, false);

    if let Some(name) = &name {
        if let Err(message) = validate_name(name) {
            errors.add("name", message);
        }
    }

    if let Some(email) = &email {
        match validate_email(email) {
            Ok(()) => {
                if users.email_taken(email, except).await? {
                    errors.add("email", EMAIL_TAKEN);
                }
            }
            Err(message) => errors.add("email", message),
        }
    }

    if let Some(password) = &password {
        if let Err(message) = validate_password(password) {
            errors.add("password", message);
        }
    }

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(UserFields {
            name,
            email,
            password,
        }),
        _ => {
            debug!(errors = %errors, "Rejected user payload");
            Err(ApiError::Validation(errors))
        }
    }
}

/// Message used for both the validator and store-level uniqueness failures
pub const EMAIL_TAKEN: &str = "The email has already been taken.";

/// Extract a non-empty string; `trim` is off for passwords, which are taken
/// verbatim
fn required_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
    trim: bool,
) -> Option<String> {
    match value {
        Some(Value::String(raw)) => {
            let value = if trim { raw.trim().to_string() } else { raw };
            if value.is_empty() {
                errors.add(field, format!("The {} field is required.", field));
                None
            } else {
                Some(value)
            }
        }
        None | Some(Value::Null) => {
            errors.add(field, format!("The {} field is required.", field));
            None
        }
        Some(_) => {
            errors.add(field, format!("The {} field must be a string.", field));
            None
        }
    }
}

/// Validate name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_STRING_LENGTH {
        return Err(format!(
            "The name field must not be greater than {} characters.",
            MAX_STRING_LENGTH
        ));
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.chars().count() > MAX_STRING_LENGTH {
        return Err(format!(
            "The email field must not be greater than {} characters.",
            MAX_STRING_LENGTH
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("The email field must be a valid email address.".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "The password field must be at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}
