use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_identity(name: &str, email: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name is required".into());
    }
    if email.trim().is_empty() {
        return Err("email is required".into());
    }
    if !is_valid_email(email) {
        return Err("email is not valid".into());
    }
    Ok(())
}

/// Request body for POST /users.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_identity(&self.name, &self.email)?;
        if self.password.is_empty() {
            return Err("password is required".into());
        }
        Ok(())
    }
}

/// Request body for PUT /users/:id. A `password` field is accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_identity(&self.name, &self.email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
