use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    errors::AuthError,
    repo_types::{ProfileUpdate, Role, User},
    services::{AuthOutput, LoginInput, RegisterInput},
};

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: String,
}

impl RegisterRequest {
    /// Boundary checks: address shape, password length and a known role.
    pub fn into_input(self) -> Result<RegisterInput, AuthError> {
        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidInput("invalid email".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let role = self.role.trim().parse::<Role>().map_err(AuthError::InvalidInput)?;

        Ok(RegisterInput {
            email,
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            role,
        })
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn into_input(self) -> Result<LoginInput, AuthError> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() {
            return Err(AuthError::InvalidInput(
                "email and password are required".into(),
            ));
        }
        Ok(LoginInput {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(r: UpdateProfileRequest) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            first_name: trim(r.first_name),
            last_name: trim(r.last_name),
            phone_number: trim(r.phone_number),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        Self {
            token: out.token,
            user: out.user.into(),
            expires_at: out.expires_at,
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: Role,
    pub active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            phone_number: u.phone_number,
            role: u.role,
            active: u.active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
