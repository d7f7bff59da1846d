use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Role;

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String,
    pub role: Role,
    pub iat: i64,      // issued at (unix timestamp)
    pub exp: i64,      // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}
