use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    errors::AuthError,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::UserRepository,
    repo_types::{ProfileUpdate, Role, User},
};
use crate::{
    config::{ConfigError, JwtConfig},
    db::StoreError,
};

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
    pub expires_at: OffsetDateTime,
}

/// Registration, login and token validation over a credential store.
///
/// Holds no mutable state of its own: the signing keys are fixed at
/// construction and every request goes straight to the repository.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: &JwtConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            users,
            keys: JwtKeys::new(jwt)?,
        })
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    pub async fn register(&self, input: RegisterInput) -> Result<AuthOutput, AuthError> {
        match self.users.get_by_email(&input.email).await {
            Ok(_) => {
                warn!(email = %input.email, "email already registered");
                return Err(AuthError::AlreadyExists);
            }
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(persistence("get_by_email", e)),
        }

        validate_registration(&input)?;

        let password_hash = hash_password(&input.password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            AuthError::Internal(e.to_string())
        })?;

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
            role: input.role,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await.map_err(|e| match e {
            // lost a race with a concurrent registration of the same email
            StoreError::Conflict(_) => {
                warn!(email = %user.email, "email already registered");
                AuthError::AlreadyExists
            }
            other => persistence("create user", other),
        })?;

        let output = self.issue(user)?;
        info!(
            user_id = %output.user.id,
            email = %output.user.email,
            role = %output.user.role,
            "user registered"
        );
        Ok(output)
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthOutput, AuthError> {
        let user = match self.users.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                warn!(email = %input.email, "login unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(persistence("get_by_email", e)),
        };

        let ok = verify_password(&input.password, &user.password_hash).map_err(|e| {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            AuthError::Internal(e.to_string())
        })?;
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.active {
            warn!(user_id = %user.id, "login on inactive account");
            return Err(AuthError::InactiveAccount);
        }

        let output = self.issue(user)?;
        info!(user_id = %output.user.id, email = %output.user.email, "user logged in");
        Ok(output)
    }

    /// Resolves a bearer token to its user, re-checking existence and activity
    /// on every call.
    pub async fn validate_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        let user = match self.users.get_by_id(claims.sub).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                return Err(AuthError::InvalidToken);
            }
            Err(e) => return Err(persistence("get_by_id", e)),
        };

        if !user.active {
            warn!(user_id = %user.id, "token for inactive account");
            return Err(AuthError::InactiveAccount);
        }
        Ok(user)
    }

    /// Writes only the profile columns; `active` and `role` are left as stored.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, AuthError> {
        let changed: Vec<(&str, &String)> = [
            ("first_name", &update.first_name),
            ("last_name", &update.last_name),
            ("phone_number", &update.phone_number),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name, v)))
        .collect();
        require_non_empty(&changed)?;

        let user = self
            .users
            .update_profile(id, &update, OffsetDateTime::now_utc())
            .await
            .map_err(|e| not_found_or_persistence(id, "update profile", e))?;
        info!(user_id = %id, "profile updated");
        Ok(user)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<User, AuthError> {
        let user = self
            .users
            .set_active(id, active, OffsetDateTime::now_utc())
            .await
            .map_err(|e| not_found_or_persistence(id, "set active", e))?;
        info!(user_id = %id, active, "account activity changed");
        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
        self.users.delete(id).await.map_err(|e| match e {
            StoreError::Conflict(_) => {
                warn!(user_id = %id, "delete refused, user still owns content");
                AuthError::InvalidInput("user still owns content; deactivate instead".into())
            }
            other => not_found_or_persistence(id, "delete user", other),
        })?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>, AuthError> {
        self.users
            .list(limit.clamp(1, 100), offset.max(0))
            .await
            .map_err(|e| persistence("list users", e))
    }

    fn issue(&self, user: User) -> Result<AuthOutput, AuthError> {
        let (token, expires_at) = self.keys.issue(&user).map_err(|e| {
            error!(error = %e, user_id = %user.id, "jwt sign failed");
            AuthError::Internal(e.to_string())
        })?;
        Ok(AuthOutput {
            token,
            user,
            expires_at,
        })
    }
}

fn validate_registration(input: &RegisterInput) -> Result<(), AuthError> {
    require_non_empty(&[
        ("email", &input.email),
        ("password", &input.password),
        ("first_name", &input.first_name),
        ("last_name", &input.last_name),
        ("phone_number", &input.phone_number),
    ])
}

fn require_non_empty(fields: &[(&str, &String)]) -> Result<(), AuthError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AuthError::InvalidInput(format!("{name} is required"))),
        None => Ok(()),
    }
}

fn not_found_or_persistence(id: Uuid, op: &str, e: StoreError) -> AuthError {
    match e {
        StoreError::NotFound => AuthError::NotFound(format!("user {id} not found")),
        other => persistence(op, other),
    }
}

fn persistence(op: &str, e: StoreError) -> AuthError {
    error!(error = %e, op, "credential store failure");
    AuthError::Persistence(e.to_string())
}
