use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::{claims::Claims, errors::TokenError, repo_types::User};
use crate::config::{ConfigError, JwtConfig};

/// Validity window of every issued token.
pub const TOKEN_TTL: Duration = Duration::hours(24);

/// HS256 signing and verification keys, derived once from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Result<Self, ConfigError> {
        if cfg.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        })
    }

    /// Mints a token for `user` expiring [`TOKEN_TTL`] from now.
    pub fn issue(&self, user: &User) -> Result<(String, OffsetDateTime), TokenError> {
        self.sign_at(user, OffsetDateTime::now_utc())
    }

    pub(crate) fn sign_at(
        &self,
        user: &User,
        issued_at: OffsetDateTime,
    ) -> Result<(String, OffsetDateTime), TokenError> {
        let expires_at = issued_at + TOKEN_TTL;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: issued_at.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        debug!(user_id = %user.id, "jwt signed");
        Ok((token, expires_at))
    }

    /// Checks signature, expiry, issuer and audience. Does not consult storage.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}
