//! Local verification of Supabase access tokens.
//!
//! Supabase signs access tokens with HS256 using the project's JWT secret and
//! audience `authenticated`. Verifying locally skips the round trip to
//! `/auth/v1/user` at the cost of not seeing server-side revocation.

use async_trait::async_trait;
use gatehouse_core::session::{IdentityError, IdentityProvider};
use gatehouse_core::types::UserIdentity;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Audience Supabase stamps on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// The subset of Supabase access-token claims used here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the auth user's id.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Postgres role, `authenticated` for signed-in users.
    #[serde(default)]
    pub role: Option<String>,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: Option<i64>,
}

#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate signature, expiry and audience, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }

    pub fn session(&self, access_token: Option<String>) -> JwtSession {
        JwtSession {
            verifier: self.clone(),
            access_token,
        }
    }
}

/// [`IdentityProvider`] that verifies one access token locally. Invalid or
/// expired tokens resolve to "no user".
pub struct JwtSession {
    verifier: JwtVerifier,
    access_token: Option<String>,
}

#[async_trait]
impl IdentityProvider for JwtSession {
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityError> {
        let Some(token) = &self.access_token else {
            return Ok(None);
        };
        match self.verifier.verify(token) {
            Ok(claims) => Ok(Some(UserIdentity {
                id: claims.sub,
                email: claims.email,
            })),
            Err(e) => {
                tracing::debug!(error = %e, "Access token failed verification");
                Ok(None)
            }
        }
    }
}
