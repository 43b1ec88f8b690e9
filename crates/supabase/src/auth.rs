//! Identity resolution against Supabase Auth (GoTrue).

use async_trait::async_trait;
use gatehouse_core::session::{IdentityError, IdentityProvider};
use gatehouse_core::types::UserIdentity;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{build_http_client, SupabaseConfig};
use crate::error::{error_message, SupabaseError};

/// Supabase Auth client. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: reqwest::Client,
    config: SupabaseConfig,
}

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        Ok(Self::with_client(build_http_client()?, config))
    }

    pub fn with_client(client: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    /// Resolve the user owning `access_token`.
    ///
    /// `401`/`403` mean the token is invalid or expired and yield `Ok(None)`.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<UserIdentity>, IdentityError> {
        let response = self
            .client
            .get(self.config.endpoint("/auth/v1/user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::debug!(status = status.as_u16(), "Access token rejected by Supabase Auth");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let user: AuthUserResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidPayload(e.to_string()))?;

        Ok(Some(UserIdentity {
            id: user.id,
            email: user.email,
        }))
    }

    /// Bind an (optional) access token, producing the provider a session
    /// store checks once.
    pub fn session(&self, access_token: Option<String>) -> AccessTokenSession {
        AccessTokenSession {
            auth: self.clone(),
            access_token,
        }
    }
}

/// [`IdentityProvider`] for one access token. No token means nobody is
/// signed in and no request is made.
pub struct AccessTokenSession {
    auth: SupabaseAuth,
    access_token: Option<String>,
}

#[async_trait]
impl IdentityProvider for AccessTokenSession {
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityError> {
        match &self.access_token {
            Some(token) => self.auth.get_user(token).await,
            None => Ok(None),
        }
    }
}
