//! Per-request identity wiring.
//!
//! Each request carries (at most) one Supabase access token, taken from the
//! `Authorization: Bearer` header or the `sb-access-token` cookie. An
//! [`IdentityBackend`] binds that token to an [`IdentityProvider`] which the
//! request's session store checks once.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use gatehouse_core::session::IdentityProvider;
use gatehouse_supabase::{JwtVerifier, SupabaseAuth};

/// Cookie holding the access token for browser navigation.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Produces the identity provider for one request's access token.
pub trait IdentityBackend: Send + Sync {
    fn provider_for(&self, access_token: Option<String>) -> Arc<dyn IdentityProvider>;
}

impl IdentityBackend for SupabaseAuth {
    fn provider_for(&self, access_token: Option<String>) -> Arc<dyn IdentityProvider> {
        Arc::new(self.session(access_token))
    }
}

impl IdentityBackend for JwtVerifier {
    fn provider_for(&self, access_token: Option<String>) -> Arc<dyn IdentityProvider> {
        Arc::new(self.session(access_token))
    }
}

/// Extract the access token, preferring the bearer header over the cookie.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value_trimmed())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
