//! Supabase clients for Gatehouse.
//!
//! - [`auth::SupabaseAuth`] -- resolves access tokens via `GET /auth/v1/user`.
//! - [`jwt::JwtVerifier`] -- verifies access tokens locally with the project
//!   JWT secret.
//! - [`rest::PostgrestClient`] -- single-row lookups and updates through
//!   PostgREST (`/rest/v1`).
//! - [`users::SupabaseUserStore`] -- the core `UserStore` on top of PostgREST.

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod rest;
pub mod users;

pub use auth::SupabaseAuth;
pub use config::SupabaseConfig;
pub use error::SupabaseError;
pub use jwt::JwtVerifier;
pub use rest::PostgrestClient;
pub use users::SupabaseUserStore;
