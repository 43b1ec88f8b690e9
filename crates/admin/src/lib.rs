//! One-shot promotion of a user to the privileged role.
//!
//! Driven entirely by the environment (see [`config::PromoteConfig`]):
//! look up the user by email, then set `user_role` to `admin`. Two
//! sequential round trips, no retries.

pub mod config;
pub mod promote;

use gatehouse_core::store::UserStore;
use gatehouse_supabase::users::SupabaseUserStore;
use gatehouse_supabase::{PostgrestClient, SupabaseConfig, SupabaseError};

use crate::config::{ConfigError, PromoteConfig};
use crate::promote::{confirmation, promote_user, PromoteError};

/// Every way a promotion run can fail. Each renders as a one-line
/// diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build Supabase client: {0}")]
    Client(#[from] SupabaseError),

    #[error(transparent)]
    Promote(#[from] PromoteError),
}

/// Load configuration through `env`, connect with `connect`, and promote.
///
/// Configuration is validated before `connect` runs, so a missing variable
/// never reaches the network. Returns the confirmation line on success.
pub async fn run<S, E, C>(env: E, connect: C) -> Result<String, AdminError>
where
    S: UserStore,
    E: Fn(&str) -> Option<String>,
    C: FnOnce(&PromoteConfig) -> Result<S, SupabaseError>,
{
    let config = PromoteConfig::from_lookup(env)?;
    tracing::debug!(table = %config.users_table, "Configuration loaded");

    let store = connect(&config)?;
    let record = promote_user(&store, &config.user_email).await?;
    Ok(confirmation(&record.email))
}

/// Build the PostgREST-backed store authenticated with the service key.
pub fn connect_supabase(config: &PromoteConfig) -> Result<SupabaseUserStore, SupabaseError> {
    let rest = PostgrestClient::new(SupabaseConfig::new(
        &config.supabase_url,
        &config.service_key,
    ))?;
    Ok(SupabaseUserStore::new(rest, &config.users_table))
}
