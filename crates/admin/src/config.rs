use validator::ValidateEmail;

use gatehouse_supabase::users::DEFAULT_USERS_TABLE;

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_SERVICE_KEY: &str = "SUPABASE_SERVICE_KEY";
pub const ENV_USER_EMAIL: &str = "USER_EMAIL";
pub const ENV_USERS_TABLE: &str = "USERS_TABLE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("USER_EMAIL is not a valid email address: {0}")]
    InvalidEmail(String),
}

/// Promotion settings loaded from the environment.
///
/// | Env Var                | Required | Default |
/// |------------------------|----------|---------|
/// | `SUPABASE_URL`         | **yes**  | --      |
/// | `SUPABASE_SERVICE_KEY` | **yes**  | --      |
/// | `USER_EMAIL`           | **yes**  | --      |
/// | `USERS_TABLE`          | no       | `users` |
#[derive(Clone)]
pub struct PromoteConfig {
    pub supabase_url: String,
    pub service_key: String,
    pub user_email: String,
    pub users_table: String,
}

impl std::fmt::Debug for PromoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromoteConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_key", &"<redacted>")
            .field("user_email", &self.user_email)
            .field("users_table", &self.users_table)
            .finish()
    }
}

impl PromoteConfig {
    /// Load from an arbitrary variable source. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let supabase_url = get(ENV_SUPABASE_URL);
        let service_key = get(ENV_SUPABASE_SERVICE_KEY);
        let user_email = get(ENV_USER_EMAIL);

        let (Some(supabase_url), Some(service_key), Some(user_email)) =
            (supabase_url.clone(), service_key.clone(), user_email.clone())
        else {
            let missing = [
                (ENV_SUPABASE_URL, supabase_url.is_none()),
                (ENV_SUPABASE_SERVICE_KEY, service_key.is_none()),
                (ENV_USER_EMAIL, user_email.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(ConfigError::Missing(missing));
        };

        if !user_email.validate_email() {
            return Err(ConfigError::InvalidEmail(user_email));
        }

        Ok(Self {
            supabase_url,
            service_key,
            user_email,
            users_table: get(ENV_USERS_TABLE).unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
        })
    }
}
