use std::time::Duration;

use gatehouse_core::navigation::{LOGIN_PATH, ROOT_PATH};
use gatehouse_core::session::SessionOptions;

/// Server configuration loaded from environment variables.
///
/// All fields except the Supabase connection have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bound on each identity check; `0` in the environment disables it.
    pub session_timeout: Option<Duration>,
    /// How long a gated page waits for settlement before answering with the
    /// loading placeholder.
    pub render_wait: Duration,
    /// Where the guard sends visitors without a session.
    pub login_path: String,
    /// Supabase project URL.
    pub supabase_url: String,
    /// Supabase anon key, sent as `apikey` to Supabase Auth.
    pub supabase_anon_key: String,
    /// When set, access tokens are verified locally with this secret.
    pub jwt_secret: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_TIMEOUT_MS`   | `10000`                    |
    /// | `RENDER_WAIT_MS`       | `2000`                     |
    /// | `LOGIN_PATH`           | `/login`                   |
    /// | `SUPABASE_URL`         | required                   |
    /// | `SUPABASE_ANON_KEY`    | required                   |
    /// | `SUPABASE_JWT_SECRET`  | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on a missing Supabase setting, an unparsable number, or a
    /// `LOGIN_PATH` rejected by [`check_login_path`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_timeout_ms: u64 = std::env::var("SESSION_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("SESSION_TIMEOUT_MS must be a valid u64");

        let render_wait_ms: u64 = std::env::var("RENDER_WAIT_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("RENDER_WAIT_MS must be a valid u64");

        let login_path = std::env::var("LOGIN_PATH").unwrap_or_else(|_| LOGIN_PATH.into());
        if let Err(e) = check_login_path(&login_path) {
            panic!("Invalid LOGIN_PATH '{login_path}': {e}");
        }

        let supabase_url =
            std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set in the environment");
        let supabase_anon_key = std::env::var("SUPABASE_ANON_KEY")
            .expect("SUPABASE_ANON_KEY must be set in the environment");

        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_timeout: (session_timeout_ms > 0).then(|| Duration::from_millis(session_timeout_ms)),
            render_wait: Duration::from_millis(render_wait_ms),
            login_path,
            supabase_url,
            supabase_anon_key,
            jwt_secret,
        }
    }

    /// Options for the per-request session stores.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            timeout: self.session_timeout,
        }
    }
}

/// Paths routed by the server itself.
const RESERVED_PATHS: &[&str] = &[ROOT_PATH, "/app", "/app/profile", "/health"];

/// Check that `path` can be mounted as the login route.
pub fn check_login_path(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("must start with '/'");
    }
    if path.contains(|c| matches!(c, '{' | '}' | '*')) {
        return Err("must not contain route parameters");
    }
    if RESERVED_PATHS.contains(&path) || path == "/api" || path.starts_with("/api/") {
        return Err("collides with a built-in route");
    }
    Ok(())
}
