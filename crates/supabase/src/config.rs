use std::time::Duration;

/// Timeout applied to every Supabase HTTP request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`, without trailing slash.
    pub url: String,
    /// Key sent as the `apikey` header (anon key or service-role key).
    pub api_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

/// Build the shared HTTP client used by the Supabase clients.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}
