use gatehouse_core::error::CoreError;

/// Errors from the Supabase HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Supabase returned a non-2xx status code.
    #[error("Supabase API error ({status}): {message}")]
    Api {
        status: u16,
        /// The `message` field of the error body, or the raw body.
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode Supabase response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single-row lookup matched more than one row.
    #[error("Expected at most one row, got {0}")]
    MultipleRows(usize),
}

impl From<SupabaseError> for CoreError {
    fn from(err: SupabaseError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// Pull a human-readable message out of a Supabase error body.
///
/// PostgREST uses `message`, GoTrue uses `msg` or `error_description`.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Return the response unchanged on success, or an [`SupabaseError::Api`]
/// carrying the status and error message.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, SupabaseError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(SupabaseError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(response)
}
