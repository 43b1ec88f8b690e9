//! Minimal HTML shells for the public and gated surfaces.
//!
//! The markup is intentionally bare; the client bundle mounts into these
//! containers.

use axum::response::{Html, IntoResponse, Response};

const LOADING: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Loading</title></head>
<body>
<div id="skeleton" class="skeleton" aria-busy="true" aria-label="Loading"></div>
</body>
</html>
"#;

const LANDING: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Chat</title></head>
<body>
<main id="chat" data-surface="landing"></main>
</body>
</html>
"#;

const LOGIN: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<main id="login" data-surface="login"></main>
</body>
</html>
"#;

/// Full-screen loading placeholder. The `Refresh` header asks the browser to
/// try again shortly, at which point the session is checked anew.
pub fn loading() -> Response {
    (
        [("refresh", "1"), ("cache-control", "no-store")],
        Html(LOADING),
    )
        .into_response()
}

/// Public landing surface (chat UI).
pub fn landing() -> Response {
    Html(LANDING).into_response()
}

pub fn login() -> Response {
    Html(LOGIN).into_response()
}

/// Shell of the signed-in application.
pub fn dashboard(email: Option<&str>) -> Response {
    let email = escape(email.unwrap_or(""));
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Dashboard</title></head>
<body>
<main id="app" data-surface="dashboard" data-user-email="{email}"></main>
</body>
</html>
"#
    ))
    .into_response()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
