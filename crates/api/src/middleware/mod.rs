//! Session extraction and gating.
//!
//! - [`session::RequestSession`] -- one session store per request.
//! - [`guard::require_session`] -- the protected-route guard as middleware.

pub mod guard;
pub mod session;
