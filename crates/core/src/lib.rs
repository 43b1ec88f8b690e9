//! Gatehouse domain core.
//!
//! Session-gated navigation and the user-role model shared by the HTTP
//! server and the administrative tooling:
//!
//! - [`session`] -- the Session Store, fed once by an [`IdentityProvider`].
//! - [`gate`] -- [`SettlementGate`], the single wait-for-settlement primitive.
//! - [`dispatcher`] -- the root entry decision (always the public landing).
//! - [`guard`] -- the protected-route state machine.
//! - [`store`] -- the [`UserStore`] seam used by role promotion.

pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod guard;
pub mod navigation;
pub mod roles;
pub mod session;
pub mod store;
pub mod types;

pub use gate::SettlementGate;
pub use session::{IdentityError, IdentityProvider, Session, SessionOptions, SessionStore};
pub use store::UserStore;
pub use types::{UserIdentity, UserRecord};
