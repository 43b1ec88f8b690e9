//! Persistence seam for user records.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::roles::UserRole;
use crate::types::UserRecord;

/// Single round-trip access to user rows in the external data store.
///
/// Implementations perform no local caching; every call is one request.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up exactly one record by email.
    ///
    /// Returns [`CoreError::NotFound`] when no row matches.
    async fn find_by_email(&self, email: &str) -> Result<UserRecord, CoreError>;

    /// Set the `user_role` column of the row with the given id.
    async fn set_role(&self, id: &str, role: UserRole) -> Result<(), CoreError>;
}
