//! [`UserStore`] backed by a PostgREST table.

use async_trait::async_trait;
use gatehouse_core::error::CoreError;
use gatehouse_core::roles::UserRole;
use gatehouse_core::store::UserStore;
use gatehouse_core::types::UserRecord;

use crate::rest::PostgrestClient;

pub const DEFAULT_USERS_TABLE: &str = "users";

/// Columns fetched for a [`UserRecord`].
pub const USER_COLUMNS: &[&str] = &["id", "email", "user_role"];

pub struct SupabaseUserStore {
    rest: PostgrestClient,
    table: String,
}

impl SupabaseUserStore {
    pub fn new(rest: PostgrestClient, table: impl Into<String>) -> Self {
        Self {
            rest,
            table: table.into(),
        }
    }
}

#[async_trait]
impl UserStore for SupabaseUserStore {
    async fn find_by_email(&self, email: &str) -> Result<UserRecord, CoreError> {
        match self
            .rest
            .find_by_email::<UserRecord>(&self.table, email, USER_COLUMNS)
            .await? {
            Some(record) => Ok(record),
            None => Err(CoreError::NotFound {
                entity: "user",
                key: email.to_string(),
            }),
        }
    }

    async fn set_role(&self, id: &str, role: UserRole) -> Result<(), CoreError> {
        let fields = serde_json::json!({ "user_role": role.as_str() });
        self.rest.update_by_id(&self.table, id, &fields).await?;
        Ok(())
    }
}
