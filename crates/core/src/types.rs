use serde::{Deserialize, Deserializer, Serialize};

use crate::roles::UserRole;

/// Identity issued by the external identity provider.
///
/// Opaque to this crate beyond its id and (optional) email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
        }
    }
}

/// A row of the users table in the external data store, keyed by email.
///
/// `id` may be stored as text (uuid) or as an integer key; both decode to a
/// string. `user_role` may be NULL for rows that never had a role assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "text_or_integer")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_role: Option<String>,
}

impl UserRecord {
    /// The stored role, if set and one of the known [`UserRole`] values.
    pub fn role(&self) -> Option<UserRole> {
        self.user_role.as_deref().and_then(|role| role.parse().ok())
    }
}

fn text_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Text(String),
        Integer(i64),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Text(text) => text,
        Key::Integer(n) => n.to_string(),
    })
}
