use gatehouse_core::roles::UserRole;
use gatehouse_core::store::UserStore;
use gatehouse_core::types::UserRecord;

#[derive(Debug, thiserror::Error)]
pub enum PromoteError {
    #[error("User not found or error: {0}")]
    Lookup(String),

    #[error("Error updating user role: {0}")]
    Update(String),
}

/// Look up `email` and set its role to [`UserRole::PRIVILEGED`].
///
/// Exactly one lookup and, if it succeeds, exactly one update. Promoting an
/// already-privileged user rewrites the same value.
pub async fn promote_user<S: UserStore + ?Sized>(
    store: &S,
    email: &str,
) -> Result<UserRecord, PromoteError> {
    let record = store
        .find_by_email(email)
        .await
        .map_err(|e| PromoteError::Lookup(e.to_string()))?;
    match record.role() {
        Some(role) if role.is_privileged() => {
            tracing::info!(user_id = %record.id, "User already has the privileged role")
        }
        _ => tracing::info!(
            user_id = %record.id,
            current_role = record.user_role.as_deref().unwrap_or("<unset>"),
            "Found user"
        ),
    }

    store
        .set_role(&record.id, UserRole::PRIVILEGED)
        .await
        .map_err(|e| PromoteError::Update(e.to_string()))?;
    tracing::info!(user_id = %record.id, role = %UserRole::PRIVILEGED, "Role updated");

    Ok(record)
}

/// Success line printed to stdout.
pub fn confirmation(email: &str) -> String {
    format!("User {email} has been promoted to {}", UserRole::PRIVILEGED)
}
