//! Integration tests for the PostgREST client and the Supabase user store.

mod common;

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{user_row, FakeSupabase, Shared, SERVICE_KEY};
use gatehouse_core::error::CoreError;
use gatehouse_core::roles::UserRole;
use gatehouse_core::store::UserStore;
use gatehouse_core::types::UserRecord;
use gatehouse_supabase::users::{DEFAULT_USERS_TABLE, USER_COLUMNS};
use gatehouse_supabase::{PostgrestClient, SupabaseConfig, SupabaseError, SupabaseUserStore};

fn fake_with(rows: Vec<serde_json::Value>) -> Shared {
    Arc::new(Mutex::new(FakeSupabase {
        rows,
        ..Default::default()
    }))
}

async fn client(fake: &Shared, key: &str) -> PostgrestClient {
    let url = common::spawn(Arc::clone(fake)).await;
    PostgrestClient::new(SupabaseConfig::new(url, key)).expect("client builds")
}

// ---------------------------------------------------------------------------
// PostgrestClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_by_email_returns_single_row() {
    let fake = fake_with(vec![
        user_row("1", "a@x.com", "user"),
        user_row("2", "b@x.com", "user"),
    ]);
    let rest = client(&fake, SERVICE_KEY).await;

    let record: UserRecord = rest
        .find_by_email("users", "b@x.com", USER_COLUMNS)
        .await
        .expect("lookup succeeds")
        .expect("row present");
    assert_eq!(record.id, "2");
    assert_eq!(record.user_role.as_deref(), Some("user"));

    let requests = fake.lock().unwrap().requests.clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].table, "users");
    assert_eq!(requests[0].query["email"], "eq.b@x.com");
    assert_eq!(requests[0].query["select"], "id,email,user_role");
}

#[tokio::test]
async fn find_by_email_encodes_special_characters() {
    let fake = fake_with(vec![user_row("7", "first+tag@x.com", "user")]);
    let rest = client(&fake, SERVICE_KEY).await;

    let record: Option<UserRecord> = rest
        .find_by_email("users", "first+tag@x.com", USER_COLUMNS)
        .await
        .expect("lookup succeeds");
    assert_eq!(record.map(|r| r.id).as_deref(), Some("7"));
}

#[tokio::test]
async fn find_by_email_with_no_match_is_none() {
    let fake = fake_with(vec![user_row("1", "a@x.com", "user")]);
    let rest = client(&fake, SERVICE_KEY).await;

    let record: Option<UserRecord> = rest
        .find_by_email("users", "nobody@x.com", USER_COLUMNS)
        .await
        .expect("lookup succeeds");
    assert!(record.is_none());
}

#[tokio::test]
async fn find_by_email_with_duplicates_is_error() {
    let fake = fake_with(vec![
        user_row("1", "dup@x.com", "user"),
        user_row("2", "dup@x.com", "user"),
    ]);
    let rest = client(&fake, SERVICE_KEY).await;

    let result = rest
        .find_by_email::<UserRecord>("users", "dup@x.com", USER_COLUMNS)
        .await;
    assert_matches!(result, Err(SupabaseError::MultipleRows(2)));
}

#[tokio::test]
async fn find_by_email_decodes_null_role_and_integer_id() {
    let fake = fake_with(vec![
        serde_json::json!({ "id": "1", "email": "a@x.com", "user_role": null }),
        serde_json::json!({ "id": 7, "email": "b@x.com", "user_role": "user" }),
    ]);
    let rest = client(&fake, SERVICE_KEY).await;

    let first: UserRecord = rest
        .find_by_email("users", "a@x.com", USER_COLUMNS)
        .await
        .expect("lookup succeeds")
        .expect("row present");
    assert_eq!(first.id, "1");
    assert!(first.user_role.is_none());

    let second: UserRecord = rest
        .find_by_email("users", "b@x.com", USER_COLUMNS)
        .await
        .expect("lookup succeeds")
        .expect("row present");
    assert_eq!(second.id, "7");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let fake = fake_with(vec![]);
    fake.lock().unwrap().raw_select = Some(r#"[{"email":"a@x.com"}]"#.to_string());
    let rest = client(&fake, SERVICE_KEY).await;

    let result = rest
        .find_by_email::<UserRecord>("users", "a@x.com", USER_COLUMNS)
        .await;
    assert_matches!(result, Err(SupabaseError::Decode(_)));
}

#[tokio::test]
async fn api_error_carries_status_and_message() {
    let fake = fake_with(vec![]);
    let rest = client(&fake, "wrong-key").await;

    let result = rest
        .find_by_email::<UserRecord>("users", "a@x.com", USER_COLUMNS)
        .await;
    assert_matches!(
        result,
        Err(SupabaseError::Api { status: 401, ref message }) if message == "Invalid API key"
    );
}

#[tokio::test]
async fn update_by_id_patches_with_minimal_return() {
    let fake = fake_with(vec![user_row("1", "a@x.com", "user")]);
    let rest = client(&fake, SERVICE_KEY).await;

    rest.update_by_id("users", "1", &serde_json::json!({ "user_role": "admin" }))
        .await
        .expect("update succeeds");

    let fake = fake.lock().unwrap();
    assert_eq!(fake.rows[0]["user_role"], "admin");
    let patch = &fake.requests[0];
    assert_eq!(patch.method, "PATCH");
    assert_eq!(patch.query["id"], "eq.1");
    assert_eq!(patch.prefer.as_deref(), Some("return=minimal"));
    assert_eq!(patch.body, Some(serde_json::json!({ "user_role": "admin" })));
}

// ---------------------------------------------------------------------------
// SupabaseUserStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_store_maps_missing_row_to_not_found() {
    let fake = fake_with(vec![]);
    let store = SupabaseUserStore::new(client(&fake, SERVICE_KEY).await, DEFAULT_USERS_TABLE);

    let err = store.find_by_email("ghost@x.com").await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "user", ref key } if key == "ghost@x.com");
}

#[tokio::test]
async fn user_store_maps_api_failure_to_internal() {
    let fake = fake_with(vec![]);
    fake.lock().unwrap().fail_with = Some((
        StatusCode::SERVICE_UNAVAILABLE,
        "upstream unavailable".to_string(),
    ));
    let store = SupabaseUserStore::new(client(&fake, SERVICE_KEY).await, DEFAULT_USERS_TABLE);

    let err = store.find_by_email("a@x.com").await.unwrap_err();
    assert_matches!(err, CoreError::Internal(ref msg) if msg.contains("upstream unavailable"));
}

#[tokio::test]
async fn user_store_reports_decode_failure_as_such() {
    let fake = fake_with(vec![]);
    fake.lock().unwrap().raw_select = Some("<html>gateway</html>".to_string());
    let store = SupabaseUserStore::new(client(&fake, SERVICE_KEY).await, DEFAULT_USERS_TABLE);

    let err = store.find_by_email("a@x.com").await.unwrap_err();
    assert_matches!(
        err,
        CoreError::Internal(ref msg) if msg.starts_with("Failed to decode Supabase response")
    );
}

#[tokio::test]
async fn user_store_sets_role() {
    let fake = fake_with(vec![user_row("42", "a@x.com", "user")]);
    let store = SupabaseUserStore::new(client(&fake, SERVICE_KEY).await, "profiles");

    store.set_role("42", UserRole::Admin).await.expect("update succeeds");

    let fake = fake.lock().unwrap();
    assert_eq!(fake.requests[0].table, "profiles");
    assert_eq!(fake.rows[0]["user_role"], "admin");
}
