use crate::error::StateError;
use crate::key::StateKey;
use crate::store::StateStore;

/// Run the full state store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any backend operation fails.
pub async fn run_store_conformance_tests(store: &dyn StateStore) -> Result<(), StateError> {
    test_get_missing(store).await?;
    test_set_and_get(store).await?;
    test_overwrite(store).await?;
    test_prefixes_isolate(store).await?;
    test_large_value(store).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::new("missing");
    let val = store.get(&key).await?;
    assert!(val.is_none(), "get on missing key should return None");
    Ok(())
}

async fn test_set_and_get(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::new("set-get");
    store.set(&key, "hello").await?;
    let val = store.get(&key).await?;
    assert_eq!(val.as_deref(), Some("hello"));
    Ok(())
}

async fn test_overwrite(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::new("overwrite");
    store.set(&key, "[]").await?;
    store.set(&key, r#"[{"id":1}]"#).await?;
    let val = store.get(&key).await?;
    assert_eq!(val.as_deref(), Some(r#"[{"id":1}]"#), "set should replace");
    Ok(())
}

async fn test_prefixes_isolate(store: &dyn StateStore) -> Result<(), StateError> {
    let plain = StateKey::new("shared");
    let scoped = StateKey::new("shared").with_prefix("other");
    store.set(&plain, "plain").await?;
    store.set(&scoped, "scoped").await?;
    assert_eq!(store.get(&plain).await?.as_deref(), Some("plain"));
    assert_eq!(store.get(&scoped).await?.as_deref(), Some("scoped"));
    Ok(())
}

async fn test_large_value(store: &dyn StateStore) -> Result<(), StateError> {
    let key = StateKey::new("large");
    let value = "x".repeat(64 * 1024);
    store.set(&key, &value).await?;
    let val = store.get(&key).await?;
    assert_eq!(val.map(|v| v.len()), Some(value.len()));
    Ok(())
}
