use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_store_is_unauthenticated() {
    let store = SessionStore::new();
    assert!(!store.is_authenticated());
    assert!(store.token().is_none());
    assert_eq!(store.snapshot(), Session::default());
}

// =============================================================
// set_auth / logout
// =============================================================

#[test]
fn set_auth_overwrites_both_fields() {
    let store = SessionStore::new();
    store.set_auth(true, Some("tok".to_owned()));
    assert_eq!(store.snapshot(), Session { authenticated: true, token: Some("tok".to_owned()) });

    store.set_auth(true, Some("tok-2".to_owned()));
    assert_eq!(store.token().as_deref(), Some("tok-2"));
}

#[test]
fn set_auth_accepts_any_input() {
    let store = SessionStore::new();
    store.set_auth(true, None);
    assert!(store.is_authenticated());
    assert!(store.token().is_none());
}

#[test]
fn logout_resets_and_is_idempotent() {
    let store = SessionStore::new();
    store.set_auth(true, Some("tok".to_owned()));

    store.logout();
    assert_eq!(store.snapshot(), Session { authenticated: false, token: None });

    store.logout();
    assert_eq!(store.snapshot(), Session { authenticated: false, token: None });
}

// =============================================================
// Sharing
// =============================================================

#[test]
fn clones_observe_latest_write() {
    let writer = SessionStore::new();
    let reader = writer.clone();

    writer.set_auth(true, Some("abc".to_owned()));
    assert!(reader.is_authenticated());
    assert_eq!(reader.token().as_deref(), Some("abc"));

    reader.logout();
    assert!(!writer.is_authenticated());
}

#[test]
fn separate_stores_are_isolated() {
    let a = SessionStore::new();
    let b = SessionStore::new();
    a.set_auth(true, Some("a".to_owned()));
    assert!(!b.is_authenticated());
}
