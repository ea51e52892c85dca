use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{Profile, ProfileStore, Session};
use crate::errors::{AppError, Result};
use crate::session::FavoritesStore;

/// In-memory profile store with call counters.
#[derive(Default)]
struct MemoryStore {
    favorites: Mutex<Vec<String>>,
    fetches: AtomicUsize,
    updates: AtomicUsize,
    fail_updates: AtomicBool,
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_profile(&self, _session: &Session) -> Result<Profile> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Profile {
            display_name: "Test User".to_string(),
            country: "US".to_string(),
            favorites: self.favorites.lock().unwrap().clone(),
        })
    }

    async fn update_favorites(&self, _session: &Session, favorites: &[String]) -> Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::api("profile", "write rejected").into());
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        *self.favorites.lock().unwrap() = favorites.to_vec();
        Ok(())
    }
}

fn store_with(favorites: &[&str]) -> (Arc<MemoryStore>, FavoritesStore) {
    let remote = Arc::new(MemoryStore {
        favorites: Mutex::new(favorites.iter().map(|s| s.to_string()).collect()),
        ..MemoryStore::default()
    });
    let session = Session {
        user_id: "user-1".to_string(),
        token: "token".to_string(),
    };
    let store = FavoritesStore::new(remote.clone(), session);
    (remote, store)
}

#[tokio::test]
async fn list_loads_remote_once_then_serves_mirror() {
    let (remote, store) = store_with(&["AAPL", "TSLA"]);

    assert_eq!(store.list().await.unwrap(), vec!["AAPL", "TSLA"]);
    assert_eq!(store.list().await.unwrap(), vec!["AAPL", "TSLA"]);
    assert_eq!(remote.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn add_writes_through_and_is_idempotent() {
    let (remote, store) = store_with(&["AAPL"]);

    store.add("msft").await.unwrap();
    assert_eq!(store.list().await.unwrap(), vec!["AAPL", "MSFT"]);
    assert_eq!(*remote.favorites.lock().unwrap(), vec!["AAPL", "MSFT"]);

    // Adding again changes nothing and issues no second write.
    store.add("MSFT").await.unwrap();
    assert_eq!(remote.updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn remove_of_absent_symbol_is_a_noop() {
    let (remote, store) = store_with(&["AAPL"]);

    store.remove("TSLA").await.unwrap();
    assert_eq!(remote.updates.load(Ordering::SeqCst), 0);

    store.remove("AAPL").await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
    assert_eq!(remote.updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalidate_forces_remote_reload() {
    let (remote, store) = store_with(&["AAPL"]);

    store.list().await.unwrap();
    store.invalidate().await;
    store.list().await.unwrap();

    assert_eq!(remote.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_write_leaves_mirror_untouched() {
    let (remote, store) = store_with(&["AAPL"]);
    store.list().await.unwrap();
    remote.fail_updates.store(true, Ordering::SeqCst);

    assert!(store.add("TSLA").await.is_err());
    assert_eq!(store.list().await.unwrap(), vec!["AAPL"]);
}

#[tokio::test]
async fn invalid_symbol_is_rejected_before_any_io() {
    let (remote, store) = store_with(&[]);

    assert!(store.add("not a symbol!").await.is_err());
    assert_eq!(remote.fetches.load(Ordering::SeqCst), 0);
}
