use indexmap::IndexSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::{ProfileStore, Session};
use crate::errors::Result;
use crate::utils::Validator;

/// Session-scoped favorites store.
///
/// Owns the in-memory mirror of the user's favorite symbols for the life
/// of one session; there is deliberately no process-global copy. Reads hit
/// the remote profile document once and are served from the mirror after
/// that; writes go through to the store and only update the mirror on
/// success. `invalidate` drops the mirror at sign-out.
pub struct FavoritesStore {
    store: Arc<dyn ProfileStore>,
    session: Session,
    cached: RwLock<Option<IndexSet<String>>>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn ProfileStore>, session: Session) -> Self {
        Self {
            store,
            session,
            cached: RwLock::new(None),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The user's favorite symbols, in document order.
    pub async fn list(&self) -> Result<Vec<String>> {
        if let Some(favorites) = self.cached.read().await.as_ref() {
            return Ok(favorites.iter().cloned().collect());
        }

        let mut guard = self.cached.write().await;
        let favorites = self.load_if_absent(&mut guard).await?;
        Ok(favorites.iter().cloned().collect())
    }

    /// Add one symbol. Set semantics: adding a favorite twice is a no-op.
    pub async fn add(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.to_uppercase();
        Validator::validate_symbol(&symbol)?;

        let mut guard = self.cached.write().await;
        let favorites = self.load_if_absent(&mut guard).await?;

        if favorites.contains(&symbol) {
            debug!("{} already in favorites", symbol);
            return Ok(());
        }

        let mut updated: Vec<String> = favorites.iter().cloned().collect();
        updated.push(symbol.clone());
        self.store.update_favorites(&self.session, &updated).await?;

        favorites.insert(symbol.clone());
        info!("added {} to favorites", symbol);
        Ok(())
    }

    /// Remove one symbol. Removing an absent symbol is a no-op.
    pub async fn remove(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.to_uppercase();

        let mut guard = self.cached.write().await;
        let favorites = self.load_if_absent(&mut guard).await?;

        if !favorites.contains(&symbol) {
            debug!("{} not in favorites", symbol);
            return Ok(());
        }

        let updated: Vec<String> = favorites
            .iter()
            .filter(|s| **s != symbol)
            .cloned()
            .collect();
        self.store.update_favorites(&self.session, &updated).await?;

        favorites.shift_remove(&symbol);
        info!("removed {} from favorites", symbol);
        Ok(())
    }

    /// Drop the in-memory mirror. The next read reloads from the remote
    /// document. Called on sign-out.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
        debug!("favorites mirror invalidated for {}", self.session.user_id);
    }

    /// Fill the mirror from the remote document if it is empty, returning
    /// a mutable handle into the write guard.
    async fn load_if_absent<'a>(
        &self,
        guard: &'a mut Option<IndexSet<String>>,
    ) -> Result<&'a mut IndexSet<String>> {
        if guard.is_none() {
            let profile = self.store.fetch_profile(&self.session).await?;
            let favorites: IndexSet<String> = profile.favorites.into_iter().collect();
            debug!(
                "loaded {} favorites for {}",
                favorites.len(),
                self.session.user_id
            );
            *guard = Some(favorites);
        }

        Ok(guard.as_mut().expect("mirror filled above"))
    }
}
