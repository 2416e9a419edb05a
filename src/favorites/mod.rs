pub mod models;

use crate::db::{Database, DbError};
use crate::favorites::models::FavoriteTea;
use crate::session::SessionHandle;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error};

#[cfg(test)]
mod tests;

const FAVOURITES_NODE: &str = "favourites";

#[derive(Error, Debug)]
pub enum FavoriteError {
    /// Rejected before any remote call was made.
    #[error("{0}")]
    Invalid(String),
    #[error("Please sign in to save favourites.")]
    NotSignedIn,
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Store for the signed-in user's favourite teas.
pub struct FavoriteStore {
    db: Database,
    session: SessionHandle,
}

impl FavoriteStore {
    pub fn new(db: Database, session: SessionHandle) -> Self {
        Self { db, session }
    }

    pub async fn add_favorite(&self, tea: FavoriteTea) -> Result<(), FavoriteError> {
        if tea.name.trim().is_empty() || tea.tea_type.trim().is_empty() {
            return Err(FavoriteError::Invalid(
                "Please enter your favourite tea and its type.".to_string(),
            ));
        }

        let uid = self.session.uid().ok_or(FavoriteError::NotSignedIn)?;

        let path = format!("{}/{}/{}", FAVOURITES_NODE, uid, self.db.push_id());
        match self.db.reference(&path).set(&tea).await {
            Ok(()) => {
                debug!(%uid, tea = %tea.name, "favourite tea saved");
                Ok(())
            }
            Err(e) => {
                error!(%uid, error = %e, "failed to save favourite tea");
                Err(e.into())
            }
        }
    }

    /// Reads the user's favourites in the order they were saved.
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteTea>, FavoriteError> {
        let uid = self.session.uid().ok_or(FavoriteError::NotSignedIn)?;

        let path = format!("{}/{}", FAVOURITES_NODE, uid);
        let records: Option<BTreeMap<String, FavoriteTea>> =
            self.db.reference(&path).get().await?;

        Ok(records.unwrap_or_default().into_values().collect())
    }
}
