pub mod models;

use crate::db::{Database, DbError};
use crate::users::models::{UserProfile, UserUpdate};
use thiserror::Error;
use tracing::{debug, error, warn};

#[cfg(test)]
mod tests;

const USERS_NODE: &str = "Users";

#[derive(Error, Debug)]
pub enum UserError {
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Store for per-user profile records.
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Writes the initial profile record for a freshly registered user.
    pub async fn create_user(&self, uid: &str, profile: &UserProfile) -> Result<(), UserError> {
        let path = format!("{}/{}", USERS_NODE, uid);
        match self.db.reference(&path).set(profile).await {
            Ok(()) => {
                debug!(uid, "user record added");
                Ok(())
            }
            Err(e) => {
                error!(uid, error = %e, "failed to add user record");
                Err(e.into())
            }
        }
    }

    /// Overwrites only the fields populated in `update`.
    pub async fn update_user(&self, uid: &str, update: &UserUpdate) -> Result<(), UserError> {
        let path = format!("{}/{}", USERS_NODE, uid);
        match self.db.reference(&path).update(update).await {
            Ok(()) => {
                debug!(uid, "user record updated");
                Ok(())
            }
            Err(e) => {
                error!(uid, error = %e, "failed to update user record");
                Err(e.into())
            }
        }
    }

    /// Reads the profile once. A missing or malformed record yields
    /// `Ok(None)` rather than an error.
    pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, UserError> {
        let path = format!("{}/{}", USERS_NODE, uid);
        match self.db.reference(&path).get::<UserProfile>().await {
            Ok(Some(profile)) => {
                debug!(uid, "user record fetched");
                Ok(Some(profile))
            }
            Ok(None) => {
                debug!(uid, "user record does not exist");
                Ok(None)
            }
            Err(DbError::SerializationError(e)) => {
                warn!(uid, error = %e, "stored user record is malformed");
                Ok(None)
            }
            Err(e) => {
                error!(uid, error = %e, "failed to fetch user record");
                Err(e.into())
            }
        }
    }
}
