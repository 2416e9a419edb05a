use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// The signed-in identity issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject identifier assigned by the identity service.
    pub uid: String,
    pub email: String,
    /// Short-lived token sent along with database requests.
    pub id_token: String,
    pub refresh_token: Option<String>,
}

/// Shared handle to the current session.
///
/// Login and registration install a session, logout clears it; the database
/// middleware and the user-scoped stores read it. There is exactly one handle
/// per app, passed into whichever component needs the identity.
#[derive(Clone, Default)]
pub struct SessionHandle(Arc<RwLock<Option<Session>>>);

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, session: Session) {
        if let Ok(mut slot) = self.0.write() {
            *slot = Some(session);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.write() {
            *slot = None;
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.0.read().ok().and_then(|slot| slot.clone())
    }

    pub fn uid(&self) -> Option<String> {
        self.0
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|s| s.uid.clone()))
    }

    pub(crate) fn id_token(&self) -> Option<String> {
        self.0
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|s| s.id_token.clone()))
    }
}
