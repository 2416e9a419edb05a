pub mod auth;
pub mod config;
pub mod core;
pub mod db;
pub mod device;
pub mod favorites;
pub mod flows;
pub mod media;
pub mod orders;
pub mod products;
pub mod session;
pub mod users;

use crate::core::middleware::SessionMiddleware;
use auth::AuthGateway;
use config::{AppConfig, ConfigError};
use db::Database;
use device::CredentialStore;
use favorites::FavoriteStore;
use flows::{Flows, Gates};
use media::MediaClient;
use orders::OrderRecorder;
use products::ProductStore;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use session::SessionHandle;
use std::sync::Arc;
use users::UserStore;

/// The app's entry point: owns the configuration and the session, and hands
/// out clients for each hosted service.
pub struct Sippure {
    config: AppConfig,
    session: SessionHandle,
    db: Database,
    http: ClientWithMiddleware,
    gates: Arc<Gates>,
}

impl Sippure {
    pub fn new(config: AppConfig) -> Self {
        let session = SessionHandle::new();

        let db_client = ClientBuilder::new(Client::new())
            .with(SessionMiddleware::new(session.clone()))
            .build();
        let db = Database::new(db_client, config.database_url.clone());

        let http = ClientBuilder::new(Client::new()).build();

        Self {
            config,
            session,
            db,
            http,
            gates: Arc::new(Gates::default()),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(AppConfig::from_env()?))
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn auth(&self) -> AuthGateway {
        AuthGateway::new(
            self.http.clone(),
            self.config.identity_url.clone(),
            self.config.identity_api_key.clone(),
            self.session.clone(),
        )
    }

    pub fn db(&self) -> Database {
        self.db.clone()
    }

    pub fn users(&self) -> UserStore {
        UserStore::new(self.db.clone())
    }

    pub fn products(&self) -> ProductStore {
        ProductStore::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRecorder {
        OrderRecorder::new(self.db.clone(), self.session.clone())
    }

    pub fn favorites(&self) -> FavoriteStore {
        FavoriteStore::new(self.db.clone(), self.session.clone())
    }

    pub fn media(&self) -> MediaClient {
        MediaClient::new(
            self.config.media_upload_url.clone(),
            self.config.media_upload_preset.clone(),
        )
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(&self.config.data_dir)
    }

    pub fn flows(&self) -> Flows {
        Flows::new(
            self.auth(),
            self.users(),
            self.products(),
            self.orders(),
            self.favorites(),
            self.media(),
            self.credentials(),
            self.session.clone(),
            self.gates.clone(),
        )
    }
}
