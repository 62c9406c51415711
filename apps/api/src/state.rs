//! Shared application state handed to every handler.

use std::sync::Arc;

use espetinho_core::auth::{CredentialVerifier, FixedCredentials};
use espetinho_db::Database;

use crate::config::ServerConfig;

/// Cloned into each request by axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub verifier: Arc<dyn CredentialVerifier + Send + Sync>,
}

impl AppState {
    pub fn new(db: Database, verifier: Arc<dyn CredentialVerifier + Send + Sync>) -> Self {
        AppState { db, verifier }
    }

    /// State with the admin account taken from configuration.
    pub fn from_config(db: Database, config: &ServerConfig) -> Self {
        let verifier = FixedCredentials::new(&config.admin_user, &config.admin_password);
        AppState::new(db, Arc::new(verifier))
    }
}
