//! # Admin Credentials
//!
//! The admin panel logs in with a single username/password pair. The check
//! sits behind [`CredentialVerifier`] so the HTTP layer never hardcodes it.

/// Decides whether a username/password pair may open the admin panel.
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single fixed account, loaded from configuration.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        FixedCredentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
