// ABOUTME: Registry credentials sent along with image pulls.

use serde::Deserialize;

/// Registry authentication credentials.
#[derive(Clone, Deserialize)]
pub struct RegistryAuth {
    /// Username.
    pub username: String,
    /// Password or token.
    pub password: String,
    /// Registry server (e.g., "ghcr.io").
    #[serde(default)]
    pub server: Option<String>,
}

impl std::fmt::Debug for RegistryAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server", &self.server)
            .finish()
    }
}
