//! Server configuration.

use std::net::SocketAddr;

/// Settings the HTTP server needs at startup.
#[derive(Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// HS256 secret used to verify bearer tokens.
    pub jwt_secret: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
