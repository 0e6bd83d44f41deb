//! HTTP server configuration object.

use std::net::SocketAddr;

use rental_backend::outbound::persistence::DbPool;

/// Everything the server needs besides shared health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Bundle the listener address with the database pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self { bind_addr, db_pool }
    }
}
