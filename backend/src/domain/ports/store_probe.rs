//! Port used by readiness probes to check the backing store.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Raised when the store cannot serve a trivial query.
    pub enum StoreProbeError {
        Unavailable { message: String } => "store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Round-trip a trivial query against the store.
    async fn ping(&self) -> Result<(), StoreProbeError>;
}
