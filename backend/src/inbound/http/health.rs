//! Health endpoints: liveness and readiness probes for orchestrators.
//!
//! Readiness requires both the startup flag and, when a [`StoreProbe`] is
//! attached, a successful round trip to the database.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::ports::StoreProbe;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    store: Option<Arc<dyn StoreProbe>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            store: None,
        }
    }
}

impl HealthState {
    /// Create a health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a store probe consulted on every readiness check.
    pub fn with_store_probe(mut self, probe: Arc<dyn StoreProbe>) -> Self {
        self.store = Some(probe);
        self
    }

    /// Flag startup as complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether startup has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process still reports itself alive.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn store_reachable(&self) -> bool {
        let Some(probe) = &self.store else {
            return true;
        };
        match probe.ping().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "readiness probe could not reach the store");
                false
            }
        }
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once started and the store answers; 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_ready() && state.store_reachable().await;
    HealthState::probe_response(ok)
}

/// Liveness probe. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockStoreProbe, StoreProbeError};

    async fn probe_status(state: HealthState, uri: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        res.status()
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_is_unavailable_until_marked() {
        assert_eq!(
            probe_status(HealthState::new(), "/health/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_consults_store_probe() {
        let mut probe = MockStoreProbe::new();
        probe
            .expect_ping()
            .times(1)
            .return_once(|| Err(StoreProbeError::unavailable("refused")));
        let state = HealthState::new().with_store_probe(Arc::new(probe));
        state.mark_ready();

        assert_eq!(
            probe_status(state, "/health/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_succeeds_when_store_answers() {
        let mut probe = MockStoreProbe::new();
        probe.expect_ping().times(1).return_once(|| Ok(()));
        let state = HealthState::new().with_store_probe(Arc::new(probe));
        state.mark_ready();

        assert_eq!(probe_status(state, "/health/ready").await, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn live_reports_draining() {
        let state = HealthState::new();
        state.mark_unhealthy();
        assert_eq!(
            probe_status(state, "/health/live").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
