//! Opt-in policy for suites that need embedded PostgreSQL.
//!
//! Starting a cluster downloads server binaries, so these suites only run
//! when `RUN_PG_EMBEDDED=1`. Once opted in, a cluster that fails to start
//! fails the test unless `SKIP_TEST_CLUSTER` is truthy.

fn truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns true when `RUN_PG_EMBEDDED` is set to a truthy value.
pub fn embedded_postgres_enabled() -> bool {
    truthy("RUN_PG_EMBEDDED")
}

/// Report a cluster setup failure, skipping only when explicitly allowed.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if truthy("SKIP_TEST_CLUSTER") {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
