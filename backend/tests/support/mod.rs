//! Shared helpers for backend integration tests.
//!
//! [`EmbeddedStore`] owns an embedded cluster, a migrated database, a Tokio
//! runtime, and a pool. Tests stay synchronous and drive async repository
//! calls through [`EmbeddedStore::block_on`], since the cluster bootstrap
//! must not run inside a Tokio runtime.

#![allow(dead_code)]

pub mod cluster_skip;
pub mod pg_embed;

use std::future::Future;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rental_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations_blocking};
use tokio::runtime::Runtime;

pub use cluster_skip::{embedded_postgres_enabled, handle_cluster_setup_failure};

const DATABASE_NAME: &str = "rental_test";

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated embedded database plus the runtime used to reach it.
pub struct EmbeddedStore {
    runtime: Runtime,
    pool: DbPool,
    database_url: String,
    _cluster: TestCluster,
}

impl EmbeddedStore {
    fn start() -> Result<Self, String> {
        let cluster = pg_embed::test_cluster()?;
        let admin_url = cluster.connection().database_url("postgres");
        let mut admin = Client::connect(&admin_url, NoTls)
            .map_err(|err| format_postgres_error(&err))?;
        admin
            .batch_execute(&format!("CREATE DATABASE {DATABASE_NAME}"))
            .map_err(|err| format_postgres_error(&err))?;

        let database_url = cluster.connection().database_url(DATABASE_NAME);
        run_pending_migrations_blocking(&database_url).map_err(|err| err.to_string())?;

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&database_url)
            .with_max_size(4)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            database_url,
            _cluster: cluster,
        })
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Run raw SQL against the test database, bypassing the repositories.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Start an embedded store, or `None` when the suite is not opted in.
pub fn embedded_store() -> Option<EmbeddedStore> {
    if !embedded_postgres_enabled() {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match EmbeddedStore::start() {
        Ok(store) => Some(store),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
