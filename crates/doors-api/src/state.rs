//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds:
//! - **Games** — the in-memory [`GameRepository`]
//! - **Metrics** — the Prometheus handle used to render `/metrics`, if enabled
//! - **Config** — bind address, public base URL, feature switches

use std::collections::HashMap;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::middleware::metrics::ApiMetrics;
use crate::repository::GameRepository;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not `tokio::sync`)
/// because the lock is never held across `.await` points. `parking_lot::RwLock`
/// is non-poisonable.
#[derive(Debug)]
pub struct Store<K, T> {
    data: Arc<RwLock<HashMap<K, T>>>,
}

impl<K, T> Clone for Store<K, T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash, T: Clone> Store<K, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: K, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &K) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure receives a `&mut T` and may inspect the current state,
    /// validate preconditions, mutate the record, and return `Ok(R)` or
    /// `Err(E)`. The whole operation runs under a single write lock.
    ///
    /// Returns `None` if the record doesn't exist, or `Some(result)` with
    /// the closure's `Result`.
    ///
    /// There is no rollback: changes made before the closure returns `Err`
    /// are kept, so the closure must validate before it mutates.
    pub fn try_update<R, E>(
        &self,
        id: &K,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &K) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, T: Clone> Default for Store<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind: IpAddr,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Base URL used for links when a request carries no `Host` header.
    pub base_url: String,
    /// Serve `/metrics` and record Prometheus metrics.
    pub metrics_enabled: bool,
    /// Apply a permissive CORS policy.
    pub cors_allow_any: bool,
}

impl AppConfig {
    /// Socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            metrics_enabled: true,
            cors_allow_any: false,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the repository and metrics handle are `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub games: GameRepository,
    pub metrics: Option<ApiMetrics>,
}

impl AppState {
    /// Create a state with default configuration and no metrics exporter.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create a state with the given configuration and optional metrics handle.
    pub fn with_config(config: AppConfig, metrics: Option<ApiMetrics>) -> Self {
        Self {
            config,
            games: GameRepository::new(),
            metrics,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("games", &self.games.len())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
