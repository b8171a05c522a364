//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use quill_infra::database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository};
#[cfg(feature = "postgres")]
use quill_infra::DatabasePool;

use crate::config::AppConfig;

/// Where posts and users live.
#[derive(Clone)]
pub enum Storage {
    #[cfg(feature = "postgres")]
    Postgres(DatabasePool),
    InMemory,
}

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// Falls back to in-memory storage when no database is configured or the
    /// database cannot be reached.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let state = match config.database.as_ref() {
            Some(db_config) => Self::postgres(db_config, tokens.clone()).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                None
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state: Option<Self> = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            None
        };

        let state = state.unwrap_or_else(|| Self::in_memory(tokens));
        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig, tokens: Arc<dyn TokenService>) -> Option<Self> {
        match DatabasePool::connect(config).await {
            Ok(pool) => Some(Self {
                users: Arc::new(PostgresUserRepository::new(pool.conn().clone())),
                posts: Arc::new(PostgresPostRepository::new(pool.conn().clone())),
                tokens,
                passwords: Arc::new(Argon2PasswordService::new()),
                storage: Storage::Postgres(pool),
            }),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        let store = InMemoryStore::new();

        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            storage: Storage::InMemory,
        }
    }

    /// Storage status reported by the health endpoint.
    pub async fn database_status(&self) -> &'static str {
        match &self.storage {
            #[cfg(feature = "postgres")]
            Storage::Postgres(pool) => match pool.ping().await {
                Ok(()) => "connected",
                Err(e) => {
                    tracing::error!("Database ping failed: {}", e);
                    "unreachable"
                }
            },
            Storage::InMemory => "in-memory",
        }
    }
}
