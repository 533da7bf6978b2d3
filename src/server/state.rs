//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request through
//! Axum's state extraction. Every field is cheap to clone.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::ai::SuggestionGenerator;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Clones share the pool.
    pub db: DatabaseConnection,

    /// Generator behind AI menu suggestions.
    pub suggestion_generator: Arc<dyn SuggestionGenerator>,

    /// Provisioned secret that unlocks MANAGER and MASTER signups.
    pub admin_token: Arc<str>,
}

impl AppState {
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `suggestion_generator` - AI upstream client
    /// - `admin_token` - Secret from configuration
    pub fn new(
        db: DatabaseConnection,
        suggestion_generator: Arc<dyn SuggestionGenerator>,
        admin_token: &str,
    ) -> Self {
        Self {
            db,
            suggestion_generator,
            admin_token: Arc::from(admin_token),
        }
    }
}
