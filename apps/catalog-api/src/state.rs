//! Application state management

use database::ReadWriteDb;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: ReadWriteDb,
}
