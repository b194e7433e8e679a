use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::errors::AppError;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one session. Handlers hold the lock for the whole operation,
    /// flush included, so no request observes a half-applied transition.
    pub session: Arc<Mutex<Session>>,
    pub config: Config,
}

impl AppState {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            config,
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session lock poisoned")))
    }
}
