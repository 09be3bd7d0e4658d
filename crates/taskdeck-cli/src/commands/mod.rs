//! Command implementations.
//!
//! Each command returns the [`Notice`](taskdeck_application::Notice) to print,
//! or `None` when its output has already been written.

pub mod auth;
mod render;
pub mod tasks;

use anyhow::Result;
use std::sync::Arc;
use taskdeck_application::{SessionContext, TaskStore};
use taskdeck_core::session::SessionState;
use taskdeck_infrastructure::{FileTokenStore, HttpAuthService, HttpTaskService, load_config};

/// The wired-up client: one store and one session sharing a token cell.
pub struct App {
    pub store: TaskStore,
    pub session: SessionContext,
}

impl App {
    /// Builds the services from `config.toml`, the environment and `--base-url`.
    pub fn connect(base_url: Option<&str>) -> Result<Self> {
        let mut config = load_config(None)?;
        if let Some(base_url) = base_url {
            config.base_url = base_url.to_string();
        }
        tracing::debug!("[App] Using service at {}", config.base_url);

        let state = SessionState::new();
        let tasks = HttpTaskService::new(&config, state.clone())?;
        let auth = HttpAuthService::new(&config)?;
        let tokens = FileTokenStore::new()?;

        Ok(Self {
            store: TaskStore::new(Arc::new(tasks)),
            session: SessionContext::new(Arc::new(auth), Arc::new(tokens), state),
        })
    }
}
