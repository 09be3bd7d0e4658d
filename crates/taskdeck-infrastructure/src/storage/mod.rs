//! Storage layer for local files: configuration and the session token.

mod config_storage;
mod token_storage;

pub use config_storage::{BASE_URL_ENV, apply_env_overrides, load_config};
pub use token_storage::FileTokenStore;
