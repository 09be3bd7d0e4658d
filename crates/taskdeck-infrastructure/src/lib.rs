//! Infrastructure layer for Taskdeck.
//!
//! HTTP implementations of the task and auth services, the wire DTOs they
//! exchange with the server, and local file storage for configuration and
//! the session token.

pub mod dto;
pub mod http_auth_service;
pub mod http_client;
pub mod http_error;
pub mod http_task_service;
pub mod paths;
pub mod storage;

#[cfg(test)]
mod test_server;

pub use crate::http_auth_service::HttpAuthService;
pub use crate::http_client::ApiClient;
pub use crate::http_task_service::HttpTaskService;
pub use crate::paths::TaskdeckPaths;
pub use crate::storage::{FileTokenStore, load_config};
