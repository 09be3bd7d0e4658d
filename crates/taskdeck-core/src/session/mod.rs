//! Session domain module.
//!
//! Authentication state for the current user: the shared token cell, the
//! remote auth interface, and where tokens are kept between runs.

mod model;
pub mod service;
mod state;
pub mod token_store;

pub use model::{AuthToken, Registration, SessionStatus, UserProfile};
pub use service::AuthService;
pub use state::SessionState;
pub use token_store::{MemoryTokenStore, TokenStore};
