pub mod api;
pub mod config;

pub use crate::api::{build_router, AppState};
pub use crate::config::ServerConfig;
