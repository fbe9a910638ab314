pub mod api;
pub mod config;
pub mod error;
pub mod readiness;
pub mod session;
pub mod terminal;

pub use error::{Error, Result};
