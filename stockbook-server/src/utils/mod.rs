//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and alias
//! - [`logger`] - tracing setup
//! - [`time`] - date parsing and Unix-millis helpers
//! - [`validation`] - input validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ok};
pub use result::AppResult;
