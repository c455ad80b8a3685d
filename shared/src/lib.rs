//! Shared types for Stockbook
//!
//! Wire-level types used by the server and by clients: API models,
//! response envelope, pagination, and the domain enums.

pub mod models;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{AppResponse, PaginatedResponse};
pub use types::{ReorderStatus, Role, SupplierInfo, TriggerReason};
