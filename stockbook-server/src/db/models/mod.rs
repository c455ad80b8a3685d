//! Storage models
//!
//! Records as they live in SurrealDB: `Thing` record ids and links, Unix
//! millis timestamps. API handlers convert them to `shared::models` types.

pub mod order;
pub mod product;
pub mod reorder;

pub use order::{Order, OrderCreate, OrderItem, OrderItemCreate};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use reorder::{Reorder, ReorderGuard, ReorderStatusCounts};
