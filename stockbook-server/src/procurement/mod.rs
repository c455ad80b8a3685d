//! Procurement subsystem
//!
//! The reorder trigger engine and the supplier notification seam.

pub mod engine;
pub mod notifier;

pub use engine::{ReorderEngine, TriggerOutcome};
pub use notifier::{LogNotifier, SupplierNotifier};
