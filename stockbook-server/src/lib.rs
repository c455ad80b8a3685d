//! Stockbook Server - small-business inventory & procurement backend
//!
//! # Module structure
//!
//! ```text
//! stockbook-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── actor.rs       # Request actor context (auth seam)
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded SurrealDB: models, repositories
//! ├── procurement/   # Reorder trigger engine + supplier notifier
//! └── utils/         # Errors, logging, time, validation
//! ```
//!
//! The interesting part is `procurement`: low-stock detection, idempotent
//! reorder creation (guard-table transactional insert closes the
//! check-then-act race) and the reorder status lifecycle including stock
//! replenishment on receipt.

pub mod actor;
pub mod api;
pub mod core;
pub mod db;
pub mod procurement;
pub mod utils;

// Re-export common types
pub use actor::Actor;
pub use core::{Config, Server, ServerState};
pub use procurement::{LogNotifier, ReorderEngine, SupplierNotifier};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Environment setup for the binary: dotenv + logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir().to_str(),
    );
    Ok(())
}
