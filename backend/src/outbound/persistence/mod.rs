//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Rows (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module, and every database error is mapped onto the port's error
//! type before it leaves.
//!
//! # Example
//!
//! ```ignore
//! use address_book::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/address_book")).await?;
//! let repo = DieselContactRepository::new(pool);
//! ```

mod diesel_contact_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
