//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed contact repository using Diesel ORM.
//! - **memory**: in-process contact repository for database-less runs.
//! - **storage**: filesystem picture store.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod storage;
