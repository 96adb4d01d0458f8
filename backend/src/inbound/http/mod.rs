//! HTTP inbound adapter exposing REST endpoints.

pub mod contacts;
pub mod contacts_dto;
pub mod error;
pub mod health;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
