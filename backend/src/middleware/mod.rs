//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler,
//! currently trace identifiers and request logging.

pub mod trace;

pub use trace::Trace;
