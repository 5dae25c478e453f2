//! Utilities shared across database modules

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
