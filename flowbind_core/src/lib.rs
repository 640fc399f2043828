//! Core types for the flowbind workflow binding.
//!
//! This crate provides the wire vocabulary, lifecycle types, error types
//! and the fetch capability shared by the client and the test engine.

pub mod error;
pub mod fetch;
pub mod non_retryable;
pub mod types;
pub mod wire;

pub use error::*;
pub use fetch::*;
pub use non_retryable::{FatalError, NonRetryableError, NON_RETRYABLE_BRAND};
pub use types::*;
pub use wire::*;
