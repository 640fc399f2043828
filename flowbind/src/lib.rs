//! # Flowbind - Rust binding for workflow engines
//!
//! This is a meta-crate that re-exports all Flowbind crates for convenient access.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! flowbind = "0.1.0"
//! ```
//!
//! Then use the crates like this:
//!
//! ```rust,no_run
//! use flowbind::client::{Instance, Workflow};
//! use flowbind::core::{InstanceState, NonRetryableError};
//! use flowbind::testsuite::TestEngine;
//! ```
//!
//! ## Re-exported Crates
//!
//! - [`core`] - Wire types, lifecycle types, errors and the fetch capability
//! - [`client`] - Workflow and instance handles
//! - [`testsuite`] - In-memory engine for tests

pub use flowbind_client as client;
pub use flowbind_core as core;
pub use flowbind_testsuite as testsuite;
pub use serde_json;

pub use flowbind_client::{connect, make_binding, make_binding_with_options};
