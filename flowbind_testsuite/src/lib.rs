//! Testing utilities for code built on the workflow binding.
//!
//! This crate provides an in-memory engine that speaks the binding protocol,
//! so client code can be tested without a running engine.

pub mod engine;

pub use engine::*;
