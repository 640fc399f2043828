//! Error types for the workflow binding client.
//!
//! - [`TransportError`]: the fetch capability failed (re-exported from core)
//! - [`EncodingError`]: a body could not be encoded or decoded (re-exported from core)
//! - [`ClientError`]: everything a binding call can fail with, including
//!   rejections reported by the engine
//!
//! # Example
//!
//! ```no_run
//! use flowbind_client::error::ClientError;
//!
//! fn handle_error(error: ClientError) {
//!     match error {
//!         ClientError::Rejected { operation, message, .. } => {
//!             eprintln!("engine refused {}: {:?}", operation, message);
//!         },
//!         ClientError::Transport(transport_err) => {
//!             eprintln!("Transport error: {}", transport_err);
//!         },
//!         e => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod client;

pub use client::{ClientError, ClientResult};
pub use flowbind_core::{EncodingError, TransportError};
