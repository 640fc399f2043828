//! Client options.

use flowbind_core::{BINDING_ORIGIN, PROTOCOL_VERSION};

/// Client configuration options
///
/// The defaults are the fixed wire values every engine expects; override
/// them only to talk to an engine that is addressed differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Origin prefixed to every operation path
    pub origin: String,
    /// Value sent in the `X-Version` header
    pub protocol_version: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            origin: BINDING_ORIGIN.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }
}
