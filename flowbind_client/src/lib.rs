//! Client for managing externally executed workflow instances.
//!
//! This crate turns [`Workflow`] and [`Instance`] method calls into binding
//! requests, sends them through an injected [`Fetcher`], and relays the
//! engine's answer. It never executes, schedules or persists anything.
//!
//! ```no_run
//! # async fn run() -> flowbind_client::ClientResult<()> {
//! use flowbind_client::{Instance, Workflow};
//! use serde_json::json;
//!
//! let workflow = flowbind_client::connect("http://127.0.0.1:8787")?;
//! let instance = workflow.create("job-1", json!({ "x": 1 })).await?;
//! instance.pause().await?;
//! println!("{:?}", instance.status().await?.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod instance;
pub mod options;
pub mod transport;
pub mod workflow;

pub use error::{ClientError, ClientResult};
pub use flowbind_core::{Fetcher, InstanceState, InstanceStatus, NonRetryableError};
pub use http::{FetcherOptions, HttpFetcher};
pub use instance::Instance;
pub use options::ClientOptions;
pub use transport::call_binding;
pub use workflow::{connect, make_binding, make_binding_with_options, Workflow};
