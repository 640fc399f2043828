//! Workflow namespace entry point.
//!
//! A [`Workflow`] looks up or creates named instances. It owns nothing but
//! the fetcher and options, which it shares with every [`Instance`] it
//! hands out.

use std::sync::Arc;

use async_trait::async_trait;
use flowbind_core::{CreateRequest, Fetcher, InstanceRef, NameRequest, Operation};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpFetcher;
use crate::instance::{Instance, InstanceHandle};
use crate::options::ClientOptions;
use crate::transport::call_binding;

/// Namespace of workflow instances
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Get a handle to an existing instance. Fails if no instance has `name`.
    async fn get(&self, name: &str) -> ClientResult<Box<dyn Instance>>;

    /// Create a new instance named `name`, passing `params` through to the
    /// engine untouched. Fails if the name is already taken.
    async fn create(&self, name: &str, params: Value) -> ClientResult<Box<dyn Instance>>;
}

struct WorkflowBinding {
    fetcher: Arc<dyn Fetcher>,
    options: Arc<ClientOptions>,
}

impl WorkflowBinding {
    fn instance(&self, instance: InstanceRef) -> Box<dyn Instance> {
        Box::new(InstanceHandle::new(
            instance.instance_id,
            instance.instance_name,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.options),
        ))
    }
}

#[async_trait]
impl Workflow for WorkflowBinding {
    async fn get(&self, name: &str) -> ClientResult<Box<dyn Instance>> {
        debug!(instance_name = %name, "looking up workflow instance");
        let instance: InstanceRef = call_binding(
            self.fetcher.as_ref(),
            &self.options,
            Operation::Get,
            &NameRequest {
                name: name.to_string(),
            },
        )
        .await?;
        Ok(self.instance(instance))
    }

    async fn create(&self, name: &str, params: Value) -> ClientResult<Box<dyn Instance>> {
        debug!(instance_name = %name, "creating workflow instance");
        let instance: InstanceRef = call_binding(
            self.fetcher.as_ref(),
            &self.options,
            Operation::Create,
            &CreateRequest {
                name: name.to_string(),
                params,
            },
        )
        .await?;
        Ok(self.instance(instance))
    }
}

/// Create a workflow binding over `fetcher` with default options
pub fn make_binding(fetcher: Arc<dyn Fetcher>) -> Arc<dyn Workflow> {
    make_binding_with_options(fetcher, ClientOptions::default())
}

pub fn make_binding_with_options(
    fetcher: Arc<dyn Fetcher>,
    options: ClientOptions,
) -> Arc<dyn Workflow> {
    Arc::new(WorkflowBinding {
        fetcher,
        options: Arc::new(options),
    })
}

/// Create a workflow binding that reaches the engine over HTTP
///
/// # Arguments
/// * `endpoint` - Base URL of the engine (e.g., "http://127.0.0.1:8787")
pub fn connect(endpoint: impl Into<String>) -> ClientResult<Arc<dyn Workflow>> {
    let fetcher = HttpFetcher::new(endpoint).map_err(ClientError::from)?;
    Ok(make_binding(Arc::new(fetcher)))
}
