//! Handles to individual workflow instances.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use flowbind_core::{Fetcher, IdRequest, InstanceStatus, Operation};
use serde::de::IgnoredAny;
use tracing::debug;

use crate::error::ClientResult;
use crate::options::ClientOptions;
use crate::transport::call_binding;

/// A handle to one workflow instance.
///
/// Every method is a single round trip. Legality of a transition is decided
/// by the engine; a refused request surfaces as
/// [`ClientError::Rejected`](crate::ClientError::Rejected). Handles cache
/// nothing, so two handles for the same id behave identically.
#[async_trait]
pub trait Instance: Send + Sync {
    /// Engine-assigned id
    fn id(&self) -> &str;

    /// Name chosen at creation
    fn name(&self) -> &str;

    /// Pause the instance. Fails unless it is running.
    async fn pause(&self) -> ClientResult<()>;

    /// Resume the instance. Fails unless it is paused.
    async fn resume(&self) -> ClientResult<()>;

    /// Abort the instance. Fails if it is errored, terminated or complete.
    async fn abort(&self) -> ClientResult<()>;

    /// Discard progress and run the instance again.
    async fn restart(&self) -> ClientResult<()>;

    /// Fetch the current status. Legal in every state.
    async fn status(&self) -> ClientResult<InstanceStatus>;
}

pub(crate) struct InstanceHandle {
    id: String,
    name: String,
    fetcher: Arc<dyn Fetcher>,
    options: Arc<ClientOptions>,
}

impl InstanceHandle {
    pub(crate) fn new(
        id: String,
        name: String,
        fetcher: Arc<dyn Fetcher>,
        options: Arc<ClientOptions>,
    ) -> Self {
        Self {
            id,
            name,
            fetcher,
            options,
        }
    }

    async fn transition(&self, op: Operation) -> ClientResult<()> {
        debug!(operation = %op, instance_id = %self.id, "requesting transition");
        let _: IgnoredAny = call_binding(
            self.fetcher.as_ref(),
            &self.options,
            op,
            &IdRequest {
                id: self.id.clone(),
            },
        )
        .await?;
        Ok(())
    }
}

impl fmt::Debug for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl Instance for InstanceHandle {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn pause(&self) -> ClientResult<()> {
        self.transition(Operation::Pause).await
    }

    async fn resume(&self) -> ClientResult<()> {
        self.transition(Operation::Resume).await
    }

    async fn abort(&self) -> ClientResult<()> {
        self.transition(Operation::Abort).await
    }

    async fn restart(&self) -> ClientResult<()> {
        self.transition(Operation::Restart).await
    }

    async fn status(&self) -> ClientResult<InstanceStatus> {
        call_binding(
            self.fetcher.as_ref(),
            &self.options,
            Operation::Status,
            &IdRequest {
                id: self.id.clone(),
            },
        )
        .await
    }
}
