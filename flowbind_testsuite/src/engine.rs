//! In-memory workflow engine.
//!
//! [`TestEngine`] answers binding requests the way a real engine does,
//! including rejecting illegal lifecycle transitions, so client code can be
//! tested without one. Nothing is ever executed: tests move instances
//! through their lifecycle with [`TestEngine::set_state`],
//! [`TestEngine::complete`] and [`TestEngine::fail`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use flowbind_core::{
    CreateRequest, Envelope, FetchRequest, FetchResponse, Fetcher, IdRequest, InstanceRef,
    InstanceState, InstanceStatus, NameRequest, Operation, TransportError, WorkflowError,
    BINDING_ORIGIN, CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON, PROTOCOL_VERSION, VERSION_HEADER,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;

#[derive(Debug, Clone)]
struct TestInstance {
    name: String,
    params: Value,
    status: InstanceStatus,
}

#[derive(Debug, Default)]
struct EngineState {
    instances: HashMap<String, TestInstance>,
    ids_by_name: HashMap<String, String>,
    requests: Vec<FetchRequest>,
}

/// Engine stand-in implementing [`Fetcher`].
///
/// Cloning yields another handle to the same engine.
#[derive(Debug, Clone, Default)]
pub struct TestEngine {
    state: Arc<Mutex<EngineState>>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // A panicking test must not poison every later assertion.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Force an instance into `state`, as the engine would while executing.
    ///
    /// Returns false if the id is unknown.
    pub fn set_state(&self, id: &str, state: InstanceState) -> bool {
        self.update(id, InstanceStatus::new(state))
    }

    /// Mark an instance complete with `output`
    pub fn complete(&self, id: &str, output: Value) -> bool {
        self.update(
            id,
            InstanceStatus {
                status: InstanceState::Complete,
                error: None,
                output: Some(output),
            },
        )
    }

    /// Mark an instance errored with `message`
    pub fn fail(&self, id: &str, message: impl Into<String>) -> bool {
        self.update(
            id,
            InstanceStatus {
                status: InstanceState::Errored,
                error: Some(message.into()),
                output: None,
            },
        )
    }

    fn update(&self, id: &str, status: InstanceStatus) -> bool {
        let mut state = self.lock();
        match state.instances.get_mut(id) {
            Some(instance) => {
                debug!(instance_id = %id, status = %status.status, "test engine moved instance");
                instance.status = status;
                true
            }
            None => false,
        }
    }

    pub fn state_of(&self, id: &str) -> Option<InstanceState> {
        self.lock().instances.get(id).map(|i| i.status.status)
    }

    /// Parameters an instance was created with
    pub fn params(&self, id: &str) -> Option<Value> {
        self.lock().instances.get(id).map(|i| i.params.clone())
    }

    pub fn instance_id(&self, name: &str) -> Option<String> {
        self.lock().ids_by_name.get(name).cloned()
    }

    pub fn instance_count(&self) -> usize {
        self.lock().instances.len()
    }

    /// Every request received, in arrival order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.lock().requests.clone()
    }

    fn handle(&self, request: &FetchRequest) -> (u16, Envelope) {
        let op = match validate(request) {
            Ok(op) => op,
            Err(message) => return reject(STATUS_BAD_REQUEST, message),
        };

        match op {
            Operation::Get => match decode::<NameRequest>(&request.body) {
                Ok(body) => self.get(&body.name),
                Err(message) => reject(STATUS_BAD_REQUEST, message),
            },
            Operation::Create => match decode::<CreateRequest>(&request.body) {
                Ok(body) => self.create(body),
                Err(message) => reject(STATUS_BAD_REQUEST, message),
            },
            Operation::Status => match decode::<IdRequest>(&request.body) {
                Ok(body) => self.status(&body.id),
                Err(message) => reject(STATUS_BAD_REQUEST, message),
            },
            Operation::Pause | Operation::Resume | Operation::Abort | Operation::Restart => {
                match decode::<IdRequest>(&request.body) {
                    Ok(body) => self.transition(op, &body.id),
                    Err(message) => reject(STATUS_BAD_REQUEST, message),
                }
            }
        }
    }

    fn get(&self, name: &str) -> (u16, Envelope) {
        let state = self.lock();
        match state.ids_by_name.get(name) {
            Some(id) => accept(instance_ref(id, name)),
            None => reject(
                STATUS_NOT_FOUND,
                format!("instance with name `{name}` does not exist"),
            ),
        }
    }

    fn create(&self, body: CreateRequest) -> (u16, Envelope) {
        let mut state = self.lock();
        if state.ids_by_name.contains_key(&body.name) {
            return reject(
                STATUS_CONFLICT,
                format!("instance with name `{}` already exists", body.name),
            );
        }

        let id = uuid::Uuid::new_v4().to_string();
        debug!(instance_id = %id, instance_name = %body.name, "test engine created instance");
        state.ids_by_name.insert(body.name.clone(), id.clone());
        state.instances.insert(
            id.clone(),
            TestInstance {
                name: body.name.clone(),
                params: body.params,
                status: InstanceStatus::new(InstanceState::Queued),
            },
        );
        accept(instance_ref(&id, &body.name))
    }

    fn status(&self, id: &str) -> (u16, Envelope) {
        let state = self.lock();
        match state.instances.get(id) {
            Some(instance) => match serde_json::to_value(&instance.status) {
                Ok(value) => accept(value),
                Err(e) => reject(STATUS_BAD_REQUEST, e.to_string()),
            },
            None => not_found(id),
        }
    }

    fn transition(&self, op: Operation, id: &str) -> (u16, Envelope) {
        let mut state = self.lock();
        let Some(instance) = state.instances.get_mut(id) else {
            return not_found(id);
        };

        let current = instance.status.status;
        if !current.accepts(op) {
            return reject(
                STATUS_CONFLICT,
                format!("cannot {op} instance `{}` while it is {current}", instance.name),
            );
        }

        if let Some(next) = op.requested_state() {
            debug!(instance_id = %id, from = %current, to = %next, "test engine transition");
            instance.status = InstanceStatus::new(next);
        }
        accept(Value::Null)
    }
}

#[async_trait]
impl Fetcher for TestEngine {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let (status, envelope) = self.handle(&request);
        self.lock().requests.push(request);

        let body = serde_json::to_vec(&envelope).map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(FetchResponse::new(status, body))
    }
}

fn validate(request: &FetchRequest) -> Result<Operation, String> {
    if request.method != "POST" {
        return Err(format!("unsupported method {}", request.method));
    }
    if !request.url.starts_with(BINDING_ORIGIN) {
        return Err(format!("unexpected origin in {}", request.url));
    }
    if request.header_value(CONTENT_TYPE_HEADER) != Some(CONTENT_TYPE_JSON) {
        return Err("missing or invalid Content-Type".to_string());
    }
    if request.header_value(VERSION_HEADER) != Some(PROTOCOL_VERSION) {
        return Err("missing or unsupported X-Version".to_string());
    }
    Operation::from_path(request.path()).ok_or_else(|| format!("unknown path {}", request.path()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    serde_json::from_slice(body).map_err(|e| format!("invalid request body: {e}"))
}

fn instance_ref(id: &str, name: &str) -> Value {
    serde_json::to_value(InstanceRef {
        instance_id: id.to_string(),
        instance_name: name.to_string(),
    })
    .unwrap_or(Value::Null)
}

fn accept(result: Value) -> (u16, Envelope) {
    (STATUS_OK, Envelope::ok(result))
}

fn reject(status: u16, message: impl Into<String>) -> (u16, Envelope) {
    (
        status,
        Envelope::err(WorkflowError::new(message).with_code(i64::from(status))),
    )
}

fn not_found(id: &str) -> (u16, Envelope) {
    reject(STATUS_NOT_FOUND, format!("instance `{id}` does not exist"))
}
