//! Wire protocol of the workflow binding.
//!
//! Every operation is a JSON `POST` to `http://workflow-binding.local/<op>`
//! carrying `Content-Type: application/json` and `X-Version: 1`. Responses
//! share one envelope: `{ "result": ..., "error"?: { "code"?, "message" } }`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WorkflowError;

/// Origin every binding request is addressed to
pub const BINDING_ORIGIN: &str = "http://workflow-binding.local";
/// Protocol version header name
pub const VERSION_HEADER: &str = "X-Version";
/// Protocol version sent with every request
pub const PROTOCOL_VERSION: &str = "1";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Operations understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Pause,
    Resume,
    Abort,
    Restart,
    Status,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Get,
        Operation::Create,
        Operation::Pause,
        Operation::Resume,
        Operation::Abort,
        Operation::Restart,
        Operation::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Pause => "pause",
            Operation::Resume => "resume",
            Operation::Abort => "abort",
            Operation::Restart => "restart",
            Operation::Status => "status",
        }
    }

    /// Request path, e.g. `/pause`
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Get => "/get",
            Operation::Create => "/create",
            Operation::Pause => "/pause",
            Operation::Resume => "/resume",
            Operation::Abort => "/abort",
            Operation::Restart => "/restart",
            Operation::Status => "/status",
        }
    }

    pub fn from_path(path: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.path() == path)
    }

    /// Whether the operation addresses an existing instance by id
    pub fn targets_instance(&self) -> bool {
        !matches!(self, Operation::Get | Operation::Create)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `get`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Body of `create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub params: Value,
}

/// Body of `pause`, `resume`, `abort`, `restart` and `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// Result of `get` and `create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRef {
    pub instance_id: String,
    pub instance_name: String,
}

/// Response envelope shared by all operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<WorkflowError>,
}

impl Envelope {
    pub fn ok(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn err(error: WorkflowError) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_paths() {
        for op in Operation::ALL {
            assert_eq!(op.path(), format!("/{}", op));
            assert_eq!(Operation::from_path(op.path()), Some(op));
        }
        assert_eq!(Operation::from_path("/signal"), None);
        assert_eq!(Operation::from_path("pause"), None);
    }

    #[test]
    fn test_request_bodies_match_wire_shape() {
        let create = CreateRequest {
            name: "job-1".into(),
            params: json!({ "x": 1 }),
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({ "name": "job-1", "params": { "x": 1 } })
        );
        assert_eq!(
            serde_json::to_value(IdRequest { id: "abc".into() }).unwrap(),
            json!({ "id": "abc" })
        );
    }

    #[test]
    fn test_instance_ref_is_camel_case() {
        let parsed: InstanceRef =
            serde_json::from_value(json!({ "instanceId": "abc", "instanceName": "job-1" }))
                .unwrap();
        assert_eq!(parsed.instance_id, "abc");
        assert_eq!(parsed.instance_name, "job-1");
    }

    #[test]
    fn test_envelope_without_result() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"error": {"message": "nope"}}"#).unwrap();
        assert!(envelope.result.is_none());
        assert_eq!(envelope.error.unwrap().message(), Some("nope"));
    }
}
