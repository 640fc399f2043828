//! Binding call helper.
//!
//! Turns an operation and a request body into one `POST` through a
//! [`Fetcher`] and decodes the response envelope. Each call is exactly one
//! round trip: no retry, no timeout, no backoff.

use flowbind_core::{
    EncodingError, Envelope, FetchRequest, Fetcher, Operation, CONTENT_TYPE_HEADER,
    CONTENT_TYPE_JSON, VERSION_HEADER,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::options::ClientOptions;

/// Build the request for `op` without sending it
pub fn build_request<B: Serialize + ?Sized>(
    options: &ClientOptions,
    op: Operation,
    body: &B,
) -> ClientResult<FetchRequest> {
    let body = serde_json::to_vec(body).map_err(EncodingError::Encode)?;
    let url = format!("{}{}", options.origin.trim_end_matches('/'), op.path());
    Ok(FetchRequest::post(url, body)
        .header(CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON)
        .header(VERSION_HEADER, options.protocol_version.as_str()))
}

/// Perform one binding call and decode its `result` as `T`.
///
/// A success status yields `result` (absent decodes as `null`). A failure
/// status yields [`ClientError::Rejected`] carrying the envelope error, whose
/// message may be missing. The transport status is authoritative: an
/// `error` on a success response is logged and ignored.
pub async fn call_binding<T, B>(
    fetcher: &dyn Fetcher,
    options: &ClientOptions,
    op: Operation,
    body: &B,
) -> ClientResult<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let request = build_request(options, op, body)?;
    debug!(operation = %op, url = %request.url, "calling workflow binding");

    let response = fetcher.fetch(request).await.map_err(|e| {
        warn!(operation = %op, error = %e, "workflow binding transport failed");
        ClientError::from(e)
    })?;

    if !response.is_success() {
        // A failure body that is not an envelope still counts as a rejection.
        let error = serde_json::from_slice::<Envelope>(&response.body)
            .ok()
            .and_then(|envelope| envelope.error);
        warn!(
            operation = %op,
            status = response.status,
            message = error.as_ref().and_then(|e| e.message()).unwrap_or_default(),
            "workflow binding rejected request"
        );
        return Err(ClientError::rejected(op, response.status, error));
    }

    let envelope: Envelope =
        serde_json::from_slice(&response.body).map_err(EncodingError::Decode)?;
    if let Some(error) = &envelope.error {
        warn!(operation = %op, error = %error, "ignoring envelope error on success status");
    }

    let result = envelope.result.unwrap_or(Value::Null);
    Ok(serde_json::from_value(result).map_err(EncodingError::Decode)?)
}
