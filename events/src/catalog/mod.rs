//! The fixed set of typed shapes the mapper can produce.

pub mod batch_job;
pub mod http_api;
pub mod object_storage;

use serde::Serialize;

pub use batch_job::BatchJobStateChangeEvent;
pub use http_api::{HttpApiRequestEvent, HttpApiResponseEvent};
pub use object_storage::ObjectStorageLambdaEvent;

/// One fully populated event. Serializes untagged, i.e. as the plain wire
/// shape of the inner value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeserializedEvent {
    HttpApiRequest(HttpApiRequestEvent),
    HttpApiResponse(HttpApiResponseEvent),
    ObjectStorageLambda(ObjectStorageLambdaEvent),
    BatchJobStateChange(BatchJobStateChangeEvent),
}

impl DeserializedEvent {
    pub fn as_http_api_request(&self) -> Option<&HttpApiRequestEvent> {
        match self {
            DeserializedEvent::HttpApiRequest(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_http_api_response(&self) -> Option<&HttpApiResponseEvent> {
        match self {
            DeserializedEvent::HttpApiResponse(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_object_storage_lambda(&self) -> Option<&ObjectStorageLambdaEvent> {
        match self {
            DeserializedEvent::ObjectStorageLambda(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_batch_job_state_change(&self) -> Option<&BatchJobStateChangeEvent> {
        match self {
            DeserializedEvent::BatchJobStateChange(event) => Some(event),
            _ => None,
        }
    }
}
