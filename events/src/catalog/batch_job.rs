//! Batch job state-change notification, wrapped in the event-bus envelope.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DeserializedEvent;
use crate::registry::RegistryEntry;
use crate::schema::{EventTypeDescriptor, FieldDescriptor, FieldKind, ObjectShape, ScalarKind};

pub const BATCH_JOB_STATE_CHANGE: &str = "BatchJobStateChange";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchJobStateChangeEvent {
    pub version: String,
    pub id: String,
    pub detail_type: String,
    pub source: String,
    pub account: String,
    pub time: DateTime<Utc>,
    pub region: String,
    pub resources: Vec<String>,
    pub detail: JobDetail,
}

impl Default for BatchJobStateChangeEvent {
    fn default() -> Self {
        Self {
            version: String::new(),
            id: String::new(),
            detail_type: String::new(),
            source: String::new(),
            account: String::new(),
            time: DateTime::<Utc>::UNIX_EPOCH,
            region: String::new(),
            resources: Vec::new(),
            detail: JobDetail::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetail {
    pub job_name: String,
    pub job_id: String,
    pub job_queue: String,
    pub status: String,
    pub attempts: Vec<JobAttempt>,
    pub created_at: i64,
    pub retry_strategy: RetryStrategy,
    pub depends_on: Vec<JobDependency>,
    pub job_definition: String,
    pub parameters: HashMap<String, String>,
    pub container: JobContainer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobAttempt {
    pub container: AttemptContainer,
    pub started_at: i64,
    pub stopped_at: i64,
    pub status_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttemptContainer {
    pub container_instance_arn: String,
    pub task_arn: String,
    pub exit_code: i64,
    pub log_stream_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryStrategy {
    pub attempts: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDependency {
    pub job_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobContainer {
    pub image: String,
    pub vcpus: i64,
    pub memory: i64,
    pub command: Vec<String>,
    pub volumes: Vec<Volume>,
    pub environment: Vec<KeyValuePair>,
    pub mount_points: Vec<MountPoint>,
    pub ulimits: Vec<Ulimit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub name: String,
    pub host: VolumeHost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeHost {
    pub source_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountPoint {
    pub container_path: String,
    pub read_only: bool,
    pub source_volume: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ulimit {
    pub hard_limit: i64,
    pub name: String,
    pub soft_limit: i64,
}

fn attempt_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new(
            "container",
            FieldKind::Nested(ObjectShape::new(vec![
                FieldDescriptor::new(
                    "container_instance_arn",
                    FieldKind::Scalar(ScalarKind::String),
                ),
                FieldDescriptor::new("task_arn", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new("exit_code", FieldKind::Scalar(ScalarKind::Integer)),
                FieldDescriptor::new("log_stream_name", FieldKind::Scalar(ScalarKind::String)),
            ])),
        ),
        FieldDescriptor::new("started_at", FieldKind::Scalar(ScalarKind::Integer)),
        FieldDescriptor::new("stopped_at", FieldKind::Scalar(ScalarKind::Integer)),
        FieldDescriptor::new("status_reason", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn container_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("image", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("vcpus", FieldKind::Scalar(ScalarKind::Integer)),
        FieldDescriptor::new("memory", FieldKind::Scalar(ScalarKind::Integer)),
        FieldDescriptor::new("command", FieldKind::ScalarList(ScalarKind::String)),
        FieldDescriptor::new(
            "volumes",
            FieldKind::NestedList(ObjectShape::new(vec![
                FieldDescriptor::new("name", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new(
                    "host",
                    FieldKind::Nested(ObjectShape::new(vec![FieldDescriptor::new(
                        "source_path",
                        FieldKind::Scalar(ScalarKind::String),
                    )])),
                ),
            ])),
        ),
        FieldDescriptor::new(
            "environment",
            FieldKind::NestedList(ObjectShape::new(vec![
                FieldDescriptor::new("name", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new("value", FieldKind::Scalar(ScalarKind::String)),
            ])),
        ),
        FieldDescriptor::new(
            "mount_points",
            FieldKind::NestedList(ObjectShape::new(vec![
                FieldDescriptor::new("container_path", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new("read_only", FieldKind::Scalar(ScalarKind::Boolean)),
                FieldDescriptor::new("source_volume", FieldKind::Scalar(ScalarKind::String)),
            ])),
        ),
        FieldDescriptor::new(
            "ulimits",
            FieldKind::NestedList(ObjectShape::new(vec![
                FieldDescriptor::new("hard_limit", FieldKind::Scalar(ScalarKind::Integer)),
                FieldDescriptor::new("name", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new("soft_limit", FieldKind::Scalar(ScalarKind::Integer)),
            ])),
        ),
    ])
}

fn detail_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("job_name", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("job_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("job_queue", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("status", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("attempts", FieldKind::NestedList(attempt_shape())),
        FieldDescriptor::new("created_at", FieldKind::Scalar(ScalarKind::Integer)),
        FieldDescriptor::new(
            "retry_strategy",
            FieldKind::Nested(ObjectShape::new(vec![FieldDescriptor::new(
                "attempts",
                FieldKind::Scalar(ScalarKind::Integer),
            )])),
        ),
        FieldDescriptor::new(
            "depends_on",
            FieldKind::NestedList(ObjectShape::new(vec![
                FieldDescriptor::new("job_id", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::renamed("kind", "type", FieldKind::Scalar(ScalarKind::String)),
            ])),
        ),
        FieldDescriptor::new("job_definition", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("parameters", FieldKind::StringMap),
        FieldDescriptor::new("container", FieldKind::Nested(container_shape())),
    ])
}

pub fn descriptor() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        BATCH_JOB_STATE_CHANGE,
        ObjectShape::new(vec![
            FieldDescriptor::new("version", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("id", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("detail_type", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("source", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("account", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("time", FieldKind::Scalar(ScalarKind::Timestamp)),
            FieldDescriptor::new("region", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("resources", FieldKind::ScalarList(ScalarKind::String)),
            FieldDescriptor::new("detail", FieldKind::Nested(detail_shape())),
        ]),
    )
}

pub fn entry() -> RegistryEntry {
    RegistryEntry::new(descriptor(), |value| {
        serde_json::from_value::<BatchJobStateChangeEvent>(value)
            .map(DeserializedEvent::BatchJobStateChange)
    })
}
