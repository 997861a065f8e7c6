//! Object-storage lambda event: emitted when a caller fetches an object
//! through an access point that routes the read through a function.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DeserializedEvent;
use crate::registry::RegistryEntry;
use crate::schema::{EventTypeDescriptor, FieldDescriptor, FieldKind, ObjectShape, ScalarKind};

pub const OBJECT_STORAGE_LAMBDA: &str = "ObjectStorageLambda";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectStorageLambdaEvent {
    pub x_amz_request_id: String,
    pub get_object_context: GetObjectContext,
    pub configuration: AccessPointConfiguration,
    pub user_request: UserRequest,
    pub user_identity: UserIdentity,
    pub protocol_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetObjectContext {
    pub input_s3_url: String,
    pub output_route: String,
    pub output_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessPointConfiguration {
    pub access_point_arn: String,
    pub supporting_access_point_arn: String,
    /// Opaque configuration blob, carried verbatim.
    pub payload: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserIdentity {
    #[serde(rename = "type")]
    pub kind: String,
    pub principal_id: String,
    pub arn: String,
    pub account_id: String,
    pub access_key_id: String,
    pub session_context: SessionContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionContext {
    pub attributes: SessionAttributes,
    pub session_issuer: SessionIssuer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionAttributes {
    /// Carried as the strings "true"/"false" on the wire.
    pub mfa_authenticated: String,
    pub creation_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionIssuer {
    #[serde(rename = "type")]
    pub kind: String,
    pub principal_id: String,
    pub arn: String,
    pub account_id: String,
    pub user_name: String,
}

fn get_object_context_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("input_s3_url", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("output_route", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("output_token", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn configuration_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("access_point_arn", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new(
            "supporting_access_point_arn",
            FieldKind::Scalar(ScalarKind::String),
        ),
        FieldDescriptor::new("payload", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn user_request_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("url", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("headers", FieldKind::StringMap),
    ])
}

fn session_issuer_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::renamed("kind", "type", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("principal_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("arn", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("account_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("user_name", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn session_context_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new(
            "attributes",
            FieldKind::Nested(ObjectShape::new(vec![
                FieldDescriptor::new("mfa_authenticated", FieldKind::Scalar(ScalarKind::String)),
                FieldDescriptor::new("creation_date", FieldKind::Scalar(ScalarKind::String)),
            ])),
        ),
        FieldDescriptor::new("session_issuer", FieldKind::Nested(session_issuer_shape())),
    ])
}

fn user_identity_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::renamed("kind", "type", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("principal_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("arn", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("account_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("access_key_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("session_context", FieldKind::Nested(session_context_shape())),
    ])
}

pub fn descriptor() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        OBJECT_STORAGE_LAMBDA,
        ObjectShape::new(vec![
            FieldDescriptor::new("x_amz_request_id", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new(
                "get_object_context",
                FieldKind::Nested(get_object_context_shape()),
            ),
            FieldDescriptor::new("configuration", FieldKind::Nested(configuration_shape())),
            FieldDescriptor::new("user_request", FieldKind::Nested(user_request_shape())),
            FieldDescriptor::new("user_identity", FieldKind::Nested(user_identity_shape())),
            FieldDescriptor::new("protocol_version", FieldKind::Scalar(ScalarKind::String)),
        ]),
    )
}

pub fn entry() -> RegistryEntry {
    RegistryEntry::new(descriptor(), |value| {
        serde_json::from_value::<ObjectStorageLambdaEvent>(value)
            .map(DeserializedEvent::ObjectStorageLambda)
    })
}
