//! HTTP API gateway v2 proxy request and response shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DeserializedEvent;
use crate::registry::RegistryEntry;
use crate::schema::{EventTypeDescriptor, FieldDescriptor, FieldKind, ObjectShape, ScalarKind};

pub const HTTP_API_REQUEST: &str = "HttpApiRequest";
pub const HTTP_API_RESPONSE: &str = "HttpApiResponse";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpApiRequestEvent {
    pub version: String,
    pub route_key: String,
    pub raw_path: String,
    pub raw_query_string: String,
    pub cookies: Vec<String>,
    pub headers: HashMap<String, String>,
    pub query_string_parameters: HashMap<String, String>,
    pub path_parameters: HashMap<String, String>,
    pub stage_variables: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub account_id: String,
    pub api_id: String,
    pub authentication: Authentication,
    pub authorizer: Authorizer,
    pub domain_name: String,
    pub domain_prefix: String,
    pub http: HttpDescription,
    pub request_id: String,
    pub route_id: String,
    pub route_key: String,
    pub stage: String,
    pub time: String,
    pub time_epoch: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authentication {
    pub client_cert: ClientCert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientCert {
    pub client_cert_pem: String,
    #[serde(rename = "subjectDN")]
    pub subject_dn: String,
    #[serde(rename = "issuerDN")]
    pub issuer_dn: String,
    pub serial_number: String,
    pub validity: CertValidity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertValidity {
    pub not_before: String,
    pub not_after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authorizer {
    pub jwt: JwtAuthorizer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JwtAuthorizer {
    pub claims: HashMap<String, String>,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub source_ip: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpApiResponseEvent {
    pub status_code: i64,
    pub headers: HashMap<String, String>,
    pub cookies: Vec<String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

fn cert_validity_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("not_before", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("not_after", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn client_cert_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("client_cert_pem", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::renamed("subject_dn", "subjectDN", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::renamed("issuer_dn", "issuerDN", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("serial_number", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("validity", FieldKind::Nested(cert_validity_shape())),
    ])
}

fn jwt_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("claims", FieldKind::StringMap),
        FieldDescriptor::new("scopes", FieldKind::ScalarList(ScalarKind::String)),
    ])
}

fn http_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("method", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("path", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("protocol", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("source_ip", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("user_agent", FieldKind::Scalar(ScalarKind::String)),
    ])
}

fn request_context_shape() -> ObjectShape {
    ObjectShape::new(vec![
        FieldDescriptor::new("account_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("api_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new(
            "authentication",
            FieldKind::Nested(ObjectShape::new(vec![FieldDescriptor::new(
                "client_cert",
                FieldKind::Nested(client_cert_shape()),
            )])),
        ),
        FieldDescriptor::new(
            "authorizer",
            FieldKind::Nested(ObjectShape::new(vec![FieldDescriptor::new(
                "jwt",
                FieldKind::Nested(jwt_shape()),
            )])),
        ),
        FieldDescriptor::new("domain_name", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("domain_prefix", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("http", FieldKind::Nested(http_shape())),
        FieldDescriptor::new("request_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("route_id", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("route_key", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("stage", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("time", FieldKind::Scalar(ScalarKind::String)),
        FieldDescriptor::new("time_epoch", FieldKind::Scalar(ScalarKind::Integer)),
    ])
}

pub fn request_descriptor() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        HTTP_API_REQUEST,
        ObjectShape::new(vec![
            FieldDescriptor::new("version", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("route_key", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("raw_path", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("raw_query_string", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("cookies", FieldKind::ScalarList(ScalarKind::String)),
            FieldDescriptor::new("headers", FieldKind::StringMap),
            FieldDescriptor::new("query_string_parameters", FieldKind::StringMap),
            FieldDescriptor::new("path_parameters", FieldKind::StringMap),
            FieldDescriptor::new("stage_variables", FieldKind::StringMap),
            FieldDescriptor::new("body", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("is_base64_encoded", FieldKind::Scalar(ScalarKind::Boolean)),
            FieldDescriptor::new("request_context", FieldKind::Nested(request_context_shape())),
        ]),
    )
}

pub fn response_descriptor() -> EventTypeDescriptor {
    EventTypeDescriptor::new(
        HTTP_API_RESPONSE,
        ObjectShape::new(vec![
            FieldDescriptor::new("status_code", FieldKind::Scalar(ScalarKind::Integer)),
            FieldDescriptor::new("headers", FieldKind::StringMap),
            FieldDescriptor::new("cookies", FieldKind::ScalarList(ScalarKind::String)),
            FieldDescriptor::new("body", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::new("is_base64_encoded", FieldKind::Scalar(ScalarKind::Boolean)),
        ]),
    )
}

pub fn request_entry() -> RegistryEntry {
    RegistryEntry::new(request_descriptor(), |value| {
        serde_json::from_value::<HttpApiRequestEvent>(value).map(DeserializedEvent::HttpApiRequest)
    })
}

pub fn response_entry() -> RegistryEntry {
    RegistryEntry::new(response_descriptor(), |value| {
        serde_json::from_value::<HttpApiResponseEvent>(value)
            .map(DeserializedEvent::HttpApiResponse)
    })
}
