//! Descriptor-driven deserialization of raw event payloads.

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::catalog::DeserializedEvent;
use crate::error::MapperError;
use crate::registry::{default_registry, EventRegistry};
use crate::schema::{FieldKind, NamingPolicy, ObjectShape, ScalarKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct MapperConfig {
    /// When set, descriptor fields marked required must be present in the
    /// document. Off by default: the built-in catalog marks nothing required.
    pub require_declared_fields: bool,
}

/// Routes payloads through the registry. Holds no mutable state, so one
/// mapper can serve concurrent calls.
pub struct EventMapper<'r> {
    registry: &'r EventRegistry,
    config: MapperConfig,
}

impl<'r> EventMapper<'r> {
    pub fn new(registry: &'r EventRegistry) -> Self {
        Self {
            registry,
            config: MapperConfig::default(),
        }
    }

    pub fn with_config(registry: &'r EventRegistry, config: MapperConfig) -> Self {
        Self { registry, config }
    }

    /// Parses one JSON document into the registered shape for `type_name`.
    ///
    /// Either every descriptor-known field is populated (missing ones land on
    /// their defaults) or an error is returned; there is no partial result.
    /// Unknown keys in the document are dropped.
    pub fn deserialize(
        &self,
        bytes: &[u8],
        type_name: &str,
    ) -> Result<DeserializedEvent, MapperError> {
        tracing::debug!(len = bytes.len(), event_type = type_name, "decoding event payload");

        let entry = self
            .registry
            .lookup(type_name)
            .ok_or_else(|| MapperError::UnknownEventType(type_name.to_string()))?;

        let document: Value = serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!("rejecting unparsable event payload: {}", e);
            MapperError::MalformedJson(e)
        })?;

        let descriptor = entry.descriptor();
        let conformed = conform_object(
            &document,
            descriptor.shape(),
            descriptor.naming(),
            self.config,
            "$",
        )?;
        Ok(entry.decode(conformed)?)
    }
}

/// Deserialize against the process-wide default registry.
pub fn deserialize(bytes: &[u8], type_name: &str) -> Result<DeserializedEvent, MapperError> {
    EventMapper::new(default_registry()).deserialize(bytes, type_name)
}

/// Serializes a catalog value back to its wire spelling (camelCase keys).
pub fn serialize(event: &DeserializedEvent) -> Result<Vec<u8>, MapperError> {
    Ok(serde_json::to_vec(event)?)
}

fn conform_object(
    value: &Value,
    shape: &ObjectShape,
    naming: NamingPolicy,
    config: MapperConfig,
    path: &str,
) -> Result<Value, MapperError> {
    let object = match value {
        Value::Object(map) => map,
        other => return Err(mismatch(path, "object", other)),
    };

    let mut out = Map::with_capacity(shape.fields().len());
    for field in shape.fields() {
        let key = field.resolve_key(naming);
        let field_path = format!("{path}.{key}");
        match object.get(&key) {
            // Absent and null both leave the target on its default value.
            None | Some(Value::Null) => {
                if config.require_declared_fields && field.is_required() {
                    return Err(MapperError::MissingRequiredField { path: field_path });
                }
            }
            Some(found) => {
                out.insert(
                    key,
                    conform_field(found, field.kind(), naming, config, &field_path)?,
                );
            }
        }
    }
    Ok(Value::Object(out))
}

fn conform_field(
    value: &Value,
    kind: &FieldKind,
    naming: NamingPolicy,
    config: MapperConfig,
    path: &str,
) -> Result<Value, MapperError> {
    match kind {
        FieldKind::Scalar(scalar) => conform_scalar(value, *scalar, path),
        FieldKind::ScalarList(scalar) => {
            let items = as_array(value, path)?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(conform_scalar(item, *scalar, &format!("{path}[{i}]"))?);
            }
            Ok(Value::Array(out))
        }
        FieldKind::StringMap => {
            let entries = match value {
                Value::Object(map) => map,
                other => return Err(mismatch(path, "object", other)),
            };
            let mut out = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                match entry {
                    Value::String(_) => {
                        out.insert(key.clone(), entry.clone());
                    }
                    other => return Err(mismatch(&format!("{path}.{key}"), "string", other)),
                }
            }
            Ok(Value::Object(out))
        }
        FieldKind::Nested(nested) => conform_object(value, nested, naming, config, path),
        FieldKind::NestedList(nested) => {
            let items = as_array(value, path)?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(conform_object(
                    item,
                    nested,
                    naming,
                    config,
                    &format!("{path}[{i}]"),
                )?);
            }
            Ok(Value::Array(out))
        }
    }
}

fn conform_scalar(value: &Value, kind: ScalarKind, path: &str) -> Result<Value, MapperError> {
    let accepted = match kind {
        ScalarKind::String => value.is_string(),
        // Every integer target in the catalog is i64; a wider number is a
        // kind mismatch, not a decode failure.
        ScalarKind::Integer => value.is_i64(),
        ScalarKind::Boolean => value.is_boolean(),
        ScalarKind::Timestamp => value
            .as_str()
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
    };
    if accepted {
        Ok(value.clone())
    } else {
        Err(mismatch(path, kind.expected(), value))
    }
}

fn as_array<'v>(value: &'v Value, path: &str) -> Result<&'v Vec<Value>, MapperError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(path, "array", other)),
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> MapperError {
    MapperError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: json_kind(found),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::http_api::HTTP_API_REQUEST;
    use crate::catalog::{http_api, DeserializedEvent};
    use crate::registry::{EventRegistry, RegistryEntry};
    use crate::schema::{EventTypeDescriptor, FieldDescriptor, FieldKind, ObjectShape, ScalarKind};
    use serde_json::json;

    fn request(body: Value) -> Result<DeserializedEvent, MapperError> {
        deserialize(body.to_string().as_bytes(), HTTP_API_REQUEST)
    }

    #[test]
    fn unparsable_bytes_fail_with_malformed_json() {
        let err = deserialize(b"{\"version\": ", HTTP_API_REQUEST).unwrap_err();
        assert!(matches!(err, MapperError::MalformedJson(_)));
    }

    #[test]
    fn unregistered_type_name_is_reported() {
        let err = deserialize(b"{}", "QueueMessage").unwrap_err();
        match err {
            MapperError::UnknownEventType(name) => assert_eq!(name, "QueueMessage"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_fields_land_on_defaults() {
        let event = request(json!({"version": "2.0"})).unwrap();
        let request = event.as_http_api_request().unwrap();
        assert_eq!(request.version, "2.0");
        assert_eq!(request.route_key, "");
        assert!(request.cookies.is_empty());
        assert!(request.query_string_parameters.is_empty());
        assert!(!request.is_base64_encoded);
        assert_eq!(request.request_context.time_epoch, 0);
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let event = request(json!({"version": "2.0", "cookies": null})).unwrap();
        assert!(event.as_http_api_request().unwrap().cookies.is_empty());
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let event = request(json!({
            "version": "2.0",
            "brandNewField": {"nested": true}
        }))
        .unwrap();
        assert_eq!(event.as_http_api_request().unwrap().version, "2.0");
    }

    #[test]
    fn scalar_kind_mismatch_names_the_path() {
        let err = request(json!({"cookies": "cookie1"})).unwrap_err();
        match err {
            MapperError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "$.cookies");
                assert_eq!(expected, "array");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_mismatch_names_the_full_path() {
        let err = request(json!({
            "requestContext": {"timeEpoch": "not-a-number"}
        }))
        .unwrap_err();
        match err {
            MapperError::TypeMismatch { path, expected, .. } => {
                assert_eq!(path, "$.requestContext.timeEpoch");
                assert_eq!(expected, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_integer_is_a_type_mismatch() {
        let err = request(json!({
            "requestContext": {"timeEpoch": u64::MAX}
        }))
        .unwrap_err();
        match err {
            MapperError::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "$.requestContext.timeEpoch");
                assert_eq!(expected, "integer");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn string_map_rejects_non_string_values() {
        let err = request(json!({
            "queryStringParameters": {"parameter1": 7}
        }))
        .unwrap_err();
        match err {
            MapperError::TypeMismatch { path, .. } => {
                assert_eq!(path, "$.queryStringParameters.parameter1")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_json_keys_keep_the_last_value() {
        // serde_json object semantics: last write wins.
        let bytes =
            br#"{"queryStringParameters": {"parameter1": "first", "parameter1": "second"}}"#;
        let event = deserialize(bytes, HTTP_API_REQUEST).unwrap();
        let request = event.as_http_api_request().unwrap();
        assert_eq!(request.query_string_parameters["parameter1"], "second");
    }

    #[test]
    fn required_fields_are_ignored_unless_configured() {
        let mut registry = EventRegistry::new();
        registry.register(RegistryEntry::new(
            EventTypeDescriptor::new(
                "StrictRequest",
                ObjectShape::new(vec![FieldDescriptor::new(
                    "version",
                    FieldKind::Scalar(ScalarKind::String),
                )
                .required()]),
            ),
            |value| serde_json::from_value(value).map(DeserializedEvent::HttpApiRequest),
        ));

        let relaxed = EventMapper::new(&registry);
        assert!(relaxed.deserialize(b"{}", "StrictRequest").is_ok());

        let strict = EventMapper::with_config(
            &registry,
            MapperConfig {
                require_declared_fields: true,
            },
        );
        let err = strict.deserialize(b"{}", "StrictRequest").unwrap_err();
        match err {
            MapperError::MissingRequiredField { path } => assert_eq!(path, "$.version"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn serialize_round_trips_the_wire_spelling() {
        let event = request(json!({
            "version": "2.0",
            "cookies": ["cookie1"],
            "isBase64Encoded": true
        }))
        .unwrap();
        let bytes = serialize(&event).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["cookies"][0], "cookie1");
        assert_eq!(value["isBase64Encoded"], true);
    }

    #[test]
    fn top_level_non_object_is_a_mismatch() {
        let err = deserialize(b"[1, 2, 3]", http_api::HTTP_API_REQUEST).unwrap_err();
        match err {
            MapperError::TypeMismatch { path, expected, .. } => {
                assert_eq!(path, "$");
                assert_eq!(expected, "object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
