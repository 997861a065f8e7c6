//! Static descriptors for the shapes the mapper can produce.
//!
//! Descriptors are built once at registration time and never mutated, so the
//! mapper can walk them from any thread without coordination.

use std::collections::HashSet;

/// JSON leaf kinds the catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
    /// An RFC 3339 instant carried as a JSON string.
    Timestamp,
}

impl ScalarKind {
    pub fn expected(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Timestamp => "RFC 3339 timestamp",
        }
    }
}

/// How one JSON value maps onto the target field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Ordered array of scalars, JSON order preserved.
    ScalarList(ScalarKind),
    /// Unordered string-to-string object, last write wins on duplicates.
    StringMap,
    Nested(ObjectShape),
    NestedList(ObjectShape),
}

/// Maps one JSON key to one target field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    json_key: Option<&'static str>,
    kind: FieldKind,
    required: bool,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            json_key: None,
            kind,
            required: false,
        }
    }

    /// For keys no naming policy produces, e.g. `subjectDN`.
    pub fn renamed(name: &'static str, json_key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            json_key: Some(json_key),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The JSON key this field is matched under: the explicit override if one
    /// is set, otherwise the policy transform of the logical name.
    pub fn resolve_key(&self, naming: NamingPolicy) -> String {
        match self.json_key {
            Some(key) => key.to_string(),
            None => naming.apply(self.name),
        }
    }
}

/// Ordered field list describing one JSON object.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    fields: Vec<FieldDescriptor>,
}

impl ObjectShape {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// Deterministic rule converting a logical snake_case field name into its
/// expected JSON key spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingPolicy {
    #[default]
    CamelCase,
    Identity,
}

impl NamingPolicy {
    pub fn apply(&self, logical: &str) -> String {
        match self {
            NamingPolicy::Identity => logical.to_string(),
            NamingPolicy::CamelCase => snake_to_camel(logical),
        }
    }
}

fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Identifies one mappable shape: the registered type name plus the root
/// object layout and the naming policy its JSON keys follow.
#[derive(Debug, Clone)]
pub struct EventTypeDescriptor {
    type_name: &'static str,
    shape: ObjectShape,
    naming: NamingPolicy,
}

impl EventTypeDescriptor {
    /// Panics if two fields of any object in the tree resolve to the same
    /// JSON key. Descriptors are static code, so a collision is a bug caught
    /// the first time the type is registered.
    pub fn new(type_name: &'static str, shape: ObjectShape) -> Self {
        let naming = NamingPolicy::default();
        assert_unique_keys(type_name, &shape, naming);
        Self {
            type_name,
            shape,
            naming,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn shape(&self) -> &ObjectShape {
        &self.shape
    }

    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }
}

fn assert_unique_keys(type_name: &str, shape: &ObjectShape, naming: NamingPolicy) {
    let mut seen = HashSet::new();
    for field in shape.fields() {
        let key = field.resolve_key(naming);
        assert!(
            seen.insert(key.clone()),
            "duplicate JSON key `{key}` in descriptor for {type_name}"
        );
        match field.kind() {
            FieldKind::Nested(nested) | FieldKind::NestedList(nested) => {
                assert_unique_keys(type_name, nested, naming)
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_policy_matches_wire_spelling() {
        let policy = NamingPolicy::CamelCase;
        assert_eq!(policy.apply("version"), "version");
        assert_eq!(policy.apply("time_epoch"), "timeEpoch");
        assert_eq!(policy.apply("x_amz_request_id"), "xAmzRequestId");
        assert_eq!(policy.apply("input_s3_url"), "inputS3Url");
        assert_eq!(policy.apply("query_string_parameters"), "queryStringParameters");
    }

    #[test]
    fn identity_policy_keeps_names() {
        assert_eq!(NamingPolicy::Identity.apply("time_epoch"), "time_epoch");
    }

    #[test]
    fn explicit_key_overrides_policy() {
        let field = FieldDescriptor::renamed(
            "subject_dn",
            "subjectDN",
            FieldKind::Scalar(ScalarKind::String),
        );
        assert_eq!(field.resolve_key(NamingPolicy::CamelCase), "subjectDN");
    }

    #[test]
    #[should_panic(expected = "duplicate JSON key")]
    fn descriptor_rejects_colliding_keys() {
        let shape = ObjectShape::new(vec![
            FieldDescriptor::new("route_key", FieldKind::Scalar(ScalarKind::String)),
            FieldDescriptor::renamed("route_key_2", "routeKey", FieldKind::Scalar(ScalarKind::String)),
        ]);
        EventTypeDescriptor::new("Broken", shape);
    }
}
