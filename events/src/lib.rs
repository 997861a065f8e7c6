//! Typed deserialization of function-platform event payloads.
//!
//! Each supported event shape is described by a static descriptor registered
//! under a logical type name. The mapper checks an incoming JSON document
//! against the descriptor before building the typed value, so unregistered
//! types and mis-shaped payloads fail with a specific error instead of a
//! half-populated struct.

pub mod catalog;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod schema;

pub use catalog::DeserializedEvent;
pub use error::MapperError;
pub use mapper::{deserialize, serialize, EventMapper, MapperConfig};
pub use registry::{default_registry, EventRegistry, RegistryEntry};
