//! JSON Schema intermediate model.
//!
//! [`loader`] turns a JSON document into a [`SchemaNode`] tree; [`node`] holds
//! the tree types. Nothing here knows about Avro.
pub mod loader;
pub mod node;

pub use loader::parse;
pub use node::{AdditionalProperties, JsonType, SchemaNode, TypeDecl};
