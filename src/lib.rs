//! # jsonschema2avro
//!
//! Translate [JSON Schema](https://json-schema.org/) documents into
//! [Apache Avro](https://avro.apache.org/) schemas.
//!
//! ## Features
//!
//! - Parses JSON Schema into a typed [`SchemaNode`] tree, keeping unknown keywords
//! - Maps primitive JSON Schema types to Avro equivalents (`int64` → `long`, `double` → `double`)
//! - Turns objects into records and optional properties into `[T, "null"]` unions
//! - Errors carry the JSON pointer of the offending node
//! - CLI tool `jsonschema2avro` for file and URL conversion
//!
//! Composition keywords (`allOf`, `anyOf`, `oneOf`) and `$ref` are parsed but
//! not translated.
//!
//! ## Example (Programmatic Usage)
//!
//! ```
//! use serde_json::json;
//! use jsonschema2avro::jsons_to_avro;
//!
//! let schema = br#"{
//!     "title": "Product",
//!     "type": "object",
//!     "properties": {
//!         "productId": { "type": "number" },
//!         "tags": { "type": "array", "items": { "type": "string" } }
//!     },
//!     "required": ["productId"]
//! }"#;
//!
//! let avro = jsons_to_avro(schema).unwrap();
//! assert_eq!(avro, json!({
//!     "type": "record",
//!     "name": "Product",
//!     "fields": [
//!         { "name": "productId", "type": "float" },
//!         { "name": "tags", "type": [{ "type": "array", "items": "string" }, "null"] }
//!     ]
//! }));
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! jsonschema2avro schema.json out.avsc --namespace com.example
//! ```
//!
//! ## Crate Layout
//!
//! - [`schema`] — JSON Schema model and loader (`SchemaNode`)
//! - [`avro`] — Avro type definitions (`AvroType`, `AvroField`)
//! - [`converter`] — JSON Schema → Avro translation
//! - [`common`] — Name sanitizing and JSON pointers
//! - [`error`] — `ParseError`, `TranslationError` and the crate `Error`
//!
//! The CLI binary is enabled with the `cli` feature.
pub mod avro;
pub mod common;
pub mod converter;
pub mod error;
pub mod schema;

pub use avro::{AvroField, AvroType};
pub use converter::{convert_jsons_to_avro, jsons_to_avro, translate, JsonToAvroConverter};
pub use error::{Error, ParseError, TranslationError};
pub use schema::{parse, SchemaNode};
