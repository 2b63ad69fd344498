pub mod conversion;
pub mod state;
pub mod structs;
pub mod types;
pub mod utils;

pub use state::JsonToAvroConverter;

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::avro::AvroType;
use crate::common::names::avro_namespace;
use crate::common::JsonPointer;
use crate::error::{Error, Result, TranslationError};
use crate::schema::{self, SchemaNode};
use conversion::json_type_to_avro_type;
use utils::id_to_avro_namespace;

/// Translate a parsed JSON Schema tree into an Avro type with default settings.
///
/// `name_hint` names the root record when the root object has no `title`.
pub fn translate(node: &SchemaNode, name_hint: &str) -> Result<AvroType, TranslationError> {
    JsonToAvroConverter::new().translate(node, name_hint)
}

/// Convert raw JSON Schema bytes into Avro's canonical JSON encoding.
pub fn jsons_to_avro(json_schema: &[u8]) -> Result<Value> {
    JsonToAvroConverter::new().convert_to_json(json_schema)
}

impl JsonToAvroConverter {
    /// Translate `node` and stamp the resolved namespace on a root record.
    pub fn translate(
        &self,
        node: &SchemaNode,
        name_hint: &str,
    ) -> Result<AvroType, TranslationError> {
        let mut avro_type = json_type_to_avro_type(self, node, name_hint, &JsonPointer::root(), 0)?;
        if let AvroType::Record(record) = &mut avro_type {
            record.namespace = self.resolve_namespace(node);
        }
        Ok(avro_type)
    }

    /// Parse and translate a JSON Schema document, using `root_class_name` as the root hint.
    pub fn convert(&self, json_schema: &[u8]) -> Result<AvroType> {
        let node = schema::parse(json_schema)?;
        Ok(self.translate(&node, &self.root_class_name)?)
    }

    pub fn convert_to_json(&self, json_schema: &[u8]) -> Result<Value> {
        let avro_type = self.convert(json_schema)?;
        Ok(serde_json::to_value(&avro_type)?)
    }

    /// Explicit namespace first, then one derived from the document's `$id`.
    pub fn resolve_namespace(&self, node: &SchemaNode) -> Option<String> {
        self.root_namespace
            .as_deref()
            .map(avro_namespace)
            .filter(|ns| !ns.is_empty())
            .or_else(|| {
                node.id
                    .as_deref()
                    .map(id_to_avro_namespace)
                    .filter(|ns| !ns.is_empty())
            })
    }
}

/// Convert a JSON Schema file into an Avro Schema file.
///
/// Reads the schema from disk or over HTTP, converts it and writes the
/// pretty-printed `.avsc` to `avro_schema_path`. Without an explicit namespace
/// or a usable `$id`, the input's file stem becomes the namespace.
pub fn convert_jsons_to_avro(
    json_schema_file_path: &str,
    avro_schema_path: &Path,
    converter: &JsonToAvroConverter,
) -> Result<()> {
    let content = read_schema_source(json_schema_file_path)?;
    let node = schema::parse(&content)?;
    debug!("schema outline:\n{node}");

    let mut converter = converter.clone();
    if converter.resolve_namespace(&node).is_none() {
        if let Some(stem) = Path::new(json_schema_file_path)
            .file_stem()
            .and_then(|s| s.to_str())
        {
            converter.root_namespace = Some(stem.to_string());
        }
    }

    let avro_type = converter.translate(&node, &converter.root_class_name)?;
    let rendered = serde_json::to_string_pretty(&avro_type)?;
    fs::write(avro_schema_path, rendered).map_err(|source| Error::Io {
        path: avro_schema_path.to_path_buf(),
        source,
    })?;
    info!(
        input = json_schema_file_path,
        output = %avro_schema_path.display(),
        "wrote Avro schema"
    );
    Ok(())
}

fn read_schema_source(location: &str) -> Result<Vec<u8>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return fetch(location);
    }
    fs::read(location).map_err(|source| Error::Io {
        path: PathBuf::from(location),
        source,
    })
}

#[cfg(feature = "cli")]
fn fetch(url: &str) -> Result<Vec<u8>> {
    reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map(|body| body.to_vec())
        .map_err(|e| Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(not(feature = "cli"))]
fn fetch(url: &str) -> Result<Vec<u8>> {
    Err(Error::Fetch {
        url: url.to_string(),
        reason: "HTTP input needs the `cli` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_record_gets_namespace_from_id() {
        let node = SchemaNode::from_value(&json!({
            "$id": "https://example.com/schemas/order.json",
            "type": "object",
            "title": "Order"
        }))
        .unwrap();
        match translate(&node, "document").unwrap() {
            AvroType::Record(r) => assert_eq!(r.namespace.as_deref(), Some("com.example.order.schemas")),
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn explicit_namespace_wins() {
        let node = SchemaNode::from_value(&json!({
            "$id": "https://example.com/order.json",
            "type": "object"
        }))
        .unwrap();
        let converter = JsonToAvroConverter::new().with_namespace("shop.v1");
        assert_eq!(converter.resolve_namespace(&node).as_deref(), Some("shop.v1"));
    }

    #[test]
    fn non_record_root_has_no_namespace() {
        let avro = JsonToAvroConverter::new()
            .with_namespace("shop")
            .convert_to_json(br#"{"type": "string"}"#)
            .unwrap();
        assert_eq!(avro, json!("string"));
    }

    #[test]
    fn parse_failures_surface_as_parse_errors() {
        let err = jsons_to_avro(b"42").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = convert_jsons_to_avro(
            missing.to_str().unwrap(),
            &dir.path().join("out.avsc"),
            &JsonToAvroConverter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
