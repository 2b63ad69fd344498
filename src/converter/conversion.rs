use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::avro::AvroType;
use crate::common::JsonPointer;
use crate::converter::state::JsonToAvroConverter;
use crate::converter::structs::{create_avro_record, create_field, record_name, unique_field_name};
use crate::converter::types::json_schema_primitive_to_avro_type;
use crate::error::TranslationError;
use crate::schema::{JsonType, SchemaNode, TypeDecl};

/// Convert a JSON Schema node into an Avro type.
///
/// `pointer` is the node's location in the source document and `depth` its
/// nesting level (the root is 0). `name_hint` names the record when the node
/// is an untitled object.
pub fn json_type_to_avro_type(
    converter: &JsonToAvroConverter,
    node: &SchemaNode,
    name_hint: &str,
    pointer: &JsonPointer,
    depth: usize,
) -> Result<AvroType, TranslationError> {
    if depth > converter.max_recursion_depth {
        return Err(TranslationError::DepthExceeded {
            pointer: pointer.clone(),
            limit: converter.max_recursion_depth,
        });
    }
    trace!(pointer = %pointer, depth, "translating node");

    let kind = match &node.kind {
        Some(TypeDecl::Single(kind)) => kind,
        Some(TypeDecl::Multiple(kinds)) => {
            return Err(TranslationError::UnsupportedMultitype {
                pointer: pointer.clone(),
                kinds: kinds.iter().map(|k| k.as_str().to_string()).collect(),
            });
        }
        None => {
            let detail = match node.boolean_schema {
                Some(accepts) => format!("boolean schema `{accepts}`"),
                None => "missing `type`".to_string(),
            };
            return Err(TranslationError::Unrepresentable {
                pointer: pointer.clone(),
                detail,
            });
        }
    };

    match kind {
        JsonType::Array => json_schema_array_to_avro_type(converter, node, name_hint, pointer, depth),
        JsonType::Object => {
            json_schema_object_to_avro_record(converter, node, name_hint, pointer, depth)
        }
        JsonType::Other(name) => Err(TranslationError::Unrepresentable {
            pointer: pointer.clone(),
            detail: format!("unknown type `{name}`"),
        }),
        JsonType::Null
        | JsonType::Boolean
        | JsonType::Integer
        | JsonType::Number
        | JsonType::String => json_schema_primitive_to_avro_type(kind, node.format.as_deref())
            .ok_or_else(|| TranslationError::Unrepresentable {
                pointer: pointer.clone(),
                detail: format!("no primitive mapping for `{}`", kind.as_str()),
            }),
    }
}

/// Arrays with `items` map element-wise; without `items` the element type is
/// unknown and a nullable `array<string>` placeholder is emitted.
fn json_schema_array_to_avro_type(
    converter: &JsonToAvroConverter,
    node: &SchemaNode,
    name_hint: &str,
    pointer: &JsonPointer,
    depth: usize,
) -> Result<AvroType, TranslationError> {
    match &node.items {
        Some(items) => {
            let item_type = json_type_to_avro_type(
                converter,
                items,
                name_hint,
                &pointer.join("items"),
                depth + 1,
            )?;
            Ok(AvroType::array(item_type))
        }
        None => {
            warn!(pointer = %pointer, "array without `items`, emitting nullable array<string>");
            Ok(AvroType::union([
                AvroType::Null,
                AvroType::array(AvroType::String),
            ]))
        }
    }
}

/// Convert a JSON Schema object declaration to an Avro record.
///
/// When `additionalProperties` is `false`, properties missing from `required`
/// are left out of the record entirely. Field names are unique within the
/// record, and an untitled nested object is named after its field, so sibling
/// records never share a name.
pub fn json_schema_object_to_avro_record(
    converter: &JsonToAvroConverter,
    node: &SchemaNode,
    name_hint: &str,
    pointer: &JsonPointer,
    depth: usize,
) -> Result<AvroType, TranslationError> {
    let name = record_name(node.title.as_deref(), name_hint);
    let closed = node.refuses_additional_properties();
    let properties_pointer = pointer.join("properties");

    let mut fields = Vec::new();
    let mut used_names = HashSet::new();
    for (property_name, property) in node.properties() {
        let required = node.is_required(property_name);
        if closed && !required {
            debug!(
                record = %name,
                property = %property_name,
                "dropping optional property of a record with additionalProperties: false"
            );
            continue;
        }

        let field_name = unique_field_name(property_name, &mut used_names);
        let avro_type = json_type_to_avro_type(
            converter,
            property,
            &field_name,
            &properties_pointer.join(property_name.as_str()),
            depth + 1,
        )?;
        fields.push(create_field(
            property_name,
            field_name,
            property,
            avro_type,
            required,
            converter.null_defaults,
        ));
    }

    debug!(record = %name, pointer = %pointer, fields = fields.len(), "built record");
    Ok(create_avro_record(name, node.description.clone(), fields))
}
