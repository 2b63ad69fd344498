use indexmap::IndexMap;
use serde_json::Value;

use crate::common::JsonPointer;
use crate::error::ParseError;
use crate::schema::node::{AdditionalProperties, JsonType, SchemaNode, TypeDecl};

/// Parse raw JSON bytes into a [`SchemaNode`] tree.
pub fn parse(bytes: &[u8]) -> Result<SchemaNode, ParseError> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| ParseError::new(&JsonPointer::root(), format!("not valid JSON: {e}")))?;
    SchemaNode::from_value(&document)
}

impl SchemaNode {
    /// Build a node tree from an already-parsed JSON document.
    pub fn from_value(document: &Value) -> Result<Self, ParseError> {
        if !document.is_object() {
            return Err(ParseError::new(
                &JsonPointer::root(),
                format!("expected a JSON object, found {}", describe(document)),
            ));
        }
        load_node(document, &JsonPointer::root())
    }
}

fn load_node(value: &Value, ptr: &JsonPointer) -> Result<SchemaNode, ParseError> {
    let obj = match value {
        Value::Object(obj) => obj,
        Value::Bool(accepts) => {
            return Ok(SchemaNode {
                boolean_schema: Some(*accepts),
                ..SchemaNode::default()
            })
        }
        other => {
            return Err(ParseError::new(
                ptr,
                format!("expected a schema object or a boolean, found {}", describe(other)),
            ))
        }
    };

    let mut node = SchemaNode::default();
    for (keyword, raw) in obj {
        let at = ptr.join(keyword.as_str());
        match keyword.as_str() {
            "$id" => node.id = Some(expect_string(raw, &at)?),
            "$schema" => node.dialect = Some(expect_string(raw, &at)?),
            "type" => node.kind = Some(load_type(raw, &at)?),
            "format" => node.format = Some(expect_string(raw, &at)?),
            "title" => node.title = Some(expect_string(raw, &at)?),
            "description" => node.description = Some(expect_string(raw, &at)?),
            "default" => node.default = Some(raw.clone()),
            "items" => node.items = Some(Box::new(load_node(raw, &at)?)),
            "properties" => node.properties = Some(load_properties(raw, &at)?),
            "required" => node.required = Some(load_required(raw, &at)?),
            "additionalProperties" => {
                node.additional_properties = Some(match raw {
                    Value::Bool(allowed) => AdditionalProperties::Bool(*allowed),
                    Value::Object(_) => {
                        AdditionalProperties::Schema(Box::new(load_node(raw, &at)?))
                    }
                    other => {
                        return Err(ParseError::new(
                            &at,
                            format!("expected a boolean or a schema object, found {}", describe(other)),
                        ))
                    }
                })
            }
            "enum" => {
                let values = raw.as_array().ok_or_else(|| {
                    ParseError::new(&at, format!("expected an array, found {}", describe(raw)))
                })?;
                node.enum_values = Some(values.clone());
            }
            "const" => node.const_value = Some(raw.clone()),
            "allOf" => node.all_of = Some(load_subschemas(raw, &at)?),
            "anyOf" => node.any_of = Some(load_subschemas(raw, &at)?),
            "oneOf" => node.one_of = Some(load_subschemas(raw, &at)?),
            _ => {
                node.extra.insert(keyword.clone(), raw.clone());
            }
        }
    }
    Ok(node)
}

fn load_type(raw: &Value, ptr: &JsonPointer) -> Result<TypeDecl, ParseError> {
    match raw {
        Value::String(name) => Ok(TypeDecl::Single(JsonType::from_name(name))),
        Value::Array(names) => names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                name.as_str().map(JsonType::from_name).ok_or_else(|| {
                    ParseError::new(
                        &ptr.index(idx),
                        format!("expected a type name, found {}", describe(name)),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypeDecl::Multiple),
        other => Err(ParseError::new(
            ptr,
            format!(
                "expected a type name or an array of type names, found {}",
                describe(other)
            ),
        )),
    }
}

fn load_properties(
    raw: &Value,
    ptr: &JsonPointer,
) -> Result<IndexMap<String, SchemaNode>, ParseError> {
    let obj = raw.as_object().ok_or_else(|| {
        ParseError::new(ptr, format!("expected an object, found {}", describe(raw)))
    })?;
    obj.iter()
        .map(|(name, schema)| {
            load_node(schema, &ptr.join(name.as_str())).map(|node| (name.clone(), node))
        })
        .collect()
}

fn load_required(raw: &Value, ptr: &JsonPointer) -> Result<Vec<String>, ParseError> {
    let names = raw.as_array().ok_or_else(|| {
        ParseError::new(ptr, format!("expected an array, found {}", describe(raw)))
    })?;
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            name.as_str().map(str::to_string).ok_or_else(|| {
                ParseError::new(
                    &ptr.index(idx),
                    format!("expected a property name, found {}", describe(name)),
                )
            })
        })
        .collect()
}

fn load_subschemas(raw: &Value, ptr: &JsonPointer) -> Result<Vec<SchemaNode>, ParseError> {
    let branches = raw.as_array().ok_or_else(|| {
        ParseError::new(ptr, format!("expected an array, found {}", describe(raw)))
    })?;
    branches
        .iter()
        .enumerate()
        .map(|(idx, branch)| load_node(branch, &ptr.index(idx)))
        .collect()
}

fn expect_string(raw: &Value, ptr: &JsonPointer) -> Result<String, ParseError> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| ParseError::new(ptr, format!("expected a string, found {}", describe(raw))))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
