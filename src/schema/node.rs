use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A JSON Schema `type` name.
///
/// Names outside the seven standard ones are kept verbatim in `Other`; they are
/// only an error once the translator has to map them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
    Other(String),
}

impl JsonType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "null" => JsonType::Null,
            "boolean" => JsonType::Boolean,
            "integer" => JsonType::Integer,
            "number" => JsonType::Number,
            "string" => JsonType::String,
            "array" => JsonType::Array,
            "object" => JsonType::Object,
            other => JsonType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::Other(name) => name,
        }
    }
}

/// The value of the `type` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    /// `"type": "string"`
    Single(JsonType),
    /// `"type": ["string", "null"]`, kept even with one element.
    Multiple(Vec<JsonType>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaNode>),
}

/// Parsed JSON Schema node.
///
/// Keywords the model does not interpret land in `extra`, in source order, so
/// [`SchemaNode::to_value`] can reproduce the document. A `true`/`false`
/// sub-schema is a node with only `boolean_schema` set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub boolean_schema: Option<bool>,
    pub id: Option<String>,
    pub dialect: Option<String>,
    pub kind: Option<TypeDecl>,
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub items: Option<Box<SchemaNode>>,
    pub properties: Option<IndexMap<String, SchemaNode>>,
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub enum_values: Option<Vec<Value>>,
    pub const_value: Option<Value>,
    pub all_of: Option<Vec<SchemaNode>>,
    pub any_of: Option<Vec<SchemaNode>>,
    pub one_of: Option<Vec<SchemaNode>>,
    pub extra: IndexMap<String, Value>,
}

impl SchemaNode {
    /// Node with a single `type` and nothing else.
    pub fn of_type(kind: JsonType) -> Self {
        Self {
            kind: Some(TypeDecl::Single(kind)),
            ..Self::default()
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|req| req.iter().any(|r| r == property))
    }

    /// `"additionalProperties": false`
    pub fn refuses_additional_properties(&self) -> bool {
        matches!(
            self.additional_properties,
            Some(AdditionalProperties::Bool(false))
        )
    }

    /// Declared properties in source order.
    pub fn properties(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.properties.iter().flat_map(|props| props.iter())
    }

    /// Re-encode the node as a JSON Schema document.
    ///
    /// Interpreted keywords come first in a fixed order, followed by the
    /// uninterpreted ones in the order they were read.
    pub fn to_value(&self) -> Value {
        if let Some(accepts) = self.boolean_schema {
            return Value::Bool(accepts);
        }
        let mut out = Map::new();
        if let Some(id) = &self.id {
            out.insert("$id".into(), Value::String(id.clone()));
        }
        if let Some(dialect) = &self.dialect {
            out.insert("$schema".into(), Value::String(dialect.clone()));
        }
        if let Some(title) = &self.title {
            out.insert("title".into(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            out.insert("description".into(), Value::String(description.clone()));
        }
        match &self.kind {
            Some(TypeDecl::Single(t)) => {
                out.insert("type".into(), Value::String(t.as_str().to_string()));
            }
            Some(TypeDecl::Multiple(ts)) => {
                let names = ts
                    .iter()
                    .map(|t| Value::String(t.as_str().to_string()))
                    .collect();
                out.insert("type".into(), Value::Array(names));
            }
            None => {}
        }
        if let Some(format) = &self.format {
            out.insert("format".into(), Value::String(format.clone()));
        }
        if let Some(default) = &self.default {
            out.insert("default".into(), default.clone());
        }
        if let Some(items) = &self.items {
            out.insert("items".into(), items.to_value());
        }
        if let Some(props) = &self.properties {
            let props = props
                .iter()
                .map(|(name, node)| (name.clone(), node.to_value()))
                .collect();
            out.insert("properties".into(), Value::Object(props));
        }
        if let Some(required) = &self.required {
            let names = required.iter().cloned().map(Value::String).collect();
            out.insert("required".into(), Value::Array(names));
        }
        match &self.additional_properties {
            Some(AdditionalProperties::Bool(b)) => {
                out.insert("additionalProperties".into(), Value::Bool(*b));
            }
            Some(AdditionalProperties::Schema(node)) => {
                out.insert("additionalProperties".into(), node.to_value());
            }
            None => {}
        }
        if let Some(values) = &self.enum_values {
            out.insert("enum".into(), Value::Array(values.clone()));
        }
        if let Some(value) = &self.const_value {
            out.insert("const".into(), value.clone());
        }
        for (keyword, branches) in [
            ("allOf", &self.all_of),
            ("anyOf", &self.any_of),
            ("oneOf", &self.one_of),
        ] {
            if let Some(branches) = branches {
                let branches = branches.iter().map(SchemaNode::to_value).collect();
                out.insert(keyword.into(), Value::Array(branches));
            }
        }
        for (keyword, value) in &self.extra {
            out.insert(keyword.clone(), value.clone());
        }
        Value::Object(out)
    }
}

/// Indented outline of the tree, one line per node. Required properties are
/// marked with `*`.
///
/// ```text
/// object "Product"
///   productId*: number
///   tags: array
///     items: string
/// ```
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

impl SchemaNode {
    fn kind_label(&self) -> String {
        match (self.boolean_schema, &self.kind) {
            (Some(accepts), _) => accepts.to_string(),
            (None, Some(TypeDecl::Single(kind))) => kind.as_str().to_string(),
            (None, Some(TypeDecl::Multiple(kinds))) => kinds
                .iter()
                .map(JsonType::as_str)
                .collect::<Vec<_>>()
                .join("|"),
            (None, None) => "untyped".to_string(),
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{}", self.kind_label())?;
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            write!(f, " {title:?}")?;
        }
        if let Some(description) = &self.description {
            write!(f, " ({description})")?;
        }
        writeln!(f)?;

        let pad = indent + 2;
        if let Some(items) = &self.items {
            write!(f, "{:pad$}items: ", "")?;
            items.write_outline(f, pad)?;
        }
        for (name, property) in self.properties() {
            let marker = if self.is_required(name) { "*" } else { "" };
            write!(f, "{:pad$}{name}{marker}: ", "")?;
            property.write_outline(f, pad)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_round_trip() {
        for name in ["null", "boolean", "integer", "number", "string", "array", "object"] {
            assert_eq!(JsonType::from_name(name).as_str(), name);
        }
        assert_eq!(
            JsonType::from_name("decimal"),
            JsonType::Other("decimal".into())
        );
        assert_eq!(JsonType::from_name("decimal").as_str(), "decimal");
    }

    #[test]
    fn required_and_refusal_helpers() {
        let mut node = SchemaNode::of_type(JsonType::Object);
        assert!(!node.is_required("id"));
        assert!(!node.refuses_additional_properties());

        node.required = Some(vec!["id".into()]);
        node.additional_properties = Some(AdditionalProperties::Bool(false));
        assert!(node.is_required("id"));
        assert!(!node.is_required("name"));
        assert!(node.refuses_additional_properties());

        node.additional_properties = Some(AdditionalProperties::Bool(true));
        assert!(!node.refuses_additional_properties());
    }

    #[test]
    fn outline_lists_nested_properties() {
        let mut tags = SchemaNode::of_type(JsonType::Array);
        tags.items = Some(Box::new(SchemaNode::of_type(JsonType::String)));
        let mut dims = SchemaNode::of_type(JsonType::Object);
        dims.properties = Some(IndexMap::from([(
            "width".to_string(),
            SchemaNode::of_type(JsonType::Number),
        )]));
        let mut root = SchemaNode::of_type(JsonType::Object);
        root.title = Some("Product".into());
        root.description = Some("A sellable item".into());
        root.required = Some(vec!["productId".into()]);
        root.properties = Some(IndexMap::from([
            ("productId".to_string(), SchemaNode::of_type(JsonType::Number)),
            ("tags".to_string(), tags),
            ("dimensions".to_string(), dims),
            ("extra".to_string(), SchemaNode::default()),
        ]));

        let expected = [
            "object \"Product\" (A sellable item)",
            "  productId*: number",
            "  tags: array",
            "    items: string",
            "  dimensions: object",
            "    width: number",
            "  extra: untyped",
            "",
        ];
        assert_eq!(root.to_string(), expected.join("\n"));
    }

    #[test]
    fn to_value_emits_extras_last() {
        let mut node = SchemaNode::of_type(JsonType::String);
        node.extra.insert("maxLength".into(), json!(12));
        node.title = Some("Sku".into());
        assert_eq!(
            node.to_value(),
            json!({"title": "Sku", "type": "string", "maxLength": 12})
        );
    }
}
