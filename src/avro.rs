use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// An Avro schema.
///
/// Serializes to Avro's canonical JSON encoding: primitives as bare strings,
/// unions as arrays, everything else as an object with a `"type"` key.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroType {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Array(Box<AvroType>),
    Map(Box<AvroType>),
    Record(AvroRecord),
    Enum(AvroEnum),
    Fixed(AvroFixed),
    Union(Vec<AvroType>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvroRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub fields: Vec<AvroField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvroEnum {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvroFixed {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvroField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: AvroType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// `Some(Value::Null)` is emitted as `"default": null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Original spellings of `name` keyed by source format, e.g. `{"json": "unit-price"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altnames: Option<IndexMap<String, String>>,
}

impl AvroField {
    pub fn new(name: impl Into<String>, field_type: AvroType) -> Self {
        Self {
            name: name.into(),
            field_type,
            doc: None,
            default: None,
            altnames: None,
        }
    }
}

impl AvroType {
    /// Build a union, splicing in the members of nested unions and dropping
    /// repeated members. A single surviving member is returned unwrapped.
    pub fn union(members: impl IntoIterator<Item = AvroType>) -> AvroType {
        let mut flat: Vec<AvroType> = Vec::new();
        for member in members {
            let inner = match member {
                AvroType::Union(inner) => inner,
                other => vec![other],
            };
            for t in inner {
                if !flat.contains(&t) {
                    flat.push(t);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            AvroType::Union(flat)
        }
    }

    /// `[t, "null"]`
    pub fn nullable(t: AvroType) -> AvroType {
        AvroType::union([t, AvroType::Null])
    }

    /// Like [`AvroType::nullable`], but `null` ends up last even when `t` is a
    /// union that already contains it. Used when a non-null default has to
    /// match the first branch.
    pub fn nullable_last(t: AvroType) -> AvroType {
        let members = match t {
            AvroType::Union(members) => members,
            other => vec![other],
        };
        AvroType::union(
            members
                .into_iter()
                .filter(|m| !m.is_null())
                .chain([AvroType::Null]),
        )
    }

    /// `["null", t]`, the form a `"default": null` requires.
    pub fn nullable_first(t: AvroType) -> AvroType {
        AvroType::union([AvroType::Null, t])
    }

    pub fn array(items: AvroType) -> AvroType {
        AvroType::Array(Box::new(items))
    }

    pub fn map(values: AvroType) -> AvroType {
        AvroType::Map(Box::new(values))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AvroType::Null)
    }

    /// The Avro type name (`"record"`, `"long"`, ...), `"union"` for unions.
    pub fn type_name(&self) -> &'static str {
        match self {
            AvroType::Null => "null",
            AvroType::Boolean => "boolean",
            AvroType::Int => "int",
            AvroType::Long => "long",
            AvroType::Float => "float",
            AvroType::Double => "double",
            AvroType::Bytes => "bytes",
            AvroType::String => "string",
            AvroType::Array(_) => "array",
            AvroType::Map(_) => "map",
            AvroType::Record(_) => "record",
            AvroType::Enum(_) => "enum",
            AvroType::Fixed(_) => "fixed",
            AvroType::Union(_) => "union",
        }
    }
}

/// `{"type": <tag>, ..body}`
#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    tag: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for AvroType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AvroType::Null
            | AvroType::Boolean
            | AvroType::Int
            | AvroType::Long
            | AvroType::Float
            | AvroType::Double
            | AvroType::Bytes
            | AvroType::String => serializer.serialize_str(self.type_name()),
            AvroType::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            AvroType::Map(values) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("values", values)?;
                map.end()
            }
            AvroType::Record(body) => Tagged { tag: "record", body }.serialize(serializer),
            AvroType::Enum(body) => Tagged { tag: "enum", body }.serialize(serializer),
            AvroType::Fixed(body) => Tagged { tag: "fixed", body }.serialize(serializer),
            AvroType::Union(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(t: &AvroType) -> Value {
        serde_json::to_value(t).unwrap()
    }

    #[test]
    fn primitives_are_bare_strings() {
        assert_eq!(encode(&AvroType::Long), json!("long"));
        assert_eq!(encode(&AvroType::Bytes), json!("bytes"));
        assert_eq!(
            encode(&AvroType::array(AvroType::String)),
            json!({"type": "array", "items": "string"})
        );
        assert_eq!(
            encode(&AvroType::map(AvroType::Double)),
            json!({"type": "map", "values": "double"})
        );
    }

    #[test]
    fn named_types_carry_their_tag() {
        let mut sku = AvroField::new("sku", AvroType::nullable(AvroType::String));
        sku.doc = Some("Stock keeping unit".into());
        sku.default = Some(Value::Null);
        let record = AvroType::Record(AvroRecord {
            name: "Item".into(),
            namespace: Some("com.example".into()),
            doc: None,
            fields: vec![sku],
        });
        assert_eq!(
            encode(&record),
            json!({
                "type": "record",
                "name": "Item",
                "namespace": "com.example",
                "fields": [{
                    "name": "sku",
                    "type": ["string", "null"],
                    "doc": "Stock keeping unit",
                    "default": null
                }]
            })
        );

        let status = AvroType::Enum(AvroEnum {
            name: "Status".into(),
            namespace: None,
            doc: None,
            symbols: vec!["OPEN".into(), "CLOSED".into()],
        });
        assert_eq!(
            encode(&status),
            json!({"type": "enum", "name": "Status", "symbols": ["OPEN", "CLOSED"]})
        );

        let md5 = AvroType::Fixed(AvroFixed {
            name: "md5".into(),
            namespace: None,
            size: 16,
        });
        assert_eq!(encode(&md5), json!({"type": "fixed", "name": "md5", "size": 16}));
    }

    #[test]
    fn unions_never_nest() {
        let inner = AvroType::union([AvroType::Null, AvroType::array(AvroType::String)]);
        let outer = AvroType::nullable(inner);
        assert_eq!(
            outer,
            AvroType::Union(vec![AvroType::Null, AvroType::array(AvroType::String)])
        );
        assert_eq!(encode(&outer), json!(["null", {"type": "array", "items": "string"}]));
    }

    #[test]
    fn single_member_union_is_unwrapped() {
        assert_eq!(AvroType::nullable(AvroType::Null), AvroType::Null);
        assert_eq!(
            AvroType::nullable_first(AvroType::Int),
            AvroType::Union(vec![AvroType::Null, AvroType::Int])
        );
    }

    #[test]
    fn nullable_last_reorders_existing_null() {
        let inner = AvroType::union([AvroType::Null, AvroType::array(AvroType::String)]);
        assert_eq!(
            AvroType::nullable_last(inner),
            AvroType::Union(vec![AvroType::array(AvroType::String), AvroType::Null])
        );
        assert_eq!(AvroType::nullable_last(AvroType::Null), AvroType::Null);
    }
}
