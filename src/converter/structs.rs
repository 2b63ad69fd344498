use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::avro::{AvroField, AvroRecord, AvroType};
use crate::common::names::avro_name;
use crate::schema::SchemaNode;

/// Suffix appended to the name hint of an untitled object.
pub const RECORD_SUFFIX: &str = "record";

/// Pick the record name for an object node.
///
/// A non-empty `title` wins; otherwise `name_hint` + `"record"`. Either way the
/// result is made Avro-safe.
pub fn record_name(title: Option<&str>, name_hint: &str) -> String {
    match title {
        Some(title) if !title.is_empty() => avro_name(title),
        _ => avro_name(&format!("{name_hint}{RECORD_SUFFIX}")),
    }
}

/// Claim an Avro-safe field name for `property_name` within one record.
///
/// Distinct property names can sanitize to the same identifier (`a-b` and
/// `a_b`). The first keeps the plain name; later ones get the lowest numeric
/// suffix, starting at 2, that is still free.
pub fn unique_field_name(property_name: &str, used: &mut HashSet<String>) -> String {
    let base = avro_name(property_name);
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Create an Avro record type.
pub fn create_avro_record(name: String, doc: Option<String>, fields: Vec<AvroField>) -> AvroType {
    AvroType::Record(AvroRecord {
        name,
        namespace: None,
        doc,
        fields,
    })
}

/// Create the field for one declared property.
///
/// Optional properties are wrapped in a union with `null`. Avro checks a default
/// against the first union branch: a `null` default, explicit or injected by
/// `null_defaults`, puts `null` first, any other default puts it last.
/// `field_name` is the Avro name claimed for the property; when it differs from
/// `property_name` the source spelling is kept under `altnames.json`.
pub fn create_field(
    property_name: &str,
    field_name: String,
    property: &SchemaNode,
    avro_type: AvroType,
    required: bool,
    null_defaults: bool,
) -> AvroField {
    let altname = (field_name != property_name).then(|| property_name.to_string());

    let default = property
        .default
        .clone()
        .or_else(|| (!required && null_defaults).then_some(Value::Null));

    let field_type = match (&default, required) {
        (_, true) => avro_type,
        (Some(Value::Null), false) => AvroType::nullable_first(avro_type),
        (Some(_), false) => AvroType::nullable_last(avro_type),
        (None, false) => AvroType::nullable(avro_type),
    };

    AvroField {
        name: field_name,
        field_type,
        doc: property.description.clone(),
        default,
        altnames: altname.map(|original| IndexMap::from([("json".to_string(), original)])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JsonType;
    use serde_json::json;

    #[test]
    fn record_names() {
        assert_eq!(record_name(Some("Product"), "ignored"), "Product");
        assert_eq!(record_name(Some(""), "dimensions"), "dimensionsrecord");
        assert_eq!(record_name(None, "dimensions"), "dimensionsrecord");
        assert_eq!(record_name(Some("Line Item"), "x"), "Line_Item");
        assert_eq!(record_name(None, "shipping-address"), "shipping_addressrecord");
    }

    #[test]
    fn optional_field_is_nullable_second() {
        let prop = SchemaNode::of_type(JsonType::String);
        let field = create_field("note", "note".into(), &prop, AvroType::String, false, false);
        assert_eq!(field.field_type, AvroType::Union(vec![AvroType::String, AvroType::Null]));
        assert_eq!(field.default, None);
    }

    #[test]
    fn null_defaults_put_null_first() {
        let prop = SchemaNode::of_type(JsonType::String);
        let field = create_field("note", "note".into(), &prop, AvroType::String, false, true);
        assert_eq!(field.field_type, AvroType::Union(vec![AvroType::Null, AvroType::String]));
        assert_eq!(field.default, Some(Value::Null));

        // a required field never gets an injected default
        let field = create_field("note", "note".into(), &prop, AvroType::String, true, true);
        assert_eq!(field.field_type, AvroType::String);
        assert_eq!(field.default, None);
    }

    #[test]
    fn declared_default_keeps_value_first() {
        let mut prop = SchemaNode::of_type(JsonType::Integer);
        prop.default = Some(json!(1));
        prop.description = Some("How many".into());
        let field = create_field("qty", "qty".into(), &prop, AvroType::Int, false, true);
        assert_eq!(field.field_type, AvroType::Union(vec![AvroType::Int, AvroType::Null]));
        assert_eq!(field.default, Some(json!(1)));
        assert_eq!(field.doc.as_deref(), Some("How many"));
    }

    #[test]
    fn declared_default_moves_null_behind_a_union() {
        let mut prop = SchemaNode::of_type(JsonType::Array);
        prop.default = Some(json!([]));
        let placeholder = AvroType::union([AvroType::Null, AvroType::array(AvroType::String)]);
        let field = create_field("tags", "tags".into(), &prop, placeholder, false, false);
        assert_eq!(
            field.field_type,
            AvroType::Union(vec![AvroType::array(AvroType::String), AvroType::Null])
        );
    }

    #[test]
    fn clashing_names_get_numeric_suffixes() {
        let mut used = HashSet::new();
        assert_eq!(unique_field_name("a-b", &mut used), "a_b");
        assert_eq!(unique_field_name("a_b", &mut used), "a_b2");
        assert_eq!(unique_field_name("a.b", &mut used), "a_b3");
        assert_eq!(unique_field_name("a_b2", &mut used), "a_b22");
        assert_eq!(unique_field_name("c", &mut used), "c");
    }

    #[test]
    fn renamed_fields_keep_json_altname() {
        let prop = SchemaNode::of_type(JsonType::Number);
        let field = create_field("unit-price", "unit_price".into(), &prop, AvroType::Float, true, false);
        assert_eq!(field.name, "unit_price");
        assert_eq!(
            field.altnames,
            Some(IndexMap::from([("json".to_string(), "unit-price".to_string())]))
        );

        let prop = SchemaNode::of_type(JsonType::String);
        let field = create_field("a_b", "a_b2".into(), &prop, AvroType::String, true, false);
        assert_eq!(
            field.altnames,
            Some(IndexMap::from([("json".to_string(), "a_b".to_string())]))
        );
    }
}
