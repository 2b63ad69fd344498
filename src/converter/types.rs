use crate::avro::AvroType;
use crate::schema::JsonType;

/// Convert a JSON Schema primitive into an Avro primitive.
///
/// `format` only widens numbers: `int64` integers become `long`,
/// `double` numbers become `double`. Returns `None` for arrays, objects
/// and unknown type names.
pub fn json_schema_primitive_to_avro_type(kind: &JsonType, format: Option<&str>) -> Option<AvroType> {
    let avro_type = match kind {
        JsonType::Null => AvroType::Null,
        JsonType::Boolean => AvroType::Boolean,
        JsonType::Integer if format == Some("int64") => AvroType::Long,
        JsonType::Integer => AvroType::Int,
        JsonType::Number if format == Some("double") => AvroType::Double,
        JsonType::Number => AvroType::Float,
        JsonType::String => AvroType::String,
        JsonType::Array | JsonType::Object | JsonType::Other(_) => return None,
    };
    Some(avro_type)
}
