use url::Url;

use crate::common::names::compose_namespace;

/// Convert a JSON Schema `$id` URI into an Avro namespace.
///
/// The host is reversed and the path (without extension) follows, also
/// reversed: `https://example.com/schemas/order.json` → `com.example.order.schemas`.
/// Returns an empty string when `id` is not an absolute URI.
pub fn id_to_avro_namespace(id: &str) -> String {
    let Ok(parsed_url) = Url::parse(id) else {
        return String::new();
    };

    let path_no_ext = {
        let path = parsed_url.path().trim_matches('/');
        let before_dot = path.split('.').next().unwrap_or("");
        before_dot.replace('-', "_")
    };
    let reversed_path_segments: Vec<&str> = path_no_ext
        .split('/')
        .filter(|s| !s.is_empty())
        .rev()
        .collect();
    let namespace_suffix = compose_namespace(&reversed_path_segments);

    let namespace_prefix = parsed_url
        .host_str()
        .map(|h| {
            let parts: Vec<&str> = h.split('.').rev().collect();
            compose_namespace(&parts)
        })
        .unwrap_or_default();

    compose_namespace(&[&namespace_prefix, &namespace_suffix])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_to_namespace() {
        assert_eq!(
            id_to_avro_namespace("https://example.com/schemas/order.json"),
            "com.example.order.schemas"
        );
        assert_eq!(
            id_to_avro_namespace("https://shop.example.org/product-catalog.schema.json"),
            "org.example.shop.product_catalog"
        );
        assert_eq!(id_to_avro_namespace("https://example.com"), "com.example");
        assert_eq!(id_to_avro_namespace("urn:example:order"), "example_order");
        assert_eq!(id_to_avro_namespace("order.json"), "");
    }
}
