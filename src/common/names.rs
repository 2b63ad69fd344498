use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").unwrap());
static INVALID_NAMESPACE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_\.]").unwrap());

/// Convert a raw string into a valid Avro name.
///
/// Ensures the identifier starts with a letter or underscore,
/// replaces invalid characters with `_`, and prefixes leading digits.
pub fn avro_name(name: &str) -> String {
    let mut val = INVALID_NAME_CHARS.replace_all(name, "_").to_string();
    if val.is_empty() || !val.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        val = format!("_{val}");
    }
    val
}

/// Convert an input string into a valid Avro namespace.
///
/// Replaces invalid chars with `_` but preserves dots as separators.
/// Prefixes with `_` if starting with a digit.
pub fn avro_namespace(name: &str) -> String {
    let mut val = INVALID_NAMESPACE_CHARS.replace_all(name, "_").to_string();
    if val.starts_with(|c: char| c.is_ascii_digit()) {
        val = format!("_{val}");
    }
    val
}

/// Compose a namespace string from multiple parts.
///
/// Empty parts are skipped. Each part is normalized with `avro_namespace`.
pub fn compose_namespace(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| avro_namespace(p))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Product", "Product")]
    #[case("dimensionsrecord", "dimensionsrecord")]
    #[case("Order Line", "Order_Line")]
    #[case("product-id", "product_id")]
    #[case("2fa", "_2fa")]
    #[case("", "_")]
    fn names_are_made_avro_safe(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(avro_name(raw), expected);
    }

    #[test]
    fn namespaces_keep_dots() {
        assert_eq!(avro_namespace("com.example-shop.v1"), "com.example_shop.v1");
        assert_eq!(avro_namespace("1shop"), "_1shop");
        assert_eq!(compose_namespace(&["com", "", "example"]), "com.example");
    }
}
