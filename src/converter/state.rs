/// Translation settings for JSON Schema → Avro Schema.
///
/// Holds no per-call state; one converter can serve any number of
/// translations, including concurrent ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonToAvroConverter {
    /// Namespace stamped on the root record. When unset the document's `$id` is used.
    pub root_namespace: Option<String>,
    /// Name hint for the root node, used when it has no `title`.
    pub root_class_name: String,
    /// Deepest nesting level translated before failing with `depth-exceeded`.
    pub max_recursion_depth: usize,
    /// Emit optional fields as `["null", T]` with `"default": null`.
    pub null_defaults: bool,
}

impl Default for JsonToAvroConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonToAvroConverter {
    /// Create a new converter with default settings.
    pub fn new() -> Self {
        Self {
            root_namespace: None,
            root_class_name: "document".to_string(),
            max_recursion_depth: 40,
            null_defaults: false,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = Some(namespace.into());
        self
    }

    pub fn with_root_class_name(mut self, name: impl Into<String>) -> Self {
        self.root_class_name = name.into();
        self
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    pub fn with_null_defaults(mut self, enabled: bool) -> Self {
        self.null_defaults = enabled;
        self
    }
}
