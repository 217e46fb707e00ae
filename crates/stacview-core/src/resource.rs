//! Resource type classification.
//!
//! Payloads predating the 1.0.0 catalog format may omit the `type` member, so
//! classification falls back to the next-most-distinguishing field. The
//! order matters: legacy Collections also carry an `id`, so `extent` is
//! checked first.

use serde_json::Value;

/// Semantic type of a fetched resource. Closed set; `Unknown` is a valid
/// classification outcome (rendered as a fallback), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Catalog,
    Collection,
    Item,
    Unknown,
}

impl ResourceType {
    /// Display label. `Unknown` maps to the empty string.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Catalog => "Catalog",
            ResourceType::Collection => "Collection",
            ResourceType::Item => "Item",
            ResourceType::Unknown => "",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a resource by shape. Total: returns a value for any JSON
/// input, never errors.
///
/// Ordered, first match wins:
/// 1. `type` of `"Catalog"`, `"Collection"`, or `"Feature"` (an Item).
/// 2. an `extent` member (pre-1.0 Collections omit `type`).
/// 3. an `id` member (pre-1.0 Catalogs omit `type`).
pub fn classify(resource: &Value) -> ResourceType {
    match resource.get("type").and_then(Value::as_str) {
        Some("Catalog") => return ResourceType::Catalog,
        Some("Collection") => return ResourceType::Collection,
        Some("Feature") => return ResourceType::Item,
        _ => {}
    }
    if resource.get("extent").is_some() {
        return ResourceType::Collection;
    }
    if resource.get("id").is_some() {
        return ResourceType::Catalog;
    }
    ResourceType::Unknown
}
