//! Text rendering for classified resources.
//!
//! Dispatch is an exhaustive match over the closed resource type set, so an
//! unsupported payload is a rendered fallback, never a crash.

use serde_json::Value;
use stacview_core::links::Link;
use stacview_core::resource::ResourceType;
use stacview_core::viewer::ResourceView;

pub fn render(view: &ResourceView) -> String {
    match view.kind {
        ResourceType::Catalog => render_catalog(view),
        ResourceType::Collection => render_collection(view),
        ResourceType::Item => render_item(view),
        ResourceType::Unknown => format!("Unsupported type: {}\n", view.kind.label()),
    }
}

fn render_catalog(view: &ResourceView) -> String {
    let mut out = String::new();
    push_heading(&mut out, text(&view.resource, "title"));
    push_paragraph(&mut out, text(&view.resource, "description"));
    push_links(&mut out, &view.links);
    push_version(&mut out, &view.resource);
    out
}

fn render_collection(view: &ResourceView) -> String {
    let mut out = String::new();
    push_heading(&mut out, text(&view.resource, "title"));
    push_paragraph(&mut out, text(&view.resource, "description"));
    push_extent(&mut out, &view.resource);
    push_links(&mut out, &view.links);
    push_version(&mut out, &view.resource);
    out
}

fn render_item(view: &ResourceView) -> String {
    let mut out = String::new();
    push_heading(&mut out, text(&view.resource, "id"));
    push_properties(&mut out, view.resource.get("properties"));
    push_links(&mut out, &view.links);
    push_version(&mut out, &view.resource);
    out
}

fn text<'a>(resource: &'a Value, key: &str) -> Option<&'a str> {
    resource.get(key).and_then(Value::as_str)
}

fn push_heading(out: &mut String, heading: Option<&str>) {
    if let Some(heading) = heading {
        out.push_str(&format!("# {heading}\n\n"));
    }
}

fn push_paragraph(out: &mut String, paragraph: Option<&str>) {
    if let Some(paragraph) = paragraph {
        out.push_str(&format!("{paragraph}\n\n"));
    }
}

fn push_extent(out: &mut String, resource: &Value) {
    let Some(extent) = resource.get("extent") else {
        return;
    };
    out.push_str("Extent:\n");
    if let Some(bbox) = extent.pointer("/spatial/bbox") {
        out.push_str(&format!("  spatial   {bbox}\n"));
    }
    if let Some(interval) = extent.pointer("/temporal/interval") {
        out.push_str(&format!("  temporal  {interval}\n"));
    }
    out.push('\n');
}

fn push_properties(out: &mut String, properties: Option<&Value>) {
    let Some(properties) = properties.and_then(Value::as_object) else {
        return;
    };
    for (key, value) in properties {
        out.push_str(&format!("  {:<24} {}\n", key, format_value(value)));
    }
    out.push('\n');
}

fn push_links(out: &mut String, links: &[Link]) {
    if links.is_empty() {
        return;
    }
    out.push_str("Links:\n");
    for link in links {
        out.push_str(&format!("  {:<20} {}\n", link.label(), link.href));
    }
    out.push('\n');
}

fn push_version(out: &mut String, resource: &Value) {
    if let Some(version) = text(resource, "stac_version") {
        out.push_str(&format!("STAC Version {version}\n"));
    }
}

/// Strings and numbers render bare; any other value renders as compact JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
