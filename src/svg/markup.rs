//! Markup serializer for hast-style vector documents

use serde_json::Value;

use super::SvgNode;

/// Class and style attached to a document's root element at serialization time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration<'a> {
    /// Space separated class tokens, placed ahead of any existing classes
    pub class: &'a str,
    /// CSS declarations, placed after any existing inline style so they win
    pub style: &'a str,
}

/// SVG attributes whose hast property name is already the attribute name
const CASE_SENSITIVE_ATTRIBUTES: &[&str] = &[
    "viewBox",
    "preserveAspectRatio",
    "patternUnits",
    "patternContentUnits",
    "patternTransform",
    "gradientUnits",
    "gradientTransform",
    "clipPathUnits",
    "maskUnits",
    "maskContentUnits",
    "markerWidth",
    "markerHeight",
    "markerUnits",
    "refX",
    "refY",
    "textLength",
    "lengthAdjust",
    "startOffset",
    "pathLength",
    "baseProfile",
];

/// Rendered form of a property value
enum AttributeValue {
    /// Boolean attribute written without a value
    Bare,
    Text(String),
}

pub(super) fn write_node(node: &SvgNode, out: &mut String, decoration: Option<&Decoration<'_>>) {
    match node {
        SvgNode::Root { children } => {
            let mut pending = decoration;
            for child in children {
                if matches!(child, SvgNode::Element { .. }) {
                    write_node(child, out, pending.take());
                } else {
                    write_node(child, out, None);
                }
            }
        }
        SvgNode::Element {
            tag_name,
            properties,
            children,
        } => {
            out.push('<');
            out.push_str(tag_name);

            let mut class = decoration.map(|d| d.class.to_string());
            let mut style = decoration.map(|d| d.style.to_string());

            for (name, value) in properties {
                let Some(rendered) = attribute_value(value) else {
                    continue;
                };
                match (name.as_str(), &rendered, class.as_mut(), style.as_mut()) {
                    ("className", AttributeValue::Text(existing), Some(merged), _) => {
                        if !existing.is_empty() {
                            merged.push(' ');
                            merged.push_str(existing);
                        }
                    }
                    ("style", AttributeValue::Text(existing), _, Some(merged)) => {
                        let existing = existing.trim().trim_end_matches(';');
                        if !existing.is_empty() {
                            *merged = format!("{}; {}", existing, merged);
                        }
                    }
                    _ => write_attribute(out, &attribute_name(name), &rendered),
                }
            }

            if let Some(class) = class {
                write_attribute(out, "class", &AttributeValue::Text(class));
            }
            if let Some(style) = style {
                write_attribute(out, "style", &AttributeValue::Text(style));
            }

            if children.is_empty() {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in children {
                write_node(child, out, None);
            }
            out.push_str("</");
            out.push_str(tag_name);
            out.push('>');
        }
        SvgNode::Text { value } => escape_into(out, value, false),
        SvgNode::Comment { value } => {
            out.push_str("<!--");
            out.push_str(value);
            out.push_str("-->");
        }
    }
}

fn write_attribute(out: &mut String, name: &str, value: &AttributeValue) {
    out.push(' ');
    out.push_str(name);
    if let AttributeValue::Text(text) = value {
        out.push_str("=\"");
        escape_into(out, text, true);
        out.push('"');
    }
}

fn attribute_value(value: &Value) -> Option<AttributeValue> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(AttributeValue::Bare),
        Value::String(s) => Some(AttributeValue::Text(s.clone())),
        Value::Number(n) => Some(AttributeValue::Text(n.to_string())),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            Some(AttributeValue::Text(joined))
        }
        Value::Object(_) => Some(AttributeValue::Text(value.to_string())),
    }
}

/// Map a hast property name onto its SVG attribute name
fn attribute_name(property: &str) -> String {
    match property {
        "className" => return "class".to_string(),
        "htmlFor" => return "for".to_string(),
        "xLinkHref" => return "xlink:href".to_string(),
        "xmlnsXLink" => return "xmlns:xlink".to_string(),
        "xmlSpace" => return "xml:space".to_string(),
        "xmlLang" => return "xml:lang".to_string(),
        _ => {}
    }
    if CASE_SENSITIVE_ATTRIBUTES.contains(&property) {
        return property.to_string();
    }

    let mut name = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Escape `value` for use inside a double-quoted attribute
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value, true);
    out
}

/// Escape `value` for use as element text
pub(crate) fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value, false);
    out
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_name_mapping() {
        assert_eq!(attribute_name("className"), "class");
        assert_eq!(attribute_name("strokeLinecap"), "stroke-linecap");
        assert_eq!(attribute_name("dataLayerId"), "data-layer-id");
        assert_eq!(attribute_name("viewBox"), "viewBox");
        assert_eq!(attribute_name("xLinkHref"), "xlink:href");
        assert_eq!(attribute_name("d"), "d");
    }

    #[test]
    fn test_escape_helpers() {
        assert_eq!(escape_attribute(r#"a"b<c&"#), "a&quot;b&lt;c&amp;");
        assert_eq!(escape_text(r#"a"b<c>"#), "a\"b&lt;c&gt;");
    }

    #[test]
    fn test_boolean_and_null_properties() {
        let node = SvgNode::element(
            "use",
            [
                ("hidden".to_string(), json!(true)),
                ("focusable".to_string(), json!(false)),
                ("id".to_string(), Value::Null),
            ],
            vec![],
        );
        assert_eq!(node.to_markup(), "<use hidden/>");
    }

    #[test]
    fn test_escaping() {
        let node = SvgNode::element(
            "text",
            [("title".to_string(), json!("a \"b\" & c"))],
            vec![SvgNode::text("1 < 2 & 3 > 2")],
        );
        assert_eq!(
            node.to_markup(),
            r#"<text title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3 &gt; 2</text>"#
        );
    }

    #[test]
    fn test_decoration_merges_existing_class_and_style() {
        let node = SvgNode::element(
            "svg",
            [
                ("className".to_string(), json!(["board", "layer"])),
                ("style".to_string(), json!("display: block;")),
            ],
            vec![],
        );
        let decoration = Decoration {
            class: "copper top",
            style: "color: #cccccc; opacity: 1",
        };
        assert_eq!(
            node.to_decorated_markup(&decoration),
            r#"<svg class="copper top board layer" style="display: block; color: #cccccc; opacity: 1"/>"#
        );
    }

    #[test]
    fn test_decoration_applies_to_first_element_of_root_only() {
        let doc = SvgNode::Root {
            children: vec![
                SvgNode::Comment {
                    value: " engine ".to_string(),
                },
                SvgNode::element("svg", [], vec![SvgNode::element("g", [], vec![])]),
                SvgNode::element("svg", [], vec![]),
            ],
        };
        let decoration = Decoration {
            class: "outline common",
            style: "color: #000000; opacity: 1",
        };
        assert_eq!(
            doc.to_decorated_markup(&decoration),
            "<!-- engine --><svg class=\"outline common\" style=\"color: #000000; opacity: 1\"><g/></svg><svg/>"
        );
    }
}
