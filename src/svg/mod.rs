//! Vector Document Module
//!
//! The engine renders every layer into a hast-style tree (`root`, `element`,
//! `text` and `comment` nodes). The core treats that tree as opaque: it is
//! only ever serialized, optionally with a class and style attached to the
//! root element.

mod markup;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use markup::Decoration;
pub(crate) use markup::{escape_attribute, escape_text};

/// One node of an engine-produced vector document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SvgNode {
    /// Fragment container without markup of its own
    Root {
        #[serde(default)]
        children: Vec<SvgNode>,
    },
    /// An SVG element such as `<svg>`, `<g>` or `<path>`
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        /// hast property names (`className`, `viewBox`, `strokeWidth`, ...)
        #[serde(default)]
        properties: BTreeMap<String, Value>,
        #[serde(default)]
        children: Vec<SvgNode>,
    },
    Text {
        value: String,
    },
    Comment {
        value: String,
    },
}

impl SvgNode {
    /// Create an element node
    pub fn element(
        tag_name: impl Into<String>,
        properties: impl IntoIterator<Item = (String, Value)>,
        children: Vec<SvgNode>,
    ) -> Self {
        SvgNode::Element {
            tag_name: tag_name.into(),
            properties: properties.into_iter().collect(),
            children,
        }
    }

    /// Create a text node
    pub fn text(value: impl Into<String>) -> Self {
        SvgNode::Text {
            value: value.into(),
        }
    }

    /// The element that carries the document's class and style.
    ///
    /// For an element this is the node itself; for a `root` it is the first
    /// element child.
    pub fn root_element(&self) -> Option<&SvgNode> {
        match self {
            SvgNode::Element { .. } => Some(self),
            SvgNode::Root { children } => children
                .iter()
                .find(|c| matches!(c, SvgNode::Element { .. })),
            _ => None,
        }
    }

    /// Look up a property on this element
    pub fn property(&self, name: &str) -> Option<&Value> {
        match self {
            SvgNode::Element { properties, .. } => properties.get(name),
            _ => None,
        }
    }

    /// The root element's `viewBox`, as written by the engine
    pub fn view_box(&self) -> Option<&Value> {
        self.root_element()?.property("viewBox")
    }

    /// Serialize the document as markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        markup::write_node(self, &mut out, None);
        out
    }

    /// Serialize the document with `decoration` applied to its root element.
    ///
    /// The tree itself is only borrowed; the class and style are merged into
    /// the output stream.
    pub fn to_decorated_markup(&self, decoration: &Decoration<'_>) -> String {
        let mut out = String::new();
        markup::write_node(self, &mut out, Some(decoration));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> SvgNode {
        serde_json::from_value(json!({
            "type": "element",
            "tagName": "svg",
            "properties": {
                "viewBox": "0 0 100 50",
                "xmlns": "http://www.w3.org/2000/svg",
                "fillRule": "evenodd"
            },
            "children": [
                {
                    "type": "element",
                    "tagName": "g",
                    "properties": { "fill": "currentColor", "strokeWidth": 0 },
                    "children": [
                        { "type": "element", "tagName": "path", "properties": { "d": "M0 0L10 10" }, "children": [] }
                    ]
                }
            ],
            "position": { "start": { "line": 1 } }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_hast_tree() {
        let doc = sample_document();
        match &doc {
            SvgNode::Element {
                tag_name, children, ..
            } => {
                assert_eq!(tag_name, "svg");
                assert_eq!(children.len(), 1);
            }
            other => panic!("unexpected node: {:?}", other),
        }
        assert_eq!(doc.view_box(), Some(&json!("0 0 100 50")));
    }

    #[test]
    fn test_to_markup_maps_property_names() {
        let markup = sample_document().to_markup();
        assert!(markup.starts_with("<svg "));
        assert!(markup.contains(r#"viewBox="0 0 100 50""#));
        assert!(markup.contains(r#"fill-rule="evenodd""#));
        assert!(markup.contains(r#"stroke-width="0""#));
        assert!(markup.contains(r#"<path d="M0 0L10 10"/>"#));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_root_element_skips_leading_text() {
        let doc = SvgNode::Root {
            children: vec![
                SvgNode::text("\n"),
                SvgNode::element("svg", [], vec![]),
            ],
        };
        let root = doc.root_element().unwrap();
        assert!(matches!(root, SvgNode::Element { tag_name, .. } if tag_name == "svg"));
    }

    #[test]
    fn test_text_has_no_root_element() {
        assert!(SvgNode::text("plain").root_element().is_none());
    }
}
