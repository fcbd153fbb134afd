//! kuchiki-backed [`HintDocument`].

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use super::{DomError, HintDocument};

/// A parsed HTML document.
///
/// Parsing never fails: the HTML5 tree builder recovers from malformed input
/// and always synthesizes `<html>`, `<head>` and `<body>`.
#[derive(Debug)]
pub struct HtmlDocument {
    root: NodeRef,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchiki::parse_html().one(html),
        }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Serialize the whole document, doctype included.
    pub fn to_html(&self) -> std::io::Result<String> {
        let mut output = Vec::new();
        self.root.serialize(&mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    fn first(&self, selector: &str) -> Option<NodeRef> {
        self.root
            .select_first(selector)
            .ok()
            .map(|element| element.as_node().clone())
    }
}

impl HintDocument for HtmlDocument {
    type Node = NodeRef;

    fn head(&self) -> Option<NodeRef> {
        self.first("head")
    }

    fn body(&self) -> Option<NodeRef> {
        self.first("body")
    }

    fn select(&self, scope: &NodeRef, selector: &str) -> Result<Vec<NodeRef>, DomError> {
        let matches = scope
            .select(selector)
            .map_err(|()| DomError::Selector(selector.to_string()))?;
        Ok(matches.map(|element| element.as_node().clone()).collect())
    }

    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String> {
        let element = node.as_element()?;
        let attributes = element.attributes.borrow();
        attributes.get(name).map(str::to_string)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeRef, DomError> {
        // kuchiki has no public element constructor without html5ever names,
        // so let the parser build the element and lift it out of the scratch tree.
        let scratch = kuchiki::parse_html().one(format!("<{tag}>"));
        let element = scratch
            .select_first(tag)
            .map_err(|()| DomError::CreateElement(tag.to_string()))?
            .as_node()
            .clone();
        element.detach();
        Ok(element)
    }

    fn set_attribute(&mut self, node: &NodeRef, name: &str, value: &str) {
        if let Some(element) = node.as_element() {
            element
                .attributes
                .borrow_mut()
                .insert(name, value.to_string());
        }
    }

    fn insert_before(&mut self, parent: &NodeRef, node: &NodeRef, anchor: Option<&NodeRef>) {
        match anchor {
            Some(anchor) => anchor.insert_before(node.clone()),
            None => parent.append(node.clone()),
        }
    }
}
