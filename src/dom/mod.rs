//! Document capabilities needed by the hint generator.
//!
//! The generator only needs to query, read attributes, create elements and
//! insert them, so it is written against [`HintDocument`] instead of a
//! concrete tree. [`HtmlDocument`] is the kuchiki-backed implementation used
//! by the build command.

mod html;

pub use html::HtmlDocument;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("could not create `<{0}>` element")]
    CreateElement(String),
}

/// A mutable, queryable HTML document.
pub trait HintDocument {
    /// Handle to an element in the tree.
    type Node: Clone;

    fn head(&self) -> Option<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    /// All elements under `scope` matching `selector`, in document order.
    fn select(&self, scope: &Self::Node, selector: &str) -> Result<Vec<Self::Node>, DomError>;

    /// First element under `scope` matching `selector`.
    fn select_first(
        &self,
        scope: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, DomError> {
        Ok(self.select(scope, selector)?.into_iter().next())
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Insert `node` immediately before `anchor`, or as the last child of
    /// `parent` when there is no anchor.
    fn insert_before(&mut self, parent: &Self::Node, node: &Self::Node, anchor: Option<&Self::Node>);
}
