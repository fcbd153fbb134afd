//! Document processing pipeline.
//!
//! A document is parsed once, run through every configured [`Processor`] in
//! order, then serialized:
//!
//! ```text
//! html ──parse──▶ HtmlDocument ──processors──▶ HtmlDocument ──serialize──▶ html
//! ```
//!
//! Processors are selected by name from configuration; the default list holds
//! only the resource hint injector.

pub mod transform;

use anyhow::{Context, Result};

use crate::dom::HtmlDocument;
use crate::reference::ReferenceInput;

pub use transform::{Hint, HintError, HintInjector, HintRel, HintReport};

/// Resource lists handed to processors.
#[derive(Debug, Clone, Default)]
pub struct HintOptions {
    pub preconnect: Vec<ReferenceInput>,
    pub preload: Vec<ReferenceInput>,
}

/// A named document transform.
pub trait Processor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, doc: &mut HtmlDocument, options: &HintOptions)
    -> Result<HintReport, HintError>;
}

/// Processor wrapping [`HintInjector`].
pub struct ResourceHints;

impl ResourceHints {
    pub const NAME: &'static str = "resource-hints";
}

impl Processor for ResourceHints {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process(
        &self,
        doc: &mut HtmlDocument,
        options: &HintOptions,
    ) -> Result<HintReport, HintError> {
        HintInjector::new(options).inject(doc)
    }
}

/// Names accepted in the `processors` config list.
pub const PROCESSOR_NAMES: &[&str] = &[ResourceHints::NAME];

/// Look up a processor by its config name.
pub fn processor_by_name(name: &str) -> Option<Box<dyn Processor>> {
    match name {
        ResourceHints::NAME => Some(Box::new(ResourceHints)),
        _ => None,
    }
}

/// Parse `html`, run `processors` in order, and serialize the result.
///
/// Reports from every processor are summed. The first failing processor
/// aborts the document.
pub fn process_html(
    html: &str,
    options: &HintOptions,
    processors: &[Box<dyn Processor>],
) -> Result<(String, HintReport)> {
    let mut doc = HtmlDocument::parse(html);
    let mut report = HintReport::default();

    for processor in processors {
        let step = processor
            .process(&mut doc, options)
            .with_context(|| format!("processor `{}` failed", processor.name()))?;
        report.preconnect += step.preconnect;
        report.preload += step.preload;
    }

    Ok((doc.to_html()?, report))
}
