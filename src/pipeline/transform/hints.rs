//! Resource hint injector.
//!
//! Collects references from configuration and from the document itself,
//! then inserts `<link rel="preconnect">` and `<link rel="preload">` tags
//! before the first `<link>` in `<head>`.
//!
//! # Source precedence
//!
//! ```text
//! configured preconnect > configured preload > <script src> in body > <link rel=stylesheet> in head
//! ```
//!
//! Both passes walk the same four sources in that order. The preconnect pass
//! keeps the first reference per origin, the preload pass the first per href,
//! so a configured entry overrides what is discovered later for the same
//! resource.

use thiserror::Error;

use crate::dom::{DomError, HintDocument};
use crate::log;
use crate::pipeline::HintOptions;
use crate::reference::{
    CrossOrigin, Destination, LOCAL_ORIGIN, Reference, ReferenceError, ReferenceInput,
    ReferenceOptions,
};
use crate::utils::union::union_by;

const SCRIPT_SELECTOR: &str = "script[src]";
const STYLESHEET_SELECTOR: &str = r#"link[rel="stylesheet"]"#;

#[derive(Debug, Error)]
pub enum HintError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("document has no <head> element")]
    MissingHead,
}

/// Relation of an emitted hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintRel {
    Preconnect,
    Preload,
}

impl HintRel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preconnect => "preconnect",
            Self::Preload => "preload",
        }
    }
}

/// One `<link>` tag to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub rel: HintRel,
    pub href: String,
    pub destination: Option<Destination>,
    pub crossorigin: Option<CrossOrigin>,
}

impl Hint {
    /// `<link rel="preconnect" href={origin}>`.
    ///
    /// `crossorigin` is copied whenever the reference carries one: connecting
    /// is inherently cross-origin, so remoteness is not checked here.
    fn preconnect(reference: &Reference) -> Self {
        Self {
            rel: HintRel::Preconnect,
            href: reference.origin(),
            destination: None,
            crossorigin: reference.crossorigin(),
        }
    }

    /// `<link rel="preload" href={href} as={as}>`.
    ///
    /// `crossorigin` is only copied for remote references.
    fn preload(reference: &Reference) -> Self {
        Self {
            rel: HintRel::Preload,
            href: reference.href(),
            destination: reference.destination(),
            crossorigin: reference.crossorigin().filter(|_| reference.is_remote()),
        }
    }

    /// Attributes to set on the emitted tag. Their serialized order is up to
    /// the document.
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attrs = vec![("rel", self.rel.as_str())];
        if let Some(destination) = self.destination {
            attrs.push(("as", destination.as_str()));
        }
        if let Some(crossorigin) = self.crossorigin {
            attrs.push(("crossorigin", crossorigin.as_str()));
        }
        attrs.push(("href", self.href.as_str()));
        attrs
    }
}

/// Number of tags inserted into one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintReport {
    pub preconnect: usize,
    pub preload: usize,
}

impl HintReport {
    pub const fn total(&self) -> usize {
        self.preconnect + self.preload
    }
}

/// Injects preconnect and preload hints into a document head.
pub struct HintInjector<'a> {
    options: &'a HintOptions,
}

impl<'a> HintInjector<'a> {
    pub const fn new(options: &'a HintOptions) -> Self {
        Self { options }
    }

    /// Compute the hints for `doc` without touching it.
    ///
    /// Preconnect hints come first, then preload hints, each in source order.
    pub fn plan<D: HintDocument>(&self, doc: &D) -> Result<Vec<Hint>, HintError> {
        let head = doc.head().ok_or(HintError::MissingHead)?;

        let preconnects = normalize(&self.options.preconnect)?;
        let preloads = normalize(&self.options.preload)?;
        let scripts = match doc.body() {
            Some(body) => discover(doc, &body, SCRIPT_SELECTOR, "src", Destination::Script)?,
            None => Vec::new(),
        };
        let stylesheets = discover(doc, &head, STYLESHEET_SELECTOR, "href", Destination::Style)?;

        let sources = [&preconnects[..], &preloads[..], &scripts[..], &stylesheets[..]];

        // a path forced remote still has no network origin to connect to
        let preconnect = union_by(&sources, Reference::origin)
            .into_iter()
            .filter(|reference| reference.is_remote() && reference.origin() != LOCAL_ORIGIN)
            .map(Hint::preconnect);

        let preload = union_by(&sources, Reference::href)
            .into_iter()
            .filter(|reference| reference.is_file())
            .map(Hint::preload);

        Ok(preconnect.chain(preload).collect())
    }

    /// Insert the planned hints before the first `<link>` in `<head>`, or at
    /// the end of `<head>` when it has none.
    ///
    /// Every tag is built before the first insertion, so a failing document
    /// is left untouched.
    pub fn inject<D: HintDocument>(&self, doc: &mut D) -> Result<HintReport, HintError> {
        let hints = self.plan(doc)?;

        let head = doc.head().ok_or(HintError::MissingHead)?;
        let anchor = doc.select_first(&head, "link")?;

        let mut report = HintReport::default();
        let mut tags = Vec::with_capacity(hints.len());
        for hint in &hints {
            let tag = doc.create_element("link")?;
            for (name, value) in hint.attributes() {
                doc.set_attribute(&tag, name, value);
            }
            match hint.rel {
                HintRel::Preconnect => report.preconnect += 1,
                HintRel::Preload => report.preload += 1,
            }
            tags.push(tag);
        }

        for tag in &tags {
            doc.insert_before(&head, tag, anchor.as_ref());
        }

        Ok(report)
    }
}

fn normalize(inputs: &[ReferenceInput]) -> Result<Vec<Reference>, ReferenceError> {
    inputs.iter().cloned().map(Reference::from_input).collect()
}

/// References for every element matching `selector` under `scope`, with the
/// destination forced.
///
/// Empty attributes are skipped since they resolve to the page itself;
/// unparsable ones are logged and skipped.
fn discover<D: HintDocument>(
    doc: &D,
    scope: &D::Node,
    selector: &str,
    attribute: &str,
    destination: Destination,
) -> Result<Vec<Reference>, DomError> {
    let mut references = Vec::new();

    for node in doc.select(scope, selector)? {
        let Some(value) = doc.attribute(&node, attribute) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let options = ReferenceOptions::new(value).with_destination(destination);
        match Reference::with_options(options) {
            Ok(reference) => references.push(reference),
            Err(e) => log!("hints"; "skipping {}=\"{}\": {}", attribute, value, e),
        }
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    const INDEX_HTML: &str = r#"<!doctype html>
<html class="no-js" lang="">
  <head>
    <meta charset="utf-8">
    <title>Hello World</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="stylesheet" href="https://some.asset.link/path/to/known.css">
    <link rel="stylesheet" href="css/normalize.css">
    <link rel="stylesheet" href="css/main.css">
  </head>
  <body>
    <p>Hello world!</p>
    <script src="https://another.asset.link/path/to/known.js"></script>
  </body>
</html>"#;

    #[derive(Debug, PartialEq)]
    struct Tag {
        href: String,
        destination: Option<String>,
        crossorigin: Option<String>,
    }

    fn tags(doc: &HtmlDocument, rel: &str) -> Vec<Tag> {
        let head = doc.head().unwrap();
        doc.select(&head, &format!(r#"link[rel="{rel}"]"#))
            .unwrap()
            .iter()
            .map(|node| Tag {
                href: doc.attribute(node, "href").unwrap(),
                destination: doc.attribute(node, "as"),
                crossorigin: doc.attribute(node, "crossorigin"),
            })
            .collect()
    }

    fn tag(href: &str, destination: Option<&str>, crossorigin: Option<&str>) -> Tag {
        Tag {
            href: href.to_string(),
            destination: destination.map(str::to_string),
            crossorigin: crossorigin.map(str::to_string),
        }
    }

    fn run(html: &str, options: HintOptions) -> HtmlDocument {
        let mut doc = HtmlDocument::parse(html);
        HintInjector::new(&options).inject(&mut doc).unwrap();
        doc
    }

    fn inputs(values: &[&str]) -> Vec<ReferenceInput> {
        values.iter().map(|value| ReferenceInput::from(*value)).collect()
    }

    #[test]
    fn test_existing_tags_only() {
        let doc = run(INDEX_HTML, HintOptions::default());

        assert_eq!(
            tags(&doc, "preconnect"),
            vec![
                tag("https://another.asset.link", None, Some("anonymous")),
                tag("https://some.asset.link", None, Some("anonymous")),
            ]
        );
        assert_eq!(
            tags(&doc, "preload"),
            vec![
                tag(
                    "https://another.asset.link/path/to/known.js",
                    Some("script"),
                    Some("anonymous")
                ),
                tag(
                    "https://some.asset.link/path/to/known.css",
                    Some("style"),
                    Some("anonymous")
                ),
                tag("/css/normalize.css", Some("style"), None),
                tag("/css/main.css", Some("style"), None),
            ]
        );
    }

    #[test]
    fn test_existing_tags_are_not_mutated() {
        let doc = run(INDEX_HTML, HintOptions::default());
        let head = doc.head().unwrap();
        let body = doc.body().unwrap();

        let stylesheets = doc.select(&head, STYLESHEET_SELECTOR).unwrap();
        let hrefs: Vec<_> = stylesheets
            .iter()
            .map(|node| doc.attribute(node, "href").unwrap())
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "https://some.asset.link/path/to/known.css",
                "css/normalize.css",
                "css/main.css",
            ]
        );

        let scripts = doc.select(&body, SCRIPT_SELECTOR).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(
            doc.attribute(&scripts[0], "src").as_deref(),
            Some("https://another.asset.link/path/to/known.js")
        );
    }

    #[test]
    fn test_hints_inserted_before_first_link() {
        let doc = run(INDEX_HTML, HintOptions::default());
        let head = doc.head().unwrap();
        let rels: Vec<_> = doc
            .select(&head, "link")
            .unwrap()
            .iter()
            .map(|node| doc.attribute(node, "rel").unwrap())
            .collect();

        assert_eq!(
            rels,
            vec![
                "preconnect",
                "preconnect",
                "preload",
                "preload",
                "preload",
                "preload",
                "stylesheet",
                "stylesheet",
                "stylesheet",
            ]
        );

        // the title stays ahead of every inserted tag
        let html = doc.to_html().unwrap();
        let title = html.find("<title>").unwrap();
        let first_hint = html.find("preconnect").unwrap();
        assert!(title < first_hint);
    }

    #[test]
    fn test_configured_preconnect_strings() {
        let options = HintOptions {
            preconnect: inputs(&[
                "https://link.a.tld/a/p/t/u",
                "https://link.b.tld/b/p/t/u",
            ]),
            ..HintOptions::default()
        };
        let doc = run(INDEX_HTML, options);

        let hrefs: Vec<_> = tags(&doc, "preconnect").into_iter().map(|t| t.href).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://link.a.tld",
                "https://link.b.tld",
                "https://another.asset.link",
                "https://some.asset.link",
            ]
        );
        // unknown types never become preloads
        assert_eq!(tags(&doc, "preload").len(), 4);
    }

    #[test]
    fn test_configured_preconnect_options() {
        let options = HintOptions {
            preconnect: vec![
                ReferenceOptions::new("https://link.a.tld/a/p/t/u")
                    .with_crossorigin(CrossOrigin::Anonymous)
                    .into(),
                ReferenceOptions::new("https://link.b.tld/b/p/t/u")
                    .with_crossorigin(CrossOrigin::UseCredentials)
                    .into(),
            ],
            ..HintOptions::default()
        };
        let doc = run(INDEX_HTML, options);

        let preconnect = tags(&doc, "preconnect");
        assert_eq!(preconnect.len(), 4);
        assert_eq!(preconnect[0], tag("https://link.a.tld", None, Some("anonymous")));
        assert_eq!(preconnect[1], tag("https://link.b.tld", None, Some("use-credentials")));
    }

    #[test]
    fn test_preconnect_dedupes_by_origin() {
        let options = HintOptions {
            preconnect: inputs(&["https://a.tld/x", "https://a.tld/y"]),
            ..HintOptions::default()
        };
        let doc = run("<html><head></head><body></body></html>", options);

        assert_eq!(
            tags(&doc, "preconnect"),
            vec![tag("https://a.tld", None, Some("anonymous"))]
        );
    }

    #[test]
    fn test_configured_preload_strings() {
        let configured = [
            "https://link.a.tld/a/p/t/ua.js",
            "https://link.b.tld/b/p/t/ub.css",
        ];
        let options = HintOptions {
            preload: inputs(&configured),
            ..HintOptions::default()
        };
        let doc = run(INDEX_HTML, options);

        let preload = tags(&doc, "preload");
        assert_eq!(preload.len(), 6);
        assert_eq!(preload[0], tag(configured[0], Some("script"), Some("anonymous")));
        assert_eq!(preload[1], tag(configured[1], Some("style"), Some("anonymous")));
        assert_eq!(preload[4], tag("/css/normalize.css", Some("style"), None));

        // configured preloads also get a preconnect for their origin
        assert_eq!(tags(&doc, "preconnect").len(), 4);
    }

    #[test]
    fn test_preload_dedupes_by_href_first_wins() {
        let options = HintOptions {
            preconnect: vec![
                ReferenceOptions::new("https://link.b.tld/b/p/t/ub.css")
                    .with_crossorigin(CrossOrigin::UseCredentials)
                    .into(),
            ],
            preload: vec![
                ReferenceOptions::new("https://link.b.tld/b/p/t/ub.css")
                    .with_crossorigin(CrossOrigin::Anonymous)
                    .into(),
            ],
        };
        let doc = run("<html><head></head><body></body></html>", options);

        assert_eq!(
            tags(&doc, "preload"),
            vec![tag(
                "https://link.b.tld/b/p/t/ub.css",
                Some("style"),
                Some("use-credentials")
            )]
        );

        // pre-built references and parsed URLs take part in the same union
        let resolved = Reference::with_options(
            ReferenceOptions::new("https://link.b.tld/b/p/t/ub.js")
                .with_crossorigin(CrossOrigin::UseCredentials),
        )
        .unwrap();
        let parsed = |raw: &str| ReferenceInput::Parsed(url::Url::parse(raw).unwrap());
        let options = HintOptions {
            preconnect: vec![ReferenceInput::Resolved(resolved)],
            preload: vec![
                parsed("https://link.b.tld/b/p/t/ub.js"),
                parsed("https://link.c.tld/c.css"),
            ],
        };
        let doc = run("<html><head></head><body></body></html>", options);

        assert_eq!(
            tags(&doc, "preload"),
            vec![
                tag("https://link.b.tld/b/p/t/ub.js", Some("script"), Some("use-credentials")),
                tag("https://link.c.tld/c.css", Some("style"), Some("anonymous")),
            ]
        );
        assert_eq!(
            tags(&doc, "preconnect"),
            vec![
                tag("https://link.b.tld", None, Some("use-credentials")),
                tag("https://link.c.tld", None, Some("anonymous")),
            ]
        );
    }

    #[test]
    fn test_configured_entry_overrides_discovered() {
        let options = HintOptions {
            preload: vec![
                ReferenceOptions::new("https://another.asset.link/path/to/known.js")
                    .with_crossorigin(CrossOrigin::UseCredentials)
                    .into(),
            ],
            ..HintOptions::default()
        };
        let doc = run(INDEX_HTML, options);

        let preload = tags(&doc, "preload");
        assert_eq!(preload.len(), 4);
        assert_eq!(
            preload[0],
            tag(
                "https://another.asset.link/path/to/known.js",
                Some("script"),
                Some("use-credentials")
            )
        );
        let preconnect = tags(&doc, "preconnect");
        assert_eq!(
            preconnect[0],
            tag("https://another.asset.link", None, Some("use-credentials"))
        );
    }

    #[test]
    fn test_local_reference_with_crossorigin() {
        let options = HintOptions {
            preload: vec![
                ReferenceOptions::new("https://cdn.tld/app.js")
                    .with_crossorigin(CrossOrigin::UseCredentials)
                    .with_remote(false)
                    .into(),
            ],
            ..HintOptions::default()
        };
        let doc = run("<html><head></head><body></body></html>", options);

        // local: no preconnect, and the preload drops crossorigin
        assert!(tags(&doc, "preconnect").is_empty());
        assert_eq!(tags(&doc, "preload"), vec![tag("/app.js", Some("script"), None)]);
    }

    #[test]
    fn test_forced_remote_path_gets_no_preconnect() {
        let options = HintOptions {
            preload: vec![ReferenceOptions::new("css/a.css").with_remote(true).into()],
            ..HintOptions::default()
        };
        let doc = run("<html><head></head><body></body></html>", options);

        assert!(tags(&doc, "preconnect").is_empty());
        assert_eq!(
            tags(&doc, "preload"),
            vec![tag("file:///css/a.css", Some("style"), None)]
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let html = r#"<html><head>
<link rel="stylesheet" href="https://cdn.tld/a.css">
<link rel="stylesheet" href="css/main.css">
</head><body><script src="https://cdn2.tld/b.js"></script></body></html>"#;
        let doc = run(html, HintOptions::default());

        assert_eq!(
            tags(&doc, "preconnect"),
            vec![
                tag("https://cdn2.tld", None, Some("anonymous")),
                tag("https://cdn.tld", None, Some("anonymous")),
            ]
        );
        assert_eq!(
            tags(&doc, "preload"),
            vec![
                tag("https://cdn2.tld/b.js", Some("script"), Some("anonymous")),
                tag("https://cdn.tld/a.css", Some("style"), Some("anonymous")),
                tag("/css/main.css", Some("style"), None),
            ]
        );
    }

    #[test]
    fn test_no_existing_links_appends_to_head() {
        let html = "<html><head><title>t</title></head><body><script src=\"https://x.tld/a.js\"></script></body></html>";
        let mut doc = HtmlDocument::parse(html);
        let options = HintOptions::default();
        let report = HintInjector::new(&options).inject(&mut doc).unwrap();

        assert_eq!(report, HintReport { preconnect: 1, preload: 1 });
        let out = doc.to_html().unwrap();
        let title_end = out.find("</title>").unwrap();
        let head_end = out.find("</head>").unwrap();
        let hint = out.find("rel=\"preconnect\"").unwrap();
        assert!(title_end < hint && hint < head_end, "{out}");
    }

    #[test]
    fn test_empty_and_scriptless_document() {
        let mut doc = HtmlDocument::parse("");
        let options = HintOptions::default();
        let report = HintInjector::new(&options).inject(&mut doc).unwrap();
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_empty_src_is_skipped() {
        let html = r#"<html><head></head><body><script src=""></script><script src="  "></script></body></html>"#;
        let doc = run(html, HintOptions::default());
        assert!(tags(&doc, "preload").is_empty());
    }

    #[test]
    fn test_invalid_configured_value_aborts_untouched() {
        let options = HintOptions {
            preconnect: inputs(&["https://a.tld"]),
            preload: vec![ReferenceInput::Value(toml::Value::Integer(1))],
        };
        let mut doc = HtmlDocument::parse(INDEX_HTML);
        let before = doc.to_html().unwrap();

        let err = HintInjector::new(&options).inject(&mut doc).unwrap_err();
        assert!(matches!(err, HintError::Reference(ReferenceError::Unrecognized(_))));
        assert_eq!(doc.to_html().unwrap(), before);
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let doc = HtmlDocument::parse(INDEX_HTML);
        let options = HintOptions::default();
        let hints = HintInjector::new(&options).plan(&doc).unwrap();

        assert_eq!(hints.len(), 6);
        assert_eq!(hints[0].rel, HintRel::Preconnect);
        assert_eq!(hints[5].rel, HintRel::Preload);
        assert!(tags(&doc, "preload").is_empty());
    }

    #[test]
    fn test_emitted_tag_attributes() {
        let options = HintOptions {
            preload: inputs(&["https://cdn.tld/a.css"]),
            ..HintOptions::default()
        };
        let doc = run("<html><head></head><body></body></html>", options);

        let head = doc.head().unwrap();
        let links = doc.select(&head, r#"link[rel="preload"]"#).unwrap();
        assert_eq!(links.len(), 1);
        let attributes = links[0].as_element().unwrap().attributes.borrow();
        let mut names: Vec<_> = attributes.map.keys().map(|name| name.local.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["as", "crossorigin", "href", "rel"]);
        assert_eq!(attributes.get("href"), Some("https://cdn.tld/a.css"));
        assert_eq!(attributes.get("as"), Some("style"));
        assert_eq!(attributes.get("crossorigin"), Some("anonymous"));
    }
}
