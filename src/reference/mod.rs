//! Resource references.
//!
//! A [`Reference`] is the normalized form of one asset a page depends on,
//! whether it came from configuration or was discovered in the document.
//!
//! # Classification
//!
//! | Input                    | Remote | `crossorigin` default | `href`            |
//! |--------------------------|--------|-----------------------|-------------------|
//! | `https://cdn.tld/a.js`   | yes    | `anonymous`           | full URL          |
//! | `css/main.css`           | no     | not marked            | `/css/main.css`   |
//! | parsed [`Url`]           | yes    | `anonymous`           | full URL          |
//!
//! Relative inputs are resolved against the synthetic base `file:///`, so every
//! reference has a well-defined path and origin.

mod error;
mod kind;

pub use error::ReferenceError;
pub use kind::{CrossOrigin, Destination};

use url::Url;

/// Base used to resolve references without a network scheme.
const LOCAL_BASE: &str = "file:///";

/// Origin reported for references resolved against [`LOCAL_BASE`].
pub const LOCAL_ORIGIN: &str = "file://";

/// One asset reference. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    url: Url,
    is_remote: bool,
    crossorigin: Option<CrossOrigin>,
    destination: Option<Destination>,
}

/// Explicit overrides for a reference, the table form of an input.
///
/// Every `None` falls back to the inferred value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceOptions {
    pub url: String,
    pub destination: Option<Destination>,
    pub crossorigin: Option<CrossOrigin>,
    pub is_remote: Option<bool>,
}

impl ReferenceOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_crossorigin(mut self, crossorigin: CrossOrigin) -> Self {
        self.crossorigin = Some(crossorigin);
        self
    }

    pub fn with_remote(mut self, is_remote: bool) -> Self {
        self.is_remote = Some(is_remote);
        self
    }

    /// Read overrides from a TOML table.
    ///
    /// Returns `Ok(None)` when the table has no string `url`. Fields of the
    /// wrong TOML type are ignored like absent ones; string fields with an
    /// unknown value are errors.
    fn from_table(table: &toml::Table) -> Result<Option<Self>, ReferenceError> {
        let Some(toml::Value::String(url)) = table.get("url") else {
            return Ok(None);
        };

        let mut options = Self::new(url.as_str());

        if let Some(toml::Value::String(value)) = table.get("as") {
            let destination = value.parse().map_err(ReferenceError::Destination)?;
            options.destination = Some(destination);
        }
        if let Some(toml::Value::String(value)) = table.get("crossorigin") {
            let crossorigin = value.parse().map_err(ReferenceError::CrossOrigin)?;
            options.crossorigin = Some(crossorigin);
        }
        if let Some(toml::Value::Boolean(is_remote)) = table.get("is_remote") {
            options.is_remote = Some(*is_remote);
        }

        Ok(Some(options))
    }
}

/// Every shape a reference can be built from.
#[derive(Debug, Clone)]
pub enum ReferenceInput {
    /// Absolute URL or document-relative path.
    Url(String),
    /// Already-parsed URL, always treated as remote.
    Parsed(Url),
    /// URL with explicit overrides.
    Options(ReferenceOptions),
    /// Normalized reference, passed through untouched.
    Resolved(Reference),
    /// Untyped configuration entry, classified on construction.
    Value(toml::Value),
}

impl Reference {
    /// Build a reference from any supported input shape.
    ///
    /// This is the single dispatch point: each input is classified into
    /// exactly one shape, and a configuration value that fits none of them
    /// fails with [`ReferenceError::Unrecognized`].
    pub fn from_input(input: impl Into<ReferenceInput>) -> Result<Self, ReferenceError> {
        match input.into() {
            ReferenceInput::Url(url) => Self::parse(&url),
            ReferenceInput::Parsed(url) => Ok(Self::from_url(url)),
            ReferenceInput::Options(options) => Self::with_options(options),
            ReferenceInput::Resolved(reference) => Ok(reference),
            ReferenceInput::Value(value) => Self::from_value(&value),
        }
    }

    /// Parse a URL string, inferring every attribute.
    pub fn parse(url: &str) -> Result<Self, ReferenceError> {
        Self::with_options(ReferenceOptions::new(url))
    }

    /// Build from a parsed URL: remote, `crossorigin="anonymous"`.
    pub fn from_url(url: Url) -> Self {
        let destination = Destination::infer(url.path());
        Self {
            url,
            is_remote: true,
            crossorigin: Some(CrossOrigin::Anonymous),
            destination,
        }
    }

    /// Parse a URL string and apply explicit overrides on top of the
    /// inferred attributes.
    pub fn with_options(options: ReferenceOptions) -> Result<Self, ReferenceError> {
        let ReferenceOptions {
            url: raw,
            destination,
            crossorigin,
            is_remote,
        } = options;

        let (url, remote) = resolve(&raw)?;
        let inferred_crossorigin = remote.then_some(CrossOrigin::Anonymous);
        let destination = destination.or_else(|| Destination::infer(url.path()));

        Ok(Self {
            url,
            is_remote: is_remote.unwrap_or(remote),
            crossorigin: crossorigin.or(inferred_crossorigin),
            destination,
        })
    }

    fn from_value(value: &toml::Value) -> Result<Self, ReferenceError> {
        let unrecognized = || ReferenceError::Unrecognized(value.to_string());
        match value {
            toml::Value::String(url) => Self::parse(url),
            toml::Value::Table(table) => {
                let options = ReferenceOptions::from_table(table)?.ok_or_else(unrecognized)?;
                Self::with_options(options)
            }
            _ => Err(unrecognized()),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub const fn is_remote(&self) -> bool {
        self.is_remote
    }

    pub const fn crossorigin(&self) -> Option<CrossOrigin> {
        self.crossorigin
    }

    /// The `as` attribute, `None` when the asset type is unknown.
    pub const fn destination(&self) -> Option<Destination> {
        self.destination
    }

    /// Value for an emitted `href`: the full URL when remote, the path otherwise.
    pub fn href(&self) -> String {
        if self.is_remote {
            self.url.to_string()
        } else {
            self.url.path().to_string()
        }
    }

    /// Scheme, host and port of the URL; [`LOCAL_ORIGIN`] for local files.
    pub fn origin(&self) -> String {
        if self.url.scheme() == "file" {
            return LOCAL_ORIGIN.to_string();
        }
        self.url.origin().ascii_serialization()
    }

    /// Whether the asset type is known, which makes it preloadable.
    pub const fn is_file(&self) -> bool {
        self.destination.is_some()
    }
}

/// Parse `raw` as an absolute URL, falling back to the local base.
///
/// The boolean is `true` when the absolute parse succeeded. A missing scheme
/// is not an error: it is what classifies the reference as local.
fn resolve(raw: &str) -> Result<(Url, bool), ReferenceError> {
    if let Ok(url) = Url::parse(raw) {
        return Ok((url, true));
    }

    let invalid = |source| ReferenceError::Url {
        url: raw.to_string(),
        source,
    };
    let base = Url::parse(LOCAL_BASE).map_err(invalid)?;
    let url = base.join(raw).map_err(invalid)?;
    Ok((url, false))
}

impl From<&str> for ReferenceInput {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for ReferenceInput {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Url> for ReferenceInput {
    fn from(url: Url) -> Self {
        Self::Parsed(url)
    }
}

impl From<ReferenceOptions> for ReferenceInput {
    fn from(options: ReferenceOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Reference> for ReferenceInput {
    fn from(reference: Reference) -> Self {
        Self::Resolved(reference)
    }
}

impl From<toml::Value> for ReferenceInput {
    fn from(value: toml::Value) -> Self {
        Self::Value(value)
    }
}
