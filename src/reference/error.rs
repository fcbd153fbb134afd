//! Reference construction errors.

use thiserror::Error;

/// Errors raised while normalizing an input into a [`Reference`](super::Reference).
///
/// All of them are configuration errors: none is transient, so callers
/// surface them immediately instead of retrying or skipping the entry.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("could not determine if the value `{0}` was a string, table or reference")]
    Unrecognized(String),

    #[error("invalid resource url `{url}`")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown preload destination `{0}`")]
    Destination(String),

    #[error("unknown crossorigin value `{0}` (expected `anonymous` or `use-credentials`)")]
    CrossOrigin(String),
}
