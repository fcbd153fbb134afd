//! Document transforms.
//!
//! - `hints`: Injects preconnect/preload `<link>` tags into `<head>`

mod hints;

pub use hints::{Hint, HintError, HintInjector, HintRel, HintReport};
