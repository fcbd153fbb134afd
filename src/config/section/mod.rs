//! Configuration section definitions.
//!
//! Each module corresponds to a section in `preheat.toml`:
//!
//! | Module  | TOML Section | Purpose                                 |
//! |---------|--------------|-----------------------------------------|
//! | `build` | `[build]`    | Output directory                        |
//! | `hints` | `[hints]`    | Files, resource lists, processors       |

mod build;
mod hints;

pub use build::BuildConfig;
pub use hints::HintsConfig;
