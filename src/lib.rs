//! Preheat - resource hint injection for built HTML pages.
//!
//! Each configured page gets `<link rel="preconnect">` tags for remote origins
//! and `<link rel="preload">` tags for scripts, stylesheets and configured
//! assets, inserted ahead of the head's existing links.

pub mod cli;
pub mod config;
pub mod dom;
pub mod logger;
pub mod pipeline;
pub mod reference;
pub mod utils;
