//! Small helpers shared across modules.

pub mod mime;
pub mod union;

pub use union::union_by;
