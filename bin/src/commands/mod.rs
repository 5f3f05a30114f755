//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod options;
pub(crate) mod screen;
