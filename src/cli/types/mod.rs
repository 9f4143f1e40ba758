//! Type-safe wrappers for command-line values.

pub mod ids;
