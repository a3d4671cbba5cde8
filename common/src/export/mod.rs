//! Export core modules shared across CLI and admin wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;
