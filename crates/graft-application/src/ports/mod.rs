//! Application ports
//!
//! Registry slices filled by provider crates at link time.

pub mod registry;

pub use registry::{VALUE_FORMATS, ValueFormatEntry, list_value_formats, resolve_value_format};
