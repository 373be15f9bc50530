//! Domain entities

/// Object descriptors and runtime status
pub mod object;

pub use object::{CapabilityCast, ObjectDescriptor, ObjectId, ObjectStatus};
