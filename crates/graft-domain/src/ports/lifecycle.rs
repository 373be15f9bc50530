//! Object lifecycle hooks

use crate::error::Result;

/// Implemented by objects that finish their own setup once every slot is filled.
///
/// The hook runs exactly once, after construction and before the instance is
/// handed to any dependent. An error aborts resolution of the object.
pub trait OnReady {
    /// Complete initialization
    fn on_ready(&mut self) -> Result<()>;
}
