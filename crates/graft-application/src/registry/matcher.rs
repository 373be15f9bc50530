//! Capability matcher
//!
//! A kind satisfies a capability when some registration of that kind declared
//! the capability together with a cast into the capability handle. Answers are
//! memoized per `(capability, kind)`; declaring a capability drops every memo
//! entry for it so later lookups see the new declaration.

use std::collections::HashMap;

use graft_domain::{CapabilityCast, Cast, Injected, Instance, KindId};
use tracing::trace;

/// Capability table and memo
#[derive(Default)]
pub struct CapabilityMatcher {
    casts: HashMap<KindId, HashMap<KindId, Cast>>,
    memo: HashMap<(KindId, KindId), bool>,
}

impl CapabilityMatcher {
    /// Create an empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `kind` provides `declared.capability`
    pub fn declare(&mut self, kind: KindId, declared: &CapabilityCast) {
        self.casts
            .entry(kind)
            .or_default()
            .entry(declared.capability)
            .or_insert_with(|| declared.cast.clone());
        self.memo
            .retain(|(capability, _), _| *capability != declared.capability);
    }

    /// Whether `kind` satisfies `capability`
    pub fn satisfies(&mut self, kind: KindId, capability: KindId) -> bool {
        if let Some(&hit) = self.memo.get(&(capability, kind)) {
            trace!(%kind, %capability, hit, "Capability memo hit");
            return hit;
        }

        let result = self
            .casts
            .get(&kind)
            .is_some_and(|caps| caps.contains_key(&capability));
        self.memo.insert((capability, kind), result);
        result
    }

    /// Project an instance of `kind` into a boxed `Arc<capability>` handle
    pub fn cast(&self, kind: KindId, capability: KindId, instance: &Instance) -> Option<Injected> {
        let cast = self.casts.get(&kind)?.get(&capability)?;
        cast(instance)
    }

    /// Capabilities declared for `kind`, in no particular order
    pub fn capabilities_of(&self, kind: KindId) -> Vec<KindId> {
        self.casts
            .get(&kind)
            .map(|caps| caps.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of memoized answers
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

impl std::fmt::Debug for CapabilityMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityMatcher")
            .field("kinds", &self.casts.len())
            .field("memo", &self.memo.len())
            .finish()
    }
}
