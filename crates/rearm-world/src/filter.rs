//! Per-agent kind allow-lists.

use rustc_hash::FxHashSet;

use rearm_core::KindId;

/// An allow-list of item kinds an agent may equip (outfit policy, ideology
/// restrictions, player assignment — the engine doesn't care which).
///
/// The host bumps `revision` whenever membership changes; the revision feeds
/// the agent attribute fingerprint so a filter edit forces a fresh scan
/// without the engine diffing set contents.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindFilter {
    allowed: FxHashSet<KindId>,
    pub revision: u32,
}

impl KindFilter {
    pub fn new<I: IntoIterator<Item = KindId>>(kinds: I) -> Self {
        Self {
            allowed: kinds.into_iter().collect(),
            revision: 0,
        }
    }

    #[inline]
    pub fn allows(&self, kind: KindId) -> bool {
        self.allowed.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Add a kind, bumping the revision if membership actually changed.
    pub fn insert(&mut self, kind: KindId) {
        if self.allowed.insert(kind) {
            self.revision += 1;
        }
    }

    /// Remove a kind, bumping the revision if membership actually changed.
    pub fn remove(&mut self, kind: KindId) {
        if self.allowed.remove(&kind) {
            self.revision += 1;
        }
    }
}
