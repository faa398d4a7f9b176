//! Breakpoint index keyed by script identity.

use ahash::{AHashMap, AHashSet};

/// Set of `(script hash, instruction offset)` breakpoints.
///
/// Script hashes are owned byte sequences compared by content. A script hash is present
/// in the index if and only if at least one offset is registered for it; removing the
/// last offset drops the entry, so `is_empty()` is a cheap "no breakpoints at all" check
/// for the debugger's fast path.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoints {
    scripts: AHashMap<Box<[u8]>, AHashSet<u32>>,
}

impl Breakpoints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a breakpoint. Returns false if it was already present.
    pub fn insert(&mut self, script_hash: &[u8], offset: u32) -> bool {
        if let Some(offsets) = self.scripts.get_mut(script_hash) {
            return offsets.insert(offset);
        }
        let mut offsets = AHashSet::new();
        offsets.insert(offset);
        self.scripts.insert(Box::from(script_hash), offsets);
        true
    }

    /// Unregisters a breakpoint, returning whether it was present.
    ///
    /// Absence is not an error. When the last offset of a script is removed the script
    /// entry goes with it.
    pub fn remove(&mut self, script_hash: &[u8], offset: u32) -> bool {
        let Some(offsets) = self.scripts.get_mut(script_hash) else {
            return false;
        };
        if !offsets.remove(&offset) {
            return false;
        }
        if offsets.is_empty() {
            self.scripts.remove(script_hash);
        }
        true
    }

    #[must_use]
    pub fn contains(&self, script_hash: &[u8], offset: u32) -> bool {
        self.scripts
            .get(script_hash)
            .is_some_and(|offsets| offsets.contains(&offset))
    }

    /// Returns true if no breakpoint is registered for any script.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Total number of registered breakpoints across all scripts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.values().map(|offsets| offsets.len()).sum()
    }

    /// Number of scripts with at least one breakpoint.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    /// Offsets registered for `script_hash`, in no particular order.
    pub fn offsets(&self, script_hash: &[u8]) -> impl Iterator<Item = u32> + '_ {
        self.scripts
            .get(script_hash)
            .into_iter()
            .flat_map(|offsets| offsets.iter().copied())
    }

    /// Iterates every `(script hash, offset)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u32)> {
        self.scripts
            .iter()
            .flat_map(|(hash, offsets)| offsets.iter().map(move |&offset| (&**hash, offset)))
    }

    pub fn clear(&mut self) {
        self.scripts.clear();
    }

    /// Serializes the index to a compact binary form so a host can persist a session's
    /// breakpoints.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn dump(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Restores an index previously produced by [`dump`](Self::dump).
    ///
    /// Empty offset sets in the input are discarded so the "present iff non-empty"
    /// property holds for loaded indexes too.
    ///
    /// # Errors
    /// Returns an error if deserialization fails.
    pub fn load(bytes: &[u8]) -> Result<Self, postcard::Error> {
        let mut loaded: Self = postcard::from_bytes(bytes)?;
        loaded.scripts.retain(|_, offsets| !offsets.is_empty());
        Ok(loaded)
    }
}
