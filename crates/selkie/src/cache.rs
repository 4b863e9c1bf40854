//! Memoized layout access with explicit invalidation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::model::LayoutOutput;
use crate::options::LayoutOptions;
use crate::schema::LayoutInput;

/// Single-entry layout memo keyed by a structural fingerprint plus an explicit version
/// counter.
///
/// Expansion state is deliberately left out of the fingerprint: collapsing or expanding
/// a node is handled by the consuming layer in place and must not force a recompute.
/// Callers that mutate entities, groups, direction, or options get a fresh layout
/// because the fingerprint moves; `invalidate` covers everything else.
#[derive(Debug, Default)]
pub struct LayoutCache {
    version: u64,
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: u64,
    version: u64,
    output: Arc<LayoutOutput>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter bumped by every `invalidate` call.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Force the next `get` to recompute even for a structurally identical input.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        tracing::debug!(version = self.version, "layout cache invalidated");
    }

    /// Cached layout for `input`, recomputing on structural or version change.
    pub fn get(&mut self, input: &LayoutInput, options: &LayoutOptions) -> Arc<LayoutOutput> {
        let fingerprint = fingerprint(input, options);
        if let Some(entry) = &self.entry {
            if entry.fingerprint == fingerprint && entry.version == self.version {
                tracing::trace!("layout cache hit");
                return Arc::clone(&entry.output);
            }
        }
        tracing::debug!(version = self.version, "layout cache miss");
        let output = Arc::new(crate::layout(input, options));
        self.entry = Some(CacheEntry {
            fingerprint,
            version: self.version,
            output: Arc::clone(&output),
        });
        output
    }
}

fn fingerprint(input: &LayoutInput, options: &LayoutOptions) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.entities.hash(&mut hasher);
    input.groups.hash(&mut hasher);
    input.direction.hash(&mut hasher);
    options.hash(&mut hasher);
    hasher.finish()
}
