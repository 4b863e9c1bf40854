//! Group forest construction.
//!
//! Parent references are validated while the forest is built: a link to a missing group,
//! a self link, or a link that would close a cycle is rejected and the child becomes a
//! root. All later ancestor walks run over accepted links only, with a visited guard so
//! corrupt state can never loop.

use crate::schema::Group;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Default)]
pub(crate) struct GroupTree {
    /// Groups by id, first declaration wins, insertion-ordered.
    by_id: IndexMap<String, Group>,
    /// Accepted parent link per group id.
    parent: FxHashMap<String, String>,
    /// Direct children per group id, in declaration order.
    children: FxHashMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl GroupTree {
    pub fn build(groups: &[Group]) -> Self {
        let mut by_id: IndexMap<String, Group> = IndexMap::with_capacity(groups.len());
        for group in groups {
            by_id.entry(group.id.clone()).or_insert_with(|| group.clone());
        }

        let mut tree = GroupTree {
            by_id,
            parent: FxHashMap::default(),
            children: FxHashMap::default(),
            roots: Vec::new(),
        };

        let ids: Vec<String> = tree.by_id.keys().cloned().collect();
        for id in &ids {
            let declared = tree.by_id.get(id).and_then(|g| g.parent_id.clone());
            let accepted = declared
                .filter(|p| p != id && tree.by_id.contains_key(p) && !tree.closes_cycle(id, p));
            match accepted {
                Some(parent) => {
                    tree.children
                        .entry(parent.clone())
                        .or_default()
                        .push(id.clone());
                    tree.parent.insert(id.clone(), parent);
                }
                None => tree.roots.push(id.clone()),
            }
        }
        tree
    }

    /// True when making `candidate` the parent of `child` would close a cycle over the
    /// links accepted so far.
    fn closes_cycle(&self, child: &str, candidate: &str) -> bool {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut cur = candidate;
        loop {
            if cur == child {
                return true;
            }
            if !seen.insert(cur) {
                return true;
            }
            match self.parent.get(cur) {
                Some(next) => cur = next.as_str(),
                None => return false,
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.by_id.get(id)
    }

    /// Root group ids in declaration order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parent.get(id).map(String::as_str)
    }

    /// Root-most ancestor of `id` (the id itself when already a root).
    pub fn root_of<'a>(&'a self, id: &'a str) -> &'a str {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut cur = id;
        while let Some(parent) = self.parent.get(cur) {
            if !seen.insert(cur) {
                break;
            }
            cur = parent.as_str();
        }
        cur
    }
}
