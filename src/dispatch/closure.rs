//! Transitive closure of the inheritance graph.
//!
//! Edges point from a type to its direct subtypes (the reverse of `extends`/`implements`). The
//! closure maps every type with at least one subtype to the set of all types reachable through
//! those edges, interfaces included. Cycles cannot occur in a valid program model; if one does,
//! the traversal still terminates and a type is never listed as its own descendant.

use std::{
    collections::{BTreeSet, VecDeque},
    hash::Hash,
};

use rustc_hash::{FxHashMap, FxHashSet};

/// All descendants of every type of an inheritance graph.
#[derive(Debug, Clone)]
pub struct Descendants<K> {
    closure: FxHashMap<K, BTreeSet<K>>,
}

impl<K: Copy + Ord + Hash> Descendants<K> {
    /// Computes the closure from `(subtype, supertype)` edges.
    pub fn build(edges: impl IntoIterator<Item = (K, K)>) -> Self {
        let mut children: FxHashMap<K, Vec<K>> = FxHashMap::default();
        for (child, parent) in edges {
            children.entry(parent).or_default().push(child);
        }

        let closure = children
            .keys()
            .map(|&root| (root, Self::collect(&children, root)))
            .collect();

        Self { closure }
    }

    /// Breadth-first walk over the child edges below `root`.
    fn collect(children: &FxHashMap<K, Vec<K>>, root: K) -> BTreeSet<K> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut found = BTreeSet::new();

        seen.insert(root);
        queue.push_back(root);
        while let Some(node) = queue.pop_front() {
            let Some(direct) = children.get(&node) else {
                continue;
            };
            for &child in direct {
                if seen.insert(child) {
                    found.insert(child);
                    queue.push_back(child);
                }
            }
        }

        found
    }

    /// The descendants of `key` in ascending order; empty for leaves and unknown types.
    pub fn of(&self, key: K) -> impl Iterator<Item = K> + '_ {
        self.closure.get(&key).into_iter().flatten().copied()
    }

    /// Number of descendants of `key`.
    #[must_use]
    pub fn count(&self, key: K) -> usize {
        self.closure.get(&key).map_or(0, BTreeSet::len)
    }

    /// Returns true if `descendant` lies below `key`.
    #[must_use]
    pub fn contains(&self, key: K, descendant: K) -> bool {
        self.closure
            .get(&key)
            .is_some_and(|set| set.contains(&descendant))
    }
}
