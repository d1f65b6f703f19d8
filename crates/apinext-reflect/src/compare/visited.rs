//! Cycle guard for addressable operand pairs.
//!
//! Two sets are kept per top-level comparison:
//!
//! - composite pairs (records, sequences, arrays, maps) are recorded for the
//!   rest of the walk and assumed equal on any later encounter;
//! - reference pairs are only marked while they are being followed, which
//!   stops `a -> a` loops without remembering a finished verdict.

use std::collections::HashSet;

use crate::heap::NodeId;
use crate::value::Kind;

/// Canonical key of a composite comparison: lower node first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VisitKey {
    low: NodeId,
    high: NodeId,
    kind: Kind,
}

/// Outcome of entering a pair of addressed composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Guard {
    /// Both operands are the same node.
    SameNode,
    /// The pair was recorded earlier in this walk; assume equal.
    Revisit,
    /// First time this pair is seen; it has now been recorded.
    First,
}

const fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a.index() <= b.index() { (a, b) } else { (b, a) }
}

/// Pairs recorded during one top-level comparison.
#[derive(Debug, Default)]
pub(super) struct VisitedSet {
    seen: HashSet<VisitKey>,
    following: HashSet<(NodeId, NodeId)>,
}

impl VisitedSet {
    /// Record a composite pair. Must only be called for composite kinds.
    pub(super) fn enter(&mut self, a: NodeId, b: NodeId, kind: Kind) -> Guard {
        debug_assert!(kind.is_composite());
        let (low, high) = ordered(a, b);
        if low == high {
            return Guard::SameNode;
        }
        if self.seen.insert(VisitKey { low, high, kind }) {
            Guard::First
        } else {
            Guard::Revisit
        }
    }

    /// Mark a reference pair as being followed.
    ///
    /// Returns `false` if the pair is already on the current path.
    pub(super) fn follow(&mut self, a: NodeId, b: NodeId) -> bool {
        self.following.insert(ordered(a, b))
    }

    /// Unmark a pair marked by [`VisitedSet::follow`].
    pub(super) fn unfollow(&mut self, a: NodeId, b: NodeId) {
        self.following.remove(&ordered(a, b));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Heap;

    fn nodes() -> (NodeId, NodeId) {
        let mut heap = Heap::new();
        (heap.reserve(), heap.reserve())
    }

    #[test]
    fn test_pair_order_is_canonical() {
        let (a, b) = nodes();
        let mut visited = VisitedSet::default();

        assert_eq!(visited.enter(a, b, Kind::Record), Guard::First);
        assert_eq!(visited.enter(b, a, Kind::Record), Guard::Revisit);
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_same_node_is_not_recorded() {
        let (a, _) = nodes();
        let mut visited = VisitedSet::default();

        assert_eq!(visited.enter(a, a, Kind::Sequence), Guard::SameNode);
        assert_eq!(visited.len(), 0);
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let (a, b) = nodes();
        let mut visited = VisitedSet::default();

        assert_eq!(visited.enter(a, b, Kind::Record), Guard::First);
        assert_eq!(visited.enter(a, b, Kind::Map), Guard::First);
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_followed_pair_is_released() {
        let (a, b) = nodes();
        let mut visited = VisitedSet::default();

        assert!(visited.follow(a, b));
        assert!(!visited.follow(b, a));
        visited.unfollow(a, b);
        assert!(visited.follow(a, b));
        assert_eq!(visited.len(), 0);
    }
}
