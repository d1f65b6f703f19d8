//! Order-insensitive deep equality.
//!
//! The comparator walks two [`Value`]s in lock-step. Operands must have the
//! same [`Shape`](crate::Shape); composites recurse, sequences go through the
//! greedy matcher in [`sequence`]. Composites reached through a heap
//! reference are recorded in the visited set, and a reference pair already
//! being followed is not followed again, so cyclic graphs terminate.
//!
//! Two approximations are part of the contract:
//!
//! - A pair of nodes that is re-encountered while still being compared is
//!   assumed equal. Some inequalities hidden inside a cycle are missed.
//! - Sequence matching is greedy. Each element claims the first unclaimed
//!   equal element on the other side, so a multiset that only a different
//!   assignment would match compares unequal.

mod sequence;
mod visited;

use std::collections::BTreeMap;

use tracing::trace;

use crate::heap::{Heap, NodeId};
use crate::options::CompareOptions;
use crate::value::{Key, Value};

use visited::{Guard, VisitedSet};

static EMPTY_HEAP: Heap = Heap::new();

/// Order-insensitive deep equality for values that hold no heap references.
///
/// References are compared by [`NodeId`] alone since there is no heap to
/// follow them into. Use [`Heap::deep_equal_ignore_order`] for graphs.
#[must_use]
pub fn deep_equal_ignore_order(a: &Value, b: &Value) -> bool {
    Comparator::detached().equal(a, b)
}

/// Deep equality bound to a heap and a set of options.
///
/// A `Comparator` holds no per-call state; every [`Comparator::equal`] call
/// starts with a fresh visited set, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'h> {
    heap: &'h Heap,
    options: CompareOptions,
}

impl<'h> Comparator<'h> {
    #[must_use]
    pub fn new(heap: &'h Heap) -> Self {
        Self {
            heap,
            options: CompareOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> CompareOptions {
        self.options
    }

    /// Compare two values.
    #[must_use]
    pub fn equal(&self, a: &Value, b: &Value) -> bool {
        let mut walk = Walk {
            heap: self.heap,
            options: self.options,
            visited: VisitedSet::default(),
        };
        walk.values(Operand::detached(a), Operand::detached(b))
    }
}

impl Comparator<'static> {
    /// A comparator with no heap behind it.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(&EMPTY_HEAP)
    }
}

/// A value plus the heap slot it was loaded from, if any.
#[derive(Clone, Copy)]
struct Operand<'v> {
    value: &'v Value,
    node: Option<NodeId>,
}

impl<'v> Operand<'v> {
    const fn detached(value: &'v Value) -> Self {
        Self { value, node: None }
    }

    const fn addressed(value: &'v Value, node: NodeId) -> Self {
        Self {
            value,
            node: Some(node),
        }
    }
}

/// State of one top-level comparison.
struct Walk<'h> {
    heap: &'h Heap,
    options: CompareOptions,
    visited: VisitedSet,
}

impl Walk<'_> {
    fn values(&mut self, a: Operand<'_>, b: Operand<'_>) -> bool {
        if a.value.shape() != b.value.shape() {
            trace!(left = %a.value.kind(), right = %b.value.kind(), "shape mismatch");
            return false;
        }

        if let (Some(x), Some(y)) = (a.node, b.node)
            && a.value.kind().is_composite()
        {
            match self.visited.enter(x, y, a.value.kind()) {
                Guard::SameNode | Guard::Revisit => return true,
                Guard::First => {}
            }
        }

        match (a.value, b.value) {
            (Value::Absent, Value::Absent) => true,
            (Value::Prim(x), Value::Prim(y)) => x == y,
            (Value::Seq(x), Value::Seq(y)) => match (x, y) {
                (Some(xs), Some(ys)) => self.sequences(xs, ys),
                (None, None) => true,
                _ => false,
            },
            (Value::Array(xs), Value::Array(ys)) => self.sequences(xs, ys),
            (Value::Map(x), Value::Map(y)) => match (x, y) {
                (Some(xs), Some(ys)) => self.maps(xs, ys),
                (None, None) => true,
                _ => false,
            },
            (Value::Record(x), Value::Record(y)) => x
                .fields
                .iter()
                .zip(&y.fields)
                .all(|(fx, fy)| self.values(Operand::detached(&fx.value), Operand::detached(&fy.value))),
            (Value::Optional(x), Value::Optional(y)) => match (x, y) {
                (Some(x), Some(y)) => self.values(Operand::detached(x), Operand::detached(y)),
                (None, None) => true,
                _ => false,
            },
            (Value::Ref(x), Value::Ref(y)) => match (x, y) {
                (Some(x), Some(y)) => self.references(*x, *y),
                (None, None) => true,
                _ => false,
            },
            // Set callables are never equal, not even to themselves.
            (Value::Callable(x), Value::Callable(y)) => x.is_none() && y.is_none(),
            (Value::Opaque(x), Value::Opaque(y)) => x.same_instance(y),
            _ => false,
        }
    }

    fn references(&mut self, x: NodeId, y: NodeId) -> bool {
        let heap = self.heap;
        match (heap.get(x), heap.get(y)) {
            (Some(a), Some(b)) => {
                if !self.visited.follow(x, y) {
                    return true;
                }
                let equal = self.values(Operand::addressed(a, x), Operand::addressed(b, y));
                self.visited.unfollow(x, y);
                equal
            }
            // Dangling: nothing to look into, fall back to identity.
            _ => x == y,
        }
    }

    fn maps(&mut self, xs: &BTreeMap<Key, Value>, ys: &BTreeMap<Key, Value>) -> bool {
        if xs.len() != ys.len() {
            trace!(left_len = xs.len(), right_len = ys.len(), "map size mismatch");
            return false;
        }
        if std::ptr::eq(xs, ys) {
            return true;
        }
        xs.iter().all(|(key, x)| match ys.get(key) {
            Some(y) => self.values(Operand::detached(x), Operand::detached(y)),
            None => {
                trace!(?key, "key missing on right");
                false
            }
        })
    }
}
