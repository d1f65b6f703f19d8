//! Sequence comparison, unordered by default.

use tracing::trace;

use super::{Operand, Walk};
use crate::value::Value;

/// B-side indices claimed during one sequence comparison.
struct Claims {
    taken: Vec<bool>,
    count: usize,
}

impl Claims {
    fn new(len: usize) -> Self {
        Self {
            taken: vec![false; len],
            count: 0,
        }
    }

    fn is_claimed(&self, index: usize) -> bool {
        self.taken[index]
    }

    fn claim(&mut self, index: usize) {
        if !self.taken[index] {
            self.taken[index] = true;
            self.count += 1;
        }
    }
}

impl Walk<'_> {
    pub(super) fn sequences(&mut self, xs: &[Value], ys: &[Value]) -> bool {
        if xs.len() != ys.len() {
            trace!(left_len = xs.len(), right_len = ys.len(), "sequence length mismatch");
            return false;
        }
        if std::ptr::eq(xs, ys) {
            return true;
        }
        if self.options.ignores_order() {
            self.unordered(xs, ys)
        } else {
            xs.iter()
                .zip(ys)
                .all(|(x, y)| self.values(Operand::detached(x), Operand::detached(y)))
        }
    }

    /// Greedy matching: each left element claims the first unclaimed right
    /// element equal to it. No backtracking.
    fn unordered(&mut self, xs: &[Value], ys: &[Value]) -> bool {
        let mut claims = Claims::new(ys.len());
        for (i, x) in xs.iter().enumerate() {
            let found = ys.iter().enumerate().find_map(|(j, y)| {
                (!claims.is_claimed(j) && self.values(Operand::detached(x), Operand::detached(y)))
                    .then_some(j)
            });
            match found {
                Some(j) => claims.claim(j),
                None => {
                    trace!(index = i, "no unclaimed match for element");
                    return false;
                }
            }
        }
        claims.count == ys.len()
    }
}
