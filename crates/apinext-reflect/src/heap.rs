//! Arena giving composite values a stable identity.
//!
//! A value stored in a [`Heap`] slot is addressable: the comparator uses its
//! [`NodeId`] for the aliasing short-circuit and for cycle detection.
//! Self-referential graphs are built by reserving a slot first and filling it
//! once the references to it exist.

use crate::compare::Comparator;
use crate::error::HeapError;
use crate::value::Value;

/// Index of a slot in a [`Heap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Slot storage for addressable values.
#[derive(Debug, Clone, Default)]
pub struct Heap {
    slots: Vec<Value>,
}

impl Heap {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Store `value` in a new slot.
    pub fn alloc(&mut self, value: impl Into<Value>) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(value.into());
        id
    }

    /// Allocate an empty slot to be filled later with [`Heap::set`].
    pub fn reserve(&mut self) -> NodeId {
        self.alloc(Value::Absent)
    }

    /// Replace the value in an existing slot.
    pub fn set(&mut self, id: NodeId, value: impl Into<Value>) -> Result<(), HeapError> {
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(HeapError::UnknownNode(id.0))?;
        *slot = value.into();
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Value> {
        self.slots.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Order-insensitive deep equality for values that may reference this heap.
    #[must_use]
    pub fn deep_equal_ignore_order(&self, a: &Value, b: &Value) -> bool {
        Comparator::new(self).equal(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_then_set() {
        let mut heap = Heap::new();
        let id = heap.reserve();
        assert!(heap.get(id).is_some_and(Value::is_absent));

        heap.set(id, Value::reference(id)).unwrap();
        assert!(matches!(heap.get(id), Some(Value::Ref(Some(target))) if *target == id));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_set_unknown_node() {
        let mut other = Heap::new();
        other.alloc(1_i64);
        other.alloc(2_i64);
        let foreign = other.alloc(3_i64);

        let mut heap = Heap::new();
        let err = heap.set(foreign, 0_i64).unwrap_err();
        assert_eq!(err.to_string(), "No heap node with index 2");
    }
}
