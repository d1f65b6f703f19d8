#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

mod assert;
mod compare;
mod error;
mod heap;
mod options;
mod ser;
mod value;

// Dev-dependencies only used by integration tests
#[cfg(test)]
use tracing_subscriber as _;

// =============================================================================
// Public API
// =============================================================================

pub use compare::{Comparator, deep_equal_ignore_order};
pub use heap::{Heap, NodeId};
pub use options::{CompareOptions, SequenceOrder};
pub use value::{Callable, Field, Key, Kind, Opaque, Primitive, PrimitiveKind, Record, Shape, Value};

// Serde bridge and test helpers
pub use assert::has_same_elements;
pub use ser::{TUPLE_RECORD, ValueSerializer, equal_ignore_order, to_value};

pub use error::{HeapError, ValueError, ValueResult};
