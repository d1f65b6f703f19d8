//! Integration tests for order-insensitive deep equality over heap graphs.

use apinext_reflect::{Comparator, CompareOptions, Heap, NodeId, Record, Value, deep_equal_ignore_order};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Build `node -> node` with the given label.
fn self_loop(heap: &mut Heap, label: &str) -> NodeId {
    let id = heap.reserve();
    heap.set(
        id,
        Record::new("Node")
            .with_field("label", label)
            .with_field("next", Value::reference(id)),
    )
    .unwrap();
    id
}

fn model(name: &str, ops: &[&str]) -> Value {
    Record::new("ModelInfo")
        .with_field("name", name)
        .with_field("supported_ops", Value::seq(ops.iter().copied()))
        .into()
}

#[test]
fn test_reordered_models() {
    init_tracing();
    let a = Value::seq([model("a", &["x", "y"]), model("b", &["z"])]);
    let b = Value::seq([model("b", &["z"]), model("a", &["y", "x"])]);
    assert!(deep_equal_ignore_order(&a, &b));
    assert!(deep_equal_ignore_order(&b, &a));
}

#[test]
fn test_self_referential_records_terminate() {
    init_tracing();
    let mut heap = Heap::new();
    let r = self_loop(&mut heap, "r");
    let r2 = self_loop(&mut heap, "r");

    assert!(heap.deep_equal_ignore_order(&Value::reference(r), &Value::reference(r2)));
    assert!(heap.deep_equal_ignore_order(&Value::reference(r2), &Value::reference(r)));
}

#[test]
fn test_self_referential_records_with_different_labels() {
    let mut heap = Heap::new();
    let r = self_loop(&mut heap, "r");
    let s = self_loop(&mut heap, "s");

    assert!(!heap.deep_equal_ignore_order(&Value::reference(r), &Value::reference(s)));
}

#[test]
fn test_mutual_references_terminate() {
    let mut heap = Heap::new();
    // a <-> b and c <-> d
    let nodes: Vec<NodeId> = (0..4).map(|_| heap.reserve()).collect();
    for (from, to) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
        heap.set(
            nodes[from],
            Record::new("Peer")
                .with_field("tags", Value::seq(["x", "y"]))
                .with_field("peer", Value::reference(nodes[to])),
        )
        .unwrap();
    }

    assert!(heap.deep_equal_ignore_order(&Value::reference(nodes[0]), &Value::reference(nodes[2])));
}

#[test]
fn test_reference_only_cycle_terminates() {
    let mut heap = Heap::new();
    let a = heap.reserve();
    let b = heap.reserve();
    heap.set(a, Value::reference(a)).unwrap();
    heap.set(b, Value::reference(b)).unwrap();

    assert!(heap.deep_equal_ignore_order(&Value::reference(a), &Value::reference(b)));
}

#[test]
fn test_sequences_of_references_to_primitives() {
    let mut heap = Heap::new();
    let one = heap.alloc(1_i64);
    let two = heap.alloc(2_i64);

    let ones = Value::seq([Value::reference(one), Value::reference(one)]);
    let twos = Value::seq([Value::reference(two), Value::reference(two)]);

    assert!(!heap.deep_equal_ignore_order(&Value::reference(one), &Value::reference(two)));
    assert!(!heap.deep_equal_ignore_order(&ones, &twos));
    assert!(!heap.deep_equal_ignore_order(&twos, &ones));
    assert!(heap.deep_equal_ignore_order(&ones, &ones.clone()));
}

#[test]
fn test_failed_reference_pair_is_compared_again() {
    let mut heap = Heap::new();
    let tag = heap.alloc("tag");
    let embed = heap.alloc("embed");
    let tags = Value::seq(vec![Value::reference(tag); 3]);
    let embeds = Value::seq(vec![Value::reference(embed); 3]);

    assert!(!heap.deep_equal_ignore_order(&tags, &embeds));

    // Pointer to pointer to primitive: the outer pair is only marked while followed.
    let via_tag = heap.alloc(Value::reference(tag));
    let via_embed = heap.alloc(Value::reference(embed));
    let outer = Value::seq([Value::reference(via_tag), Value::reference(via_tag)]);
    let other = Value::seq([Value::reference(via_embed), Value::reference(via_embed)]);
    assert!(!heap.deep_equal_ignore_order(&outer, &other));
}

#[test]
fn test_cycle_through_sequences() {
    let mut heap = Heap::new();
    let a = heap.reserve();
    let b = heap.reserve();
    heap.set(a, Value::seq([Value::from(1_i64), Value::reference(a)])).unwrap();
    heap.set(b, Value::seq([Value::reference(b), Value::from(1_i64)])).unwrap();

    assert!(heap.deep_equal_ignore_order(&Value::reference(a), &Value::reference(b)));
}

#[test]
fn test_shared_node_short_circuits() {
    let mut heap = Heap::new();
    let shared = heap.alloc(Value::seq([Value::callable(|_| Value::Absent)]));

    // A set callable never equals anything, but an aliased node is not looked into.
    let a = Value::seq([Value::reference(shared)]);
    let b = Value::seq([Value::reference(shared)]);
    assert!(heap.deep_equal_ignore_order(&a, &b));
}

#[test]
fn test_null_references() {
    let mut heap = Heap::new();
    let id = heap.alloc(1_i64);

    assert!(heap.deep_equal_ignore_order(&Value::null_ref(), &Value::null_ref()));
    assert!(!heap.deep_equal_ignore_order(&Value::null_ref(), &Value::reference(id)));
}

/// Items point at one of two nodes whose contents differ. Comparing
/// `x2` with `y1` fails, but it records the (p, q) record pair as visited; a
/// later `x2` vs `y2` comparison then assumes `p == q`. Greedy matching visits
/// elements in order, so the verdict depends on which comparison runs first.
#[test]
fn test_greedy_verdict_depends_on_element_order() {
    let mut heap = Heap::new();
    let p = heap.alloc(Record::new("Node").with_field("v", 1_i64));
    let q = heap.alloc(Record::new("Node").with_field("v", 2_i64));
    let item = |link: NodeId, tag: &str| -> Value {
        Record::new("Item")
            .with_field("link", Value::reference(link))
            .with_field("tag", tag)
            .into()
    };

    let x1 = item(q, "b");
    let x2 = item(p, "a");
    let y1 = item(q, "b");
    let y2 = item(q, "a");

    let forward = Value::seq([x1.clone(), x2.clone()]);
    let backward = Value::seq([x2, x1]);
    let target = Value::seq([y1, y2]);

    assert!(!heap.deep_equal_ignore_order(&forward, &target));
    assert!(heap.deep_equal_ignore_order(&backward, &target));
}

#[test]
fn test_ordered_comparator_on_graph() {
    let mut heap = Heap::new();
    let a = heap.alloc(Value::seq([1_i64, 2]));
    let b = heap.alloc(Value::seq([2_i64, 1]));
    let ordered = Comparator::new(&heap).with_options(CompareOptions::ordered());

    assert!(!ordered.equal(&Value::reference(a), &Value::reference(b)));
    assert!(Comparator::new(&heap).equal(&Value::reference(a), &Value::reference(b)));
}

#[test]
fn test_concurrent_comparisons() {
    let mut heap = Heap::new();
    let loops: Vec<NodeId> = (0..8).map(|_| self_loop(&mut heap, "n")).collect();
    let comparator = Comparator::new(&heap);

    std::thread::scope(|scope| {
        for pair in loops.chunks(2) {
            let (a, b) = (pair[0], pair[1]);
            scope.spawn(move || {
                for _ in 0..100 {
                    assert!(comparator.equal(&Value::reference(a), &Value::reference(b)));
                }
            });
        }
    });
}
