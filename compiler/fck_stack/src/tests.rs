use super::*;

/// A nested list shaped like `[[[...]]]`, the structure that drives the
/// deepest recursion in practice.
enum Nested {
    Leaf(i64),
    Wrap(Box<Nested>),
}

fn depth(node: &Nested) -> usize {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(_) => 0,
        Nested::Wrap(inner) => depth(inner) + 1,
    })
}

fn build(levels: usize) -> Nested {
    let mut node = Nested::Leaf(7);
    for _ in 0..levels {
        node = Nested::Wrap(Box::new(node));
    }
    node
}

#[test]
fn deep_nesting_does_not_overflow() {
    let node = build(200_000);
    assert_eq!(depth(&node), 200_000);
    // Drop iteratively so the test itself does not overflow in Drop.
    let mut node = node;
    while let Nested::Wrap(inner) = node {
        node = *inner;
    }
    assert!(matches!(node, Nested::Leaf(7)));
}

#[test]
fn passes_results_through() {
    let result: Result<i64, String> = ensure_sufficient_stack(|| Err("stop".to_string()));
    assert_eq!(result, Err("stop".to_string()));
    assert_eq!(ensure_sufficient_stack(|| 5 * 5), 25);
}
