use super::*;

#[test]
fn interning_is_stable() {
    let interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    let c = interner.intern("total");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "counter");
    assert_eq!(interner.lookup(c), "total");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
    assert!(!interner.is_empty());
}

#[test]
fn shared_handles_see_the_same_table() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("x");
    assert_eq!(other.lookup(name), "x");
    assert_eq!(other.intern("x"), name);
}

#[test]
fn unknown_name_resolves_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}
