use super::*;

#[test]
fn redirect_retargets_every_holder_of_the_slot() {
    let mut group = RedirectGroup::new();
    let key = group.insert(Arc::new(1));
    let holder_a = key;
    let holder_b = key;

    let old = group.redirect(key, Arc::new(2));
    assert_eq!(old.as_deref(), Some(&1));
    assert_eq!(group.get(holder_a).as_deref(), Some(&2));
    assert_eq!(group.get(holder_b).as_deref(), Some(&2));
}

#[test]
fn redirect_all_matches_by_identity() {
    let mut group = RedirectGroup::new();
    let shared = Arc::new(5);
    let lookalike = Arc::new(5);
    let a = group.insert(Arc::clone(&shared));
    let b = group.insert(Arc::clone(&shared));
    let c = group.insert(Arc::clone(&lookalike));

    let replacement = Arc::new(9);
    assert_eq!(group.redirect_all(&shared, &replacement), 2);
    assert_eq!(group.get(a).as_deref(), Some(&9));
    assert_eq!(group.get(b).as_deref(), Some(&9));
    assert_eq!(group.get(c).as_deref(), Some(&5));
}

#[test]
fn removed_and_unknown_slots_are_inert() {
    let mut group = RedirectGroup::<u8>::default();
    let key = group.insert(Arc::new(1));
    assert_eq!(group.len(), 1);
    assert!(group.remove(key).is_some());
    assert!(group.is_empty());
    assert!(group.get(key).is_none());
    assert!(group.redirect(key, Arc::new(2)).is_none());
}
