use super::{Count, Local, ThreadSafe};

fn test_count<C: Count>() {
    let count = C::one();
    assert_eq!(count.get(), 1);

    assert!(!count.incr());
    assert_eq!(count.get(), 2);

    assert!(!count.decr());
    assert_eq!(count.get(), 1);

    assert!(count.decr());
    assert_eq!(count.get(), 0);
}

#[test]
fn test_local() {
    test_count::<Local>();
}

#[test]
fn test_thread_safe() {
    test_count::<ThreadSafe>();
}

#[test]
fn test_local_saturation() {
    let count = Local(core::cell::Cell::new(usize::MAX - 1));
    assert!(count.incr());
}

#[test]
fn test_thread_safe_saturation() {
    let count = ThreadSafe(super::AtomicUsize::new(usize::MAX - 1));
    assert!(count.incr());
}
