use std::hint::black_box;

use octets::Octets;

#[test]
fn test_eq() {
    let o = Octets::from(b"abc");
    let o2 = black_box(o.clone());
    assert_eq!(o, o2);
}

#[test]
fn test_cow() {
    let a = Octets::from(b"foo");
    let mut b = black_box(a.clone());
    b.push_slice(b"bar");
    assert_eq!(a.hex(), "666f6f");
    assert_eq!(b.hex(), "666f6f626172");
}
