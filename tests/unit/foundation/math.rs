use super::*;

#[test]
fn fnv_hash_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"track");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b't');
    b.write_bytes(b"rack");
    assert_eq!(a.finish(), b.finish());
    assert_ne!(a.finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
}
