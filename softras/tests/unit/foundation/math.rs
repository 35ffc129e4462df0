use super::*;

#[test]
fn fingerprint_is_stable_and_size_sensitive() {
    let data = vec![7u8; 16];
    let a = fingerprint_rgba8(2, 2, &data);
    let b = fingerprint_rgba8(2, 2, &data);
    assert_eq!(a, b);
    assert_ne!(a, fingerprint_rgba8(4, 1, &data));
    assert_eq!(a.to_string().len(), 32);
}

#[test]
fn safe_div_guards_tiny_denominators() {
    assert_eq!(safe_div(1.0, 0.0, -1.0), -1.0);
    assert_eq!(safe_div(1.0, 1e-12, 3.0), 3.0);
    assert!((safe_div(1.0, 4.0, 0.0) - 0.25).abs() < 1e-7);
}
