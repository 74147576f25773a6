use super::*;

#[test]
fn test_endpoints_are_stable() {
    assert_eq!(CubicBezier::RESET.apply(0.0), 0.0);
    assert_eq!(CubicBezier::RESET.apply(1.0), 1.0);
    assert_eq!(CubicBezier::RESET.apply(-3.0), 0.0);
    assert_eq!(CubicBezier::RESET.apply(7.0), 1.0);
}

#[test]
fn test_linear_curve_is_identity() {
    let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
    for t in [0.1, 0.25, 0.5, 0.9] {
        assert!((linear.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn test_reset_curve_is_monotonic_ease_out() {
    let a = CubicBezier::RESET.apply(0.25);
    let b = CubicBezier::RESET.apply(0.5);
    let c = CubicBezier::RESET.apply(0.75);
    assert!(a < b);
    assert!(b < c);
    // Front-loaded: most of the distance is covered early
    assert!(a > 0.5);
}
