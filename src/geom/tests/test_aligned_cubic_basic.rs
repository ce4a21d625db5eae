use crate::geom::{AlignedCubic, Cubic, Line, Vec2};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn aligning_moves_start_to_origin_and_end_onto_x_axis() {
    let cubic = Cubic::new(
        Vec2::new(120.0, 160.0),
        Vec2::new(220.0, 40.0),
        Vec2::new(35.0, 200.0),
        Vec2::new(220.0, 260.0),
    );
    let aligned = cubic.aligned();
    assert!(approx_eq(aligned.b_x, 156.0, 1.0));
    assert!(approx_eq(aligned.c.x, -85.0, 2.0));
    assert!(approx_eq(aligned.c.y, -40.0, 2.0));
    assert!(approx_eq(aligned.d.x, -12.0, 2.0));
    assert!(approx_eq(aligned.d.y, 140.0, 2.0));
    assert!(approx_eq(aligned.b_x, cubic.as_line().distance(), 1e-3));
}

#[test]
fn aligning_zero_chord_only_translates() {
    let cubic = Cubic::new(
        Vec2::new(5.0, 5.0),
        Vec2::new(5.0, 5.0),
        Vec2::new(6.0, 7.0),
        Vec2::new(4.0, 3.0),
    );
    let aligned = AlignedCubic::from(cubic);
    assert_eq!(aligned.b_x, 0.0);
    assert_eq!(aligned.c, Vec2::new(1.0, 2.0));
    assert_eq!(aligned.d, Vec2::new(-1.0, -2.0));
    assert!(aligned.kappa(0.5).is_finite());
}

#[test]
fn straight_line_has_no_curvature() {
    let cubic = Cubic::connecting_line(Line::new(Vec2::ZERO, Vec2::new(100.0, 100.0)));
    assert!(approx_eq(cubic.aligned().kappa(0.5), 0.0, 1e-5));
}

#[test]
fn quadratic_like_cubic_curvature() {
    let cubic = Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(66.666_67, 0.0),
        Vec2::new(100.0, 33.3333),
    );
    assert!(approx_eq(cubic.aligned().kappa(0.5), 0.014_1, 0.001));
}

#[test]
fn nearly_straight_cubic_has_tiny_curvature() {
    let cubic = Cubic::new(
        Vec2::new(619.192_44, 913.3555),
        Vec2::new(888.6296, 1392.5944),
        Vec2::new(709.891_05, 1074.6781),
        Vec2::new(799.703_37, 1234.4243),
    );
    assert!(cubic.aligned().kappa(0.076_17).abs() < 1e-5);
}

#[test]
fn kappa_and_kappa_prime_reference_values() {
    let aligned = AlignedCubic::new(
        Vec2::new(32.121_765, -14.771_326),
        Vec2::new(26.025_661, -70.339_64),
        106.625_51,
    );
    assert!(approx_eq(aligned.kappa(0.560_689), 0.0449, 0.01));
    assert!(approx_eq(aligned.kappa_prime(0.569_895_86), -0.029_656_9, 1e-4));
    assert!(approx_eq(aligned.kappa_prime(0.560_649_75), 0.000_101_4, 1e-5));
}

#[test]
fn kappa_prime_along_diagonal_cubic() {
    let cubic = Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(1000.0, 1000.0),
        Vec2::new(0.0, 250.0),
        Vec2::new(750.0, 0.0),
    );
    let aligned = cubic.aligned();
    assert!(approx_eq(aligned.kappa_prime(0.0), -0.0826, 0.01));
    assert!(approx_eq(aligned.kappa_prime(0.5), 0.0033, 0.01));
    assert!(approx_eq(aligned.kappa_prime(1.0), -0.002_11, 0.01));
}

#[test]
fn kappa_prime_matches_finite_difference() {
    let aligned = Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(37.0, 100.0),
        Vec2::new(25.0, 25.0),
        Vec2::new(75.0, 0.0),
    )
    .aligned();
    let h = 1e-3;
    for &t in &[0.2_f32, 0.4, 0.7] {
        let fd = (aligned.kappa(t + h) - aligned.kappa(t - h)) / (2.0 * h);
        assert!(approx_eq(aligned.kappa_prime(t), fd, 1e-3), "t = {t}");
    }
}

/// `|kappa|` in double precision, straight from the control points.
fn kappa_f64(aligned: &AlignedCubic, t: f64) -> f64 {
    let (cx, cy) = (f64::from(aligned.c.x), f64::from(aligned.c.y));
    let (dx, dy) = (f64::from(aligned.d.x), f64::from(aligned.d.y));
    let bx = f64::from(aligned.b_x);
    let u = 1.0 - t;
    let fx = cx * 3.0 * u * u + (dx - cx) * 6.0 * u * t + (bx - dx) * 3.0 * t * t;
    let fy = cy * 3.0 * u * u + (dy - cy) * 6.0 * u * t - dy * 3.0 * t * t;
    let sx = (dx - 2.0 * cx) * 6.0 * u + (bx - 2.0 * dx + cx) * 6.0 * t;
    let sy = (dy - 2.0 * cy) * 6.0 * u + (cy - 2.0 * dy) * 6.0 * t;
    (fx * sy - fy * sx).abs() / (fx * fx + fy * fy).powf(1.5)
}

#[allow(clippy::cast_possible_truncation)]
fn brute_force_max_kappa(aligned: &AlignedCubic, steps: u32) -> f32 {
    let step = 1.0 / f64::from(steps);
    let mut best_t = 0.0;
    let mut best = kappa_f64(aligned, 0.0);
    for i in 1..=steps {
        let t = f64::from(i) * step;
        let value = kappa_f64(aligned, t);
        if value > best {
            best = value;
            best_t = t;
        }
    }
    best_t as f32
}

#[test]
fn max_kappa_matches_brute_force() {
    let cubic = Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(37.0, 100.0),
        Vec2::new(25.0, 25.0),
        Vec2::new(75.0, 0.0),
    );
    let aligned = cubic.aligned();
    let accuracy = 0.0001;
    let found = aligned.max_kappa_parameter(accuracy);
    let expected = brute_force_max_kappa(&aligned, 100_000);
    assert!(approx_eq(found, expected, accuracy), "found {found}, brute force {expected}");
    assert!(aligned.kappa(found).abs() >= aligned.kappa(expected).abs() * 0.9999);
}

#[test]
fn max_kappa_on_straight_cubic_stays_in_range() {
    let cubic = Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(25.0, 25.0),
        Vec2::new(75.0, 75.0),
    );
    let t = cubic.aligned().max_kappa_parameter(0.01);
    assert!((0.0..=1.0).contains(&t));
}

#[test]
fn curve_radius_is_reciprocal_of_kappa() {
    let aligned = AlignedCubic::new(Vec2::new(30.0, 20.0), Vec2::new(70.0, 20.0), 100.0);
    let k = aligned.kappa(0.3);
    assert!(approx_eq(aligned.curve_radius(0.3), 1.0 / k, 1e-3));
    let straight = AlignedCubic::new(Vec2::new(30.0, 0.0), Vec2::new(70.0, 0.0), 100.0);
    assert!(straight.curve_radius(0.5).is_infinite());
}
