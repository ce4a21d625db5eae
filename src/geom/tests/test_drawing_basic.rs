use crate::geom::{
    Cubic, Line, ParameterError, ParameterRange, Tolerance, Transform2, Vec2, cubic_vertex,
    cubic_vertex_clamped_parameterization, cubic_vertex_min_delta,
};

fn approx_eq3(a: [f32; 3], b: [f32; 3], eps: f32) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() <= eps)
}

fn sample_cubic() -> Cubic {
    Cubic::new(
        Vec2::new(0.0, 0.0),
        Vec2::new(37.0, 100.0),
        Vec2::new(25.0, 25.0),
        Vec2::new(75.0, 0.0),
    )
}

#[test]
fn identity_vertices_land_on_curve() {
    let cubic = sample_cubic();
    let identity = Transform2::identity();
    for id in 0..5_u8 {
        let v = cubic_vertex(&cubic, u32::from(id), 5, &identity, ParameterRange::UNIT)
            .expect("valid vertex");
        let p = cubic.evaluate(f32::from(id) / 4.0);
        assert!(approx_eq3(v, [p.x, p.y, 1.0], 1e-4));
    }
}

#[test]
fn transform_is_applied_to_vertex() {
    let cubic = sample_cubic();
    let transform =
        Transform2::translate(Vec2::new(5.0, -5.0)).compose(&Transform2::scale(2.0, 2.0));
    let v = cubic_vertex(&cubic, 2, 3, &transform, ParameterRange::UNIT).expect("valid vertex");
    assert_eq!(v, [79.0, 195.0, 1.0]);
}

#[test]
fn narrow_range_is_widened() {
    let cubic = sample_cubic();
    let identity = Transform2::identity();
    let point = ParameterRange::new(0.5, 0.5);
    let first = cubic_vertex_min_delta(&cubic, 0, 2, &identity, point, 0.1).expect("widened");
    let last = cubic_vertex_min_delta(&cubic, 1, 2, &identity, point, 0.1).expect("widened");
    let lo = cubic.evaluate(0.4);
    let hi = cubic.evaluate(0.6);
    assert!(approx_eq3(first, [lo.x, lo.y, 1.0], 1e-3));
    assert!(approx_eq3(last, [hi.x, hi.y, 1.0], 1e-3));

    // Widening stops at the ends of the curve.
    let edge = ParameterRange::new(0.98, 1.0);
    let end = cubic_vertex_min_delta(&cubic, 1, 2, &identity, edge, 0.1).expect("widened");
    assert!(approx_eq3(end, [cubic.b.x, cubic.b.y, 1.0], 1e-4));
}

#[test]
fn drawing_rejects_bad_arguments() {
    let cubic = sample_cubic();
    let identity = Transform2::identity();
    assert_eq!(
        cubic_vertex(&cubic, 4, 4, &identity, ParameterRange::UNIT),
        Err(ParameterError::IndexOutOfRange { index: 4, capacity: 4 })
    );
    assert!(matches!(
        cubic_vertex(&cubic, 0, 4, &identity, ParameterRange::new(0.5, 0.5)),
        Err(ParameterError::EmptyRange { .. })
    ));
    assert!(matches!(
        cubic_vertex_min_delta(&cubic, 0, 4, &identity, ParameterRange::new(0.6, 0.5), 0.1),
        Err(ParameterError::EmptyRange { .. })
    ));
}

#[test]
fn clamped_parameterization_reaches_both_ends() {
    let cubic = Cubic::connecting_line(Line::from_point_angle(Vec2::ZERO, 0.2, 10.0));
    let identity = Transform2::identity();
    let tol = Tolerance::NEARLY;

    let first =
        cubic_vertex_clamped_parameterization(&cubic, 0, 4, &identity, -1.0, 10.0, 0.01, 0.1)
            .expect("valid vertex");
    assert!(tol.approx_eq_vec2(Vec2::new(first[0], first[1]), cubic.a));

    let last =
        cubic_vertex_clamped_parameterization(&cubic, 3, 4, &identity, -1.0, 10.0, 0.01, 0.1)
            .expect("valid vertex");
    assert!(tol.approx_eq_vec2(Vec2::new(last[0], last[1]), cubic.b));
}

#[test]
fn clamped_parameterization_draws_a_window() {
    let cubic = Cubic::connecting_line(Line::new(Vec2::ZERO, Vec2::new(10.0, 0.0)));
    let identity = Transform2::identity();
    let start = cubic_vertex_clamped_parameterization(&cubic, 0, 2, &identity, 2.0, 6.0, 1e-3, 0.01)
        .expect("valid vertex");
    let end = cubic_vertex_clamped_parameterization(&cubic, 1, 2, &identity, 2.0, 6.0, 1e-3, 0.01)
        .expect("valid vertex");
    assert!((start[0] - 2.0).abs() < 1e-2);
    assert!((end[0] - 6.0).abs() < 1e-2);
}
