use crate::common::math::{Point3, Vec3};
use crate::common::matrix::Matrix;
use crate::common::scene::Color;

pub const TOLERANCE: f64 = 0.0001;

pub fn assert_close(left: f64, right: f64) {
    assert!(
        left.is_finite() && right.is_finite() && (left - right).abs() < TOLERANCE,
        "Expected close, finite values, got {left:?} and {right:?}"
    );
}

pub fn assert_close_vec3(left: Vec3, right: Vec3) {
    let delta = left - right;
    let max_delta = delta.x.abs().max(delta.y.abs()).max(delta.z.abs());
    assert!(
        left.is_finite() && right.is_finite() && max_delta < TOLERANCE,
        "Expected close, finite values, got {left:?} and {right:?}"
    );
}

pub fn assert_close_point3(left: Point3, right: Point3) {
    assert_close_vec3(left - Point3::origin(), right - Point3::origin());
}

pub fn assert_close_color(left: Color, right: Color) {
    assert_close_vec3(
        Vec3::new(left.red, left.green, left.blue),
        Vec3::new(right.red, right.green, right.blue),
    );
}

pub fn assert_close_matrix(left: &Matrix, right: &Matrix) {
    assert!(
        left.rows() == right.rows() && left.cols() == right.cols(),
        "Expected matching dimensions, got {left:?} and {right:?}"
    );
    for r in 0..left.rows() {
        for c in 0..left.cols() {
            assert!(
                (left[(r, c)] - right[(r, c)]).abs() < TOLERANCE,
                "Expected close matrices, got {left:#?} and {right:#?} differing at ({r}, {c})"
            );
        }
    }
}
