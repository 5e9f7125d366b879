use std::array::from_fn;
use std::fmt;
use std::fmt::Debug;
use std::ops::{Add, Deref, Div, Mul, Neg, Sub};

use crate::common::error::TraceError;
use crate::common::matrix::Matrix;

/// Distance used to nudge points off a surface and to detect rays parallel to a surface.
pub const EPSILON: f64 = 0.00001;

pub trait Norm: Div<f64, Output=Self> + Sized + Copy + Debug {
    fn norm_squared(self) -> f64;

    fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    fn try_normalized_and_get(self) -> Option<(Unit<Self>, f64)> {
        let norm = self.norm();
        if norm == 0.0 {
            None
        } else {
            Some((Unit::new_unchecked(self / norm), norm))
        }
    }

    fn normalized_and_get(self) -> (Unit<Self>, f64) {
        self.try_normalized_and_get()
            .unwrap_or_else(|| panic!("norm should be > 0.0 but was {} for {:?}", self.norm(), self))
    }

    fn try_normalized(self) -> Option<Unit<Self>> {
        self.try_normalized_and_get().map(|(u, _)| u)
    }

    fn checked_normalized(self) -> Result<Unit<Self>, TraceError> {
        self.try_normalized().ok_or(TraceError::ZeroVector)
    }

    fn normalized(self) -> Unit<Self> {
        self.normalized_and_get().0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Mirror this vector around `normal`, which should have unit length.
    pub fn reflect(self, normal: Vec3) -> Vec3 {
        self - normal * (2.0 * self.dot(normal))
    }

    pub const fn to_homogeneous(self) -> [f64; 4] {
        [self.x, self.y, self.z, 0.0]
    }

    pub fn x_axis() -> Unit<Vec3> {
        Unit::new_unchecked(Vec3::new(1.0, 0.0, 0.0))
    }

    pub fn y_axis() -> Unit<Vec3> {
        Unit::new_unchecked(Vec3::new(0.0, 1.0, 0.0))
    }

    pub fn z_axis() -> Unit<Vec3> {
        Unit::new_unchecked(Vec3::new(0.0, 0.0, 1.0))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Norm for Vec3 {
    fn norm_squared(self) -> f64 {
        self.dot(self)
    }
}

// A vector of guaranteed unit length
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Unit<V: Norm> {
    inner: V,
}

impl<V: Norm> Deref for Unit<V> {
    type Target = V;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<V: Norm + Debug> Unit<V> {
    pub fn new_unchecked(inner: V) -> Unit<V> {
        debug_assert!((1.0 - inner.norm_squared()).abs() < 0.00001,
                      "norm_squared should be 1.0 but was {} for {:?}", inner.norm_squared(), inner);
        Unit { inner }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn from_coords(coords: Vec3) -> Self {
        Self::new(coords.x, coords.y, coords.z)
    }

    pub const fn coords(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub const fn origin() -> Point3 {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn to_homogeneous(self) -> [f64; 4] {
        [self.x, self.y, self.z, 1.0]
    }

    pub fn distance_to(self, other: Point3) -> f64 {
        (self - other).norm()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

//operator overloading

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Vec3) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Vec3 { x: self.x / rhs, y: self.y / rhs, z: self.z / rhs }
    }
}

impl<V: Norm + Neg<Output=V>> Neg for Unit<V> {
    type Output = Unit<V>;
    fn neg(self) -> Self::Output {
        Unit { inner: -self.inner }
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    fn add(self, rhs: Vec3) -> Self::Output {
        Self::from_coords(self.coords() + rhs)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Vec3) -> Self::Output {
        Self::from_coords(self.coords() - rhs)
    }
}

impl Sub<Point3> for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Point3) -> Self::Output {
        self.coords() - rhs.coords()
    }
}

/// A fixed 4x4 matrix used on the hot path, general matrix algebra lives in [Matrix].
#[derive(Debug, Copy, Clone, PartialEq)]
struct Matrix4 {
    rows: [[f64; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl Mul<Matrix4> for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Self::Output {
        Self::new(from_fn(|r| from_fn(|c|
            (0..4).map(|i| self.rows[r][i] * rhs.rows[i][c]).sum()
        )))
    }
}

impl Mul<[f64; 4]> for Matrix4 {
    type Output = [f64; 4];

    fn mul(self, rhs: [f64; 4]) -> Self::Output {
        from_fn(|r| (0..4).map(|i| self.rows[r][i] * rhs[i]).sum())
    }
}

impl Matrix4 {
    fn new(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    fn from_matrix(matrix: &Matrix) -> Result<Self, TraceError> {
        if matrix.rows() != 4 || matrix.cols() != 4 {
            return Err(TraceError::DimensionMismatch { left: matrix.cols(), right: 4 });
        }
        Ok(Self::new(from_fn(|r| from_fn(|c| matrix[(r, c)]))))
    }

    fn to_matrix(self) -> Matrix {
        Matrix::from_rows(&self.rows)
    }

    fn transpose(self) -> Self {
        Self::new(from_fn(|r| from_fn(|c| self.rows[c][r])))
    }

    fn translation(translation: Vec3) -> Self {
        Self::new([
            [1.0, 0.0, 0.0, translation.x],
            [0.0, 1.0, 0.0, translation.y],
            [0.0, 0.0, 1.0, translation.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn rotation(axis: Unit<Vec3>, angle: Angle) -> Self {
        let Vec3 { x, y, z } = *axis;
        let c = angle.radians.cos();
        let s = angle.radians.sin();

        Self::new([
            [c + x * x * (1.0 - c), x * y * (1.0 - c) - z * s, x * z * (1.0 - c) + y * s, 0.0],
            [y * x * (1.0 - c) + z * s, c + y * y * (1.0 - c), y * z * (1.0 - c) - x * s, 0.0],
            [z * x * (1.0 - c) - y * s, z * y * (1.0 - c) + x * s, c + z * z * (1.0 - c), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn scaling(scale: Vec3) -> Self {
        Self::new([
            [scale.x, 0.0, 0.0, 0.0],
            [0.0, scale.y, 0.0, 0.0],
            [0.0, 0.0, scale.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn is_finite(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&x| x.is_finite()))
    }
}

/// An affine transformation together with its inverse.
///
/// Both directions are computed once when the transform is built, so rays, points and normals
/// can be mapped between world and object space without ever inverting a matrix while rendering.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    fwd: Matrix4,
    inv: Matrix4,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a transform from an arbitrary 4x4 matrix, inverting it by cofactor expansion.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self, TraceError> {
        let fwd = Matrix4::from_matrix(matrix)?;
        let inv = Matrix4::from_matrix(matrix.inverse()?)?;
        Ok(Self { fwd, inv })
    }

    pub fn to_matrix(self) -> Matrix {
        self.fwd.to_matrix()
    }

    pub fn inv(self) -> Self {
        Self {
            fwd: self.inv,
            inv: self.fwd,
        }
    }

    /// Map a normal vector with the inverse-transpose, the homogeneous coordinate is dropped.
    pub fn inv_transpose_mul(self, rhs: Vec3) -> Vec3 {
        let [x, y, z, _] = self.inv.transpose() * rhs.to_homogeneous();
        Vec3::new(x, y, z)
    }

    pub fn translation(translation: Vec3) -> Self {
        Self {
            fwd: Matrix4::translation(translation),
            inv: Matrix4::translation(-translation),
        }
    }

    pub fn rotation(axis: Unit<Vec3>, angle: Angle) -> Self {
        Self {
            fwd: Matrix4::rotation(axis, angle),
            inv: Matrix4::rotation(axis, -angle),
        }
    }

    pub fn rotation_x(angle: Angle) -> Self {
        Self::rotation(Vec3::x_axis(), angle)
    }

    pub fn rotation_y(angle: Angle) -> Self {
        Self::rotation(Vec3::y_axis(), angle)
    }

    pub fn rotation_z(angle: Angle) -> Self {
        Self::rotation(Vec3::z_axis(), angle)
    }

    pub fn scaling(scale: Vec3) -> Self {
        debug_assert!(scale.x != 0.0 && scale.y != 0.0 && scale.z != 0.0, "degenerate scale {:?}", scale);
        Transform {
            fwd: Matrix4::scaling(scale),
            inv: Matrix4::scaling(Vec3::new(1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z)),
        }
    }

    pub fn uniform_scaling(scale: f64) -> Self {
        Self::scaling(Vec3::new(scale, scale, scale))
    }

    /// Move each coordinate in proportion to the other two, eg. `xy` moves x in proportion to y.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Result<Self, TraceError> {
        Self::from_matrix(&Matrix::from_rows(&[
            [1.0, xy, xz, 0.0],
            [yx, 1.0, yz, 0.0],
            [zx, zy, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// The world-to-camera transform for an eye at `from` looking at `to`.
    ///
    /// The camera looks down its negative Z axis. Fails when `up` is parallel to the viewing
    /// direction or when `from` and `to` coincide.
    pub fn view(from: Point3, to: Point3, up: Vec3) -> Result<Self, TraceError> {
        let forward = (to - from).checked_normalized()?;
        let left = forward.cross(*up.checked_normalized()?).checked_normalized()?;
        let true_up = left.cross(*forward);

        let orientation = Matrix4::new([
            [left.x, left.y, left.z, 0.0],
            [true_up.x, true_up.y, true_up.z, 0.0],
            [-forward.x, -forward.y, -forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        // orthonormal rows, so the transpose is the inverse
        let orientation = Self {
            fwd: orientation,
            inv: orientation.transpose(),
        };

        Ok(orientation * Self::translation(-from.coords()))
    }

    pub fn is_finite(&self) -> bool {
        self.fwd.is_finite() && self.inv.is_finite()
    }
}

impl Mul<Transform> for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            fwd: self.fwd * rhs.fwd,
            inv: rhs.inv * self.inv,
        }
    }
}

impl Mul<Vec3> for Transform {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        let [x, y, z, _] = self.fwd * rhs.to_homogeneous();
        Vec3::new(x, y, z)
    }
}

impl Mul<Point3> for Transform {
    type Output = Point3;

    fn mul(self, rhs: Point3) -> Self::Output {
        let [x, y, z, _] = self.fwd * rhs.to_homogeneous();
        Point3::new(x, y, z)
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Angle {
    pub radians: f64,
}

impl Angle {
    pub fn radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn degrees(degrees: f64) -> Angle {
        Angle::radians(degrees.to_radians())
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle { radians: -self.radians }
    }
}

impl Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({} = {}°)", self.radians, self.radians.to_degrees())
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::common::error::TraceError;
    use crate::common::math::{Angle, Norm, Point3, Transform, Vec3};
    use crate::common::matrix::Matrix;
    use crate::common::testing::{assert_close, assert_close_matrix, assert_close_point3, assert_close_vec3};

    #[test]
    fn point_and_vector_arithmetic() {
        let p = Point3::new(3.0, 2.0, 1.0);
        let v = Vec3::new(5.0, 6.0, 7.0);

        assert_eq!(Point3::new(8.0, 8.0, 8.0), p + v);
        assert_eq!(Point3::new(-2.0, -4.0, -6.0), p - v);
        assert_eq!(Vec3::new(-2.0, -4.0, -6.0), p - Point3::new(5.0, 6.0, 7.0));
        assert_eq!(Vec3::new(-2.0, -4.0, -6.0), Vec3::new(3.0, 2.0, 1.0) - v);
        assert_eq!(Vec3::new(3.5, -7.0, 10.5), Vec3::new(1.0, -2.0, 3.0) * 3.5);
        assert_eq!(Vec3::new(0.5, -1.0, 1.5), Vec3::new(1.0, -2.0, 3.0) / 2.0);
        assert_eq!([3.0, 2.0, 1.0, 1.0], p.to_homogeneous());
        assert_eq!([5.0, 6.0, 7.0, 0.0], v.to_homogeneous());
    }

    #[test]
    fn dot_cross_and_norm() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, 3.0, 4.0);

        assert_eq!(20.0, a.dot(b));
        assert_eq!(Vec3::new(-1.0, 2.0, -1.0), a.cross(b));
        assert_eq!(Vec3::new(1.0, -2.0, 1.0), b.cross(a));
        assert_close(14f64.sqrt(), a.norm());

        let n = Vec3::new(1.0, 2.0, 3.0).normalized();
        assert_close_vec3(Vec3::new(0.26726, 0.53452, 0.80178), *n);
        assert_close(1.0, n.norm());
    }

    #[test]
    fn normalizing_zero_vector_fails() {
        assert_eq!(Err(TraceError::ZeroVector), Vec3::new(0.0, 0.0, 0.0).checked_normalized());
        assert!(Vec3::default().try_normalized().is_none());
    }

    #[test]
    fn reflect_at_45_degrees_and_slanted() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_close_vec3(Vec3::new(1.0, 1.0, 0.0), v.reflect(Vec3::new(0.0, 1.0, 0.0)));

        let v = Vec3::new(0.0, -1.0, 0.0);
        let n = Vec3::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0);
        assert_close_vec3(Vec3::new(1.0, 0.0, 0.0), v.reflect(n));
    }

    #[test]
    fn reflection_law_holds_for_random_vectors() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let n = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let n = match n.try_normalized() {
                Some(n) => *n,
                None => continue,
            };

            assert_close_vec3(v - n * 2.0 * v.dot(n), v.reflect(n));
        }
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let transform = Transform::translation(Vec3::new(5.0, -3.0, 2.0));
        let p = Point3::new(-3.0, 4.0, 5.0);

        assert_close_point3(Point3::new(2.0, 1.0, 7.0), transform * p);
        assert_close_point3(Point3::new(-8.0, 7.0, 3.0), transform.inv() * p);

        let v = Vec3::new(-3.0, 4.0, 5.0);
        assert_eq!(v, transform * v);
    }

    #[test]
    fn scaling_and_reflection() {
        let transform = Transform::scaling(Vec3::new(2.0, 3.0, 4.0));

        assert_close_point3(Point3::new(-8.0, 18.0, 32.0), transform * Point3::new(-4.0, 6.0, 8.0));
        assert_close_vec3(Vec3::new(-8.0, 18.0, 32.0), transform * Vec3::new(-4.0, 6.0, 8.0));
        assert_close_vec3(Vec3::new(-2.0, 2.0, 2.0), transform.inv() * Vec3::new(-4.0, 6.0, 8.0));

        let mirror = Transform::scaling(Vec3::new(-1.0, 1.0, 1.0));
        assert_close_point3(Point3::new(-2.0, 3.0, 4.0), mirror * Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn rotations_around_each_axis() {
        let half_quarter = Angle::radians(PI / 4.0);
        let full_quarter = Angle::radians(PI / 2.0);

        let p = Point3::new(0.0, 1.0, 0.0);
        assert_close_point3(Point3::new(0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2), Transform::rotation_x(half_quarter) * p);
        assert_close_point3(Point3::new(0.0, 0.0, 1.0), Transform::rotation_x(full_quarter) * p);
        assert_close_point3(Point3::new(0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2), Transform::rotation_x(half_quarter).inv() * p);

        let p = Point3::new(0.0, 0.0, 1.0);
        assert_close_point3(Point3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2), Transform::rotation_y(half_quarter) * p);
        assert_close_point3(Point3::new(1.0, 0.0, 0.0), Transform::rotation_y(full_quarter) * p);

        let p = Point3::new(0.0, 1.0, 0.0);
        assert_close_point3(Point3::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0), Transform::rotation_z(half_quarter) * p);
        assert_close_point3(Point3::new(-1.0, 0.0, 0.0), Transform::rotation_z(full_quarter) * p);
    }

    #[test]
    fn shearing_each_proportion() {
        let p = Point3::new(2.0, 3.0, 4.0);
        let cases = [
            ((1.0, 0.0, 0.0, 0.0, 0.0, 0.0), Point3::new(5.0, 3.0, 4.0)),
            ((0.0, 1.0, 0.0, 0.0, 0.0, 0.0), Point3::new(6.0, 3.0, 4.0)),
            ((0.0, 0.0, 1.0, 0.0, 0.0, 0.0), Point3::new(2.0, 5.0, 4.0)),
            ((0.0, 0.0, 0.0, 1.0, 0.0, 0.0), Point3::new(2.0, 7.0, 4.0)),
            ((0.0, 0.0, 0.0, 0.0, 1.0, 0.0), Point3::new(2.0, 3.0, 6.0)),
            ((0.0, 0.0, 0.0, 0.0, 0.0, 1.0), Point3::new(2.0, 3.0, 7.0)),
        ];

        for ((xy, xz, yx, yz, zx, zy), expected) in cases {
            let transform = Transform::shearing(xy, xz, yx, yz, zx, zy).unwrap();
            assert_close_point3(expected, transform * p);
            assert_close_point3(p, transform.inv() * expected);
        }
    }

    #[test]
    fn degenerate_shearing_is_not_invertible() {
        assert_eq!(Err(TraceError::NotInvertible), Transform::shearing(1.0, 0.0, 1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn chained_transforms_apply_in_reverse_order() {
        let p = Point3::new(1.0, 0.0, 1.0);
        let a = Transform::rotation_x(Angle::radians(PI / 2.0));
        let b = Transform::uniform_scaling(5.0);
        let c = Transform::translation(Vec3::new(10.0, 5.0, 7.0));

        let combined = c * b * a;
        assert_close_point3(Point3::new(15.0, 0.0, 7.0), combined * p);
        assert_close_point3(p, combined.inv() * Point3::new(15.0, 0.0, 7.0));
    }

    #[test]
    fn default_view_is_identity() {
        let view = Transform::view(Point3::origin(), Point3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_close_matrix(&Matrix::identity(4), &view.to_matrix());
    }

    #[test]
    fn view_looking_in_positive_z_mirrors() {
        let view = Transform::view(Point3::origin(), Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let expected = Transform::scaling(Vec3::new(-1.0, 1.0, -1.0));
        assert_close_matrix(&expected.to_matrix(), &view.to_matrix());
    }

    #[test]
    fn view_moves_the_world() {
        let view = Transform::view(Point3::new(0.0, 0.0, 8.0), Point3::origin(), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let expected = Transform::translation(Vec3::new(0.0, 0.0, -8.0));
        assert_close_matrix(&expected.to_matrix(), &view.to_matrix());
    }

    #[test]
    fn arbitrary_view_has_orthonormal_orientation() {
        let from = Point3::new(1.0, 3.0, 2.0);
        let view = Transform::view(from, Point3::new(4.0, -2.0, 8.0), Vec3::new(1.0, 1.0, 0.0)).unwrap();

        assert_close_point3(Point3::origin(), view * from);
        let product = view.to_matrix().multiply(&view.inv().to_matrix()).unwrap();
        assert_close_matrix(&Matrix::identity(4), &product);

        let forward = view * (Point3::new(4.0, -2.0, 8.0) - from).normalized().into_inner();
        assert_close_vec3(Vec3::new(0.0, 0.0, -1.0), forward);
    }

    #[test]
    fn view_with_parallel_up_fails() {
        let result = Transform::view(Point3::origin(), Point3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(Err(TraceError::ZeroVector), result);
    }

    #[test]
    fn from_matrix_round_trip() {
        let matrix = Matrix::from_rows(&[
            [3.0, -9.0, 7.0, 3.0],
            [3.0, -8.0, 2.0, -9.0],
            [-4.0, 4.0, 4.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let transform = Transform::from_matrix(&matrix).unwrap();

        let p = Point3::new(1.0, 2.0, 3.0);
        let round_trip = transform.inv() * (transform * p);
        assert_close_point3(p, round_trip);

        let not_4x4 = Matrix::identity(3);
        assert!(Transform::from_matrix(&not_4x4).is_err());
    }
}
