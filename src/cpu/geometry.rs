use std::ops::Mul;

use crate::common::math::{EPSILON, Norm, Point3, Transform, Unit, Vec3};
use crate::common::scene::{Bounds, Object, Shape};
use crate::cpu::intersection::{Intersection, Intersections};

/// Stand-in for division by a near-zero direction component in the cube slab test.
const PARALLEL_SCALE: f64 = 1e10;

/// A half-line. The direction is not required to be normalized, so transforming a ray keeps
/// its `t` values meaningful in both spaces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn at(self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

impl Mul<Ray> for Transform {
    type Output = Ray;

    fn mul(self, rhs: Ray) -> Self::Output {
        Ray {
            origin: self * rhs.origin,
            direction: self * rhs.direction,
        }
    }
}

impl Object {
    /// Every intersection of the world-space `ray` with this object, sorted by `t`.
    pub fn intersect(&self, ray: Ray) -> Intersections<'_> {
        let mut target = Vec::new();
        self.intersect_into(ray, &mut target);
        Intersections::new(target)
    }

    /// Append every intersection of the world-space `ray` with this object to `target`, in no particular order.
    pub fn intersect_into<'a>(&'a self, ray: Ray, target: &mut Vec<Intersection<'a>>) {
        let local_ray = self.local_ray(ray);
        local_intersect(self.shape, local_ray, |t| target.push(Intersection::new(t, self)));
    }

    /// The ray in object space.
    pub fn local_ray(&self, ray: Ray) -> Ray {
        self.transform.inv() * ray
    }

    /// The world-space unit normal at a world-space point on the surface.
    pub fn normal_at(&self, point: Point3) -> Unit<Vec3> {
        let local_point = self.transform.inv() * point;
        let local_normal = local_normal_at(self.shape, local_point);
        self.transform.inv_transpose_mul(local_normal).normalized()
    }
}

/// Call `f` with every `t` at which the object-space `ray` crosses the surface of `shape`.
pub fn local_intersect(shape: Shape, ray: Ray, mut f: impl FnMut(f64)) {
    match shape {
        Shape::Sphere => sphere_intersect(ray, &mut f),
        Shape::Plane => plane_intersect(ray, &mut f),
        Shape::Cube => cube_intersect(ray, &mut f),
        Shape::Cylinder(bounds) => cylinder_intersect(bounds, ray, &mut f),
        Shape::Cone(bounds) => cone_intersect(bounds, ray, &mut f),
        Shape::Test => {}
    }
}

/// The object-space normal of `shape` at an object-space point, not necessarily normalized.
pub fn local_normal_at(shape: Shape, point: Point3) -> Vec3 {
    match shape {
        Shape::Sphere => point.coords(),
        Shape::Plane => *Vec3::y_axis(),
        Shape::Cube => cube_normal(point),
        Shape::Cylinder(bounds) => cylinder_normal(bounds, point),
        Shape::Cone(bounds) => cone_normal(bounds, point),
        Shape::Test => point.coords(),
    }
}

/// Both real roots of `a t² + b t + c`, ascending for positive `a`.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    Some(if t0 <= t1 { (t0, t1) } else { (t1, t0) })
}

fn sphere_intersect(ray: Ray, f: &mut impl FnMut(f64)) {
    let oc = ray.origin.coords();

    let a = ray.direction.norm_squared();
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.norm_squared() - 1.0;

    if let Some((t0, t1)) = solve_quadratic(a, b, c) {
        f(t0);
        f(t1);
    }
}

fn plane_intersect(ray: Ray, f: &mut impl FnMut(f64)) {
    // parallel and coplanar rays both miss
    if ray.direction.y.abs() < EPSILON {
        return;
    }

    f(-ray.origin.y / ray.direction.y);
}

fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let min_numerator = -1.0 - origin;
    let max_numerator = 1.0 - origin;

    let (t_min, t_max) = if direction.abs() >= EPSILON {
        (min_numerator / direction, max_numerator / direction)
    } else {
        (min_numerator * PARALLEL_SCALE, max_numerator * PARALLEL_SCALE)
    };

    if t_min > t_max {
        (t_max, t_min)
    } else {
        (t_min, t_max)
    }
}

fn cube_intersect(ray: Ray, f: &mut impl FnMut(f64)) {
    let (x_min, x_max) = check_axis(ray.origin.x, ray.direction.x);
    let (y_min, y_max) = check_axis(ray.origin.y, ray.direction.y);
    let (z_min, z_max) = check_axis(ray.origin.z, ray.direction.z);

    let t_min = x_min.max(y_min).max(z_min);
    let t_max = x_max.min(y_max).min(z_max);

    if t_min > t_max {
        return;
    }

    f(t_min);
    f(t_max);
}

fn cube_normal(point: Point3) -> Vec3 {
    let Point3 { x, y, z } = point;
    let max_c = x.abs().max(y.abs()).max(z.abs());

    if max_c == x.abs() {
        Vec3::new(x.signum(), 0.0, 0.0)
    } else if max_c == y.abs() {
        Vec3::new(0.0, y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, z.signum())
    }
}

fn within_bounds(bounds: Bounds, ray: Ray, t: f64) -> bool {
    let y = ray.origin.y + t * ray.direction.y;
    bounds.minimum < y && y < bounds.maximum
}

/// Test the two end caps, `radius` gives the cap radius at a given height.
fn caps_intersect(bounds: Bounds, ray: Ray, radius: impl Fn(f64) -> f64, f: &mut impl FnMut(f64)) {
    if !bounds.closed || ray.direction.y.abs() < EPSILON {
        return;
    }

    for y in [bounds.minimum, bounds.maximum] {
        let t = (y - ray.origin.y) / ray.direction.y;
        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;

        let r = radius(y);
        if x * x + z * z <= r * r {
            f(t);
        }
    }
}

fn cylinder_intersect(bounds: Bounds, ray: Ray, f: &mut impl FnMut(f64)) {
    let Ray { origin: o, direction: d } = ray;
    let a = d.x * d.x + d.z * d.z;

    // rays parallel to the axis can only hit the caps
    if a.abs() >= EPSILON {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - 1.0;

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            for t in [t0, t1] {
                if within_bounds(bounds, ray, t) {
                    f(t);
                }
            }
        }
    }

    caps_intersect(bounds, ray, |_| 1.0, f);
}

fn cylinder_normal(bounds: Bounds, point: Point3) -> Vec3 {
    let dist = point.x * point.x + point.z * point.z;

    if dist < 1.0 && point.y >= bounds.maximum - EPSILON {
        Vec3::new(0.0, 1.0, 0.0)
    } else if dist < 1.0 && point.y <= bounds.minimum + EPSILON {
        Vec3::new(0.0, -1.0, 0.0)
    } else {
        Vec3::new(point.x, 0.0, point.z)
    }
}

fn cone_intersect(bounds: Bounds, ray: Ray, f: &mut impl FnMut(f64)) {
    let Ray { origin: o, direction: d } = ray;

    let a = d.x * d.x - d.y * d.y + d.z * d.z;
    let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
    let c = o.x * o.x - o.y * o.y + o.z * o.z;

    if a.abs() < EPSILON {
        // the ray is parallel to one of the cone halves and crosses the other one once
        if b.abs() >= EPSILON {
            let t = -c / (2.0 * b);
            if within_bounds(bounds, ray, t) {
                f(t);
            }
        }
    } else if let Some((t0, t1)) = solve_quadratic(a, b, c) {
        for t in [t0, t1] {
            if within_bounds(bounds, ray, t) {
                f(t);
            }
        }
    }

    caps_intersect(bounds, ray, f64::abs, f);
}

fn cone_normal(bounds: Bounds, point: Point3) -> Vec3 {
    let dist = point.x * point.x + point.z * point.z;

    if dist < bounds.maximum * bounds.maximum && point.y >= bounds.maximum - EPSILON {
        Vec3::new(0.0, 1.0, 0.0)
    } else if dist < bounds.minimum * bounds.minimum && point.y <= bounds.minimum + EPSILON {
        Vec3::new(0.0, -1.0, 0.0)
    } else if dist < EPSILON * EPSILON && point.y.abs() < EPSILON {
        // the apex, point away from the half that is kept
        if bounds.maximum <= 0.0 {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            Vec3::new(0.0, -1.0, 0.0)
        }
    } else {
        let y = dist.sqrt();
        let y = if point.y > 0.0 { -y } else { y };
        Vec3::new(point.x, y, point.z)
    }
}
