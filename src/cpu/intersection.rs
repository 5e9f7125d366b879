use decorum::Total;
use derive_more::Constructor;

use crate::common::error::TraceError;
use crate::common::math::{EPSILON, Point3, Unit, Vec3};
use crate::common::scene::Object;
use crate::cpu::geometry::Ray;

/// A point where a ray crosses the surface of `object`, at distance `t` along the ray.
#[derive(Debug, Copy, Clone, Constructor)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Object,
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

/// A collection of intersections, always sorted by increasing `t`.
#[derive(Debug, Clone, Default)]
pub struct Intersections<'a> {
    items: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new(mut items: Vec<Intersection<'a>>) -> Self {
        items.sort_by_key(|i| Total::from_inner(i.t));
        Intersections { items }
    }

    /// The visible intersection: the one with the lowest non-negative `t`.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.items.iter().find(|i| i.t >= 0.0).copied()
    }

    pub fn get(&self, index: usize) -> Result<Intersection<'a>, TraceError> {
        self.items.get(index).copied()
            .ok_or(TraceError::IndexOutOfRange { index, len: self.items.len() })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Intersection<'a>> + '_ {
        self.items.iter()
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<I: IntoIterator<Item=Intersection<'a>>>(iter: I) -> Self {
        Intersections::new(iter.into_iter().collect())
    }
}

/// Everything needed to shade a single intersection.
#[derive(Debug, Copy, Clone)]
pub struct Computations<'a> {
    pub t: f64,
    pub object: &'a Object,

    pub point: Point3,
    pub eye: Vec3,
    /// Facing the eye, flipped if the ray started inside the object
    pub normal: Unit<Vec3>,
    pub inside: bool,

    /// Slightly above the surface, the start of shadow and reflection rays
    pub over_point: Point3,
    /// Slightly below the surface, the start of refraction rays
    pub under_point: Point3,
    pub reflect: Vec3,

    /// Refractive index of the medium being exited
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}

impl<'a> Computations<'a> {
    /// Prepare shading of `hit`, which must be one of `xs`, the intersections of `ray` with the whole world.
    pub fn prepare(hit: Intersection<'a>, ray: Ray, xs: &Intersections<'a>) -> Self {
        let point = ray.at(hit.t);
        let eye = -ray.direction;

        let normal = hit.object.normal_at(point);
        let inside = normal.dot(eye) < 0.0;
        let normal = if inside { -normal } else { normal };

        let (n1, n2) = refractive_indices(hit, xs);

        Computations {
            t: hit.t,
            object: hit.object,
            point,
            eye,
            normal,
            inside,
            over_point: point + *normal * EPSILON,
            under_point: point - *normal * EPSILON,
            reflect: ray.direction.reflect(*normal),
            n1,
            n2,
        }
    }

    /// The Schlick approximation of the fraction of light reflected at this surface.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eye.dot(*self.normal);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n * n * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Walk the intersections up to `hit`, tracking which objects the ray is currently inside.
fn refractive_indices(hit: Intersection, xs: &Intersections) -> (f64, f64) {
    let mut containers: Vec<&Object> = Vec::new();
    let current_index = |containers: &Vec<&Object>| {
        containers.last().map_or(1.0, |object| object.material.refractive_index)
    };

    let mut n1 = 1.0;
    for &i in xs.iter() {
        if i == hit {
            n1 = current_index(&containers);
        }

        match containers.iter().position(|&object| std::ptr::eq(object, i.object)) {
            Some(index) => {
                containers.remove(index);
            }
            None => containers.push(i.object),
        }

        if i == hit {
            return (n1, current_index(&containers));
        }
    }

    (n1, 1.0)
}

#[cfg(test)]
mod test {
    use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

    use crate::common::error::TraceError;
    use crate::common::math::{EPSILON, Point3, Transform, Vec3};
    use crate::common::scene::{Object, Shape};
    use crate::common::testing::{assert_close, assert_close_point3, assert_close_vec3};
    use crate::cpu::geometry::Ray;
    use crate::cpu::intersection::{Computations, Intersection, Intersections};
    use crate::demos::glass_sphere;

    fn intersections<'a>(object: &'a Object, ts: &[f64]) -> Intersections<'a> {
        ts.iter().map(|&t| Intersection::new(t, object)).collect()
    }

    #[test]
    fn hit_is_lowest_non_negative() {
        let sphere = Object::new(Shape::Sphere);

        assert_eq!(Some(Intersection::new(1.0, &sphere)), intersections(&sphere, &[1.0, 2.0]).hit());
        assert_eq!(Some(Intersection::new(1.0, &sphere)), intersections(&sphere, &[-1.0, 1.0]).hit());
        assert_eq!(None, intersections(&sphere, &[-2.0, -1.0]).hit());
        assert_eq!(Some(Intersection::new(2.0, &sphere)), intersections(&sphere, &[5.0, 7.0, -3.0, 2.0]).hit());
        assert_eq!(None, Intersections::default().hit());
    }

    #[test]
    fn intersections_are_sorted_and_indexed() {
        let sphere = Object::new(Shape::Sphere);
        let xs = intersections(&sphere, &[5.0, 7.0, -3.0, 2.0]);

        let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
        assert_eq!(vec![-3.0, 2.0, 5.0, 7.0], ts);
        assert_eq!(4, xs.len());
        assert_eq!(Ok(Intersection::new(5.0, &sphere)), xs.get(2));
        assert_eq!(Err(TraceError::IndexOutOfRange { index: 4, len: 4 }), xs.get(4));
    }

    #[test]
    fn intersection_identity_uses_the_object() {
        let a = Object::new(Shape::Sphere);
        let b = Object::new(Shape::Sphere);
        assert_ne!(Intersection::new(1.0, &a), Intersection::new(1.0, &b));
    }

    #[test]
    fn prepare_outside_hit() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let sphere = Object::new(Shape::Sphere);
        let xs = intersections(&sphere, &[4.0]);
        let comps = Computations::prepare(xs.get(0).unwrap(), ray, &xs);

        assert_eq!(4.0, comps.t);
        assert!(std::ptr::eq(&sphere, comps.object));
        assert_close_point3(Point3::new(0.0, 0.0, -1.0), comps.point);
        assert_close_vec3(Vec3::new(0.0, 0.0, -1.0), comps.eye);
        assert_close_vec3(Vec3::new(0.0, 0.0, -1.0), *comps.normal);
        assert!(!comps.inside);
    }

    #[test]
    fn prepare_inside_hit() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let sphere = Object::new(Shape::Sphere);
        let xs = intersections(&sphere, &[1.0]);
        let comps = Computations::prepare(xs.get(0).unwrap(), ray, &xs);

        assert_close_point3(Point3::new(0.0, 0.0, 1.0), comps.point);
        assert_close_vec3(Vec3::new(0.0, 0.0, -1.0), comps.eye);
        assert_close_vec3(Vec3::new(0.0, 0.0, -1.0), *comps.normal);
        assert!(comps.inside);
    }

    #[test]
    fn over_and_under_point() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let shape = glass_sphere().with_transform(Transform::translation(Vec3::new(0.0, 0.0, 1.0)));
        let xs = intersections(&shape, &[5.0]);
        let comps = Computations::prepare(xs.get(0).unwrap(), ray, &xs);

        assert!(comps.over_point.z < -EPSILON / 2.0);
        assert!(comps.point.z > comps.over_point.z);
        assert!(comps.under_point.z > EPSILON / 2.0);
        assert!(comps.point.z < comps.under_point.z);
    }

    #[test]
    fn reflect_vector() {
        let plane = Object::new(Shape::Plane);
        let ray = Ray::new(Point3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2));
        let xs = intersections(&plane, &[SQRT_2]);
        let comps = Computations::prepare(xs.get(0).unwrap(), ray, &xs);

        assert_close_vec3(Vec3::new(0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2), comps.reflect);
    }

    #[test]
    fn refractive_indices_at_nested_surfaces() {
        let mut a = glass_sphere().with_transform(Transform::uniform_scaling(2.0));
        a.material.refractive_index = 1.5;
        let mut b = glass_sphere().with_transform(Transform::translation(Vec3::new(0.0, 0.0, -0.25)));
        b.material.refractive_index = 2.0;
        let mut c = glass_sphere().with_transform(Transform::translation(Vec3::new(0.0, 0.0, 0.25)));
        c.material.refractive_index = 2.5;

        let ray = Ray::new(Point3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 0.0, 1.0));
        let xs: Intersections = vec![
            Intersection::new(2.0, &a),
            Intersection::new(2.75, &b),
            Intersection::new(3.25, &c),
            Intersection::new(4.75, &b),
            Intersection::new(5.25, &c),
            Intersection::new(6.0, &a),
        ].into_iter().collect();

        let expected = [(1.0, 1.5), (1.5, 2.0), (2.0, 2.5), (2.5, 2.5), (2.5, 1.5), (1.5, 1.0)];
        for (index, (n1, n2)) in expected.into_iter().enumerate() {
            let comps = Computations::prepare(xs.get(index).unwrap(), ray, &xs);
            assert_eq!((n1, n2), (comps.n1, comps.n2), "at index {}", index);
        }
    }

    #[test]
    fn schlick_under_total_internal_reflection() {
        let shape = glass_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, FRAC_1_SQRT_2), Vec3::new(0.0, 1.0, 0.0));
        let xs = intersections(&shape, &[-FRAC_1_SQRT_2, FRAC_1_SQRT_2]);
        let comps = Computations::prepare(xs.get(1).unwrap(), ray, &xs);

        assert_eq!(1.0, comps.schlick());
    }

    #[test]
    fn schlick_with_perpendicular_ray() {
        let shape = glass_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let xs = intersections(&shape, &[-1.0, 1.0]);
        let comps = Computations::prepare(xs.get(1).unwrap(), ray, &xs);

        assert_close(0.04, comps.schlick());
    }

    #[test]
    fn schlick_with_small_angle_into_denser_medium() {
        let shape = glass_sphere();
        let ray = Ray::new(Point3::new(0.0, 0.99, -2.0), Vec3::new(0.0, 0.0, 1.0));
        let xs = intersections(&shape, &[1.8589]);
        let comps = Computations::prepare(xs.get(0).unwrap(), ray, &xs);

        assert_close(0.48873, comps.schlick());
    }
}
