use crate::common::math::{Norm, Point3, Unit, Vec3};
use crate::common::scene::{BLACK, Color, World};
use crate::cpu::geometry::Ray;
use crate::cpu::intersection::{Computations, Intersections};
use crate::cpu::lighting::lighting;

/// Number of reflection and refraction bounces followed for each primary ray.
pub const DEFAULT_DEPTH: u32 = 5;

impl World {
    /// Every intersection of `ray` with every object, sorted by `t`.
    pub fn intersect(&self, ray: Ray) -> Intersections<'_> {
        let mut items = Vec::new();
        for object in &self.objects {
            object.intersect_into(ray, &mut items);
        }
        Intersections::new(items)
    }

    /// Whether some object lies between `point` and the light.
    pub fn is_shadowed(&self, point: Point3) -> bool {
        let (direction, distance) = match (self.light.position - point).try_normalized_and_get() {
            Some(result) => result,
            None => return false,
        };

        let xs = self.intersect(Ray::new(point, *direction));
        matches!(xs.hit(), Some(hit) if hit.t < distance)
    }

    pub fn shade_hit(&self, comps: &Computations, bounces_left: u32) -> Color {
        let material = &comps.object.material;

        let shadowed = self.is_shadowed(comps.over_point);
        let surface = lighting(
            material, comps.object, &self.light,
            comps.over_point, comps.eye, comps.normal, shadowed,
        );

        let reflected = self.reflected_color(comps, bounces_left);
        let refracted = self.refracted_color(comps, bounces_left);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// The color seen along `ray`, black if it hits nothing.
    pub fn color_at(&self, ray: Ray, bounces_left: u32) -> Color {
        let xs = self.intersect(ray);

        match xs.hit() {
            None => BLACK,
            Some(hit) => {
                let comps = Computations::prepare(hit, ray, &xs);
                self.shade_hit(&comps, bounces_left)
            }
        }
    }

    pub fn reflected_color(&self, comps: &Computations, bounces_left: u32) -> Color {
        let reflective = comps.object.material.reflective;
        if bounces_left == 0 || reflective == 0.0 {
            return BLACK;
        }

        let ray = Ray::new(comps.over_point, comps.reflect);
        self.color_at(ray, bounces_left - 1) * reflective
    }

    pub fn refracted_color(&self, comps: &Computations, bounces_left: u32) -> Color {
        let transparency = comps.object.material.transparency;
        if bounces_left == 0 || transparency == 0.0 {
            return BLACK;
        }

        match snells_law(comps.eye, comps.normal, comps.n1 / comps.n2) {
            None => BLACK,
            Some(direction) => {
                let ray = Ray::new(comps.under_point, direction);
                self.color_at(ray, bounces_left - 1) * transparency
            }
        }
    }
}

/// Compute the refracted direction according to
/// [Snell's law](https://en.wikipedia.org/wiki/Snell%27s_law#Vector_form),
/// `None` on total internal reflection.
/// `eye` and `normal` should point to the same side of the surface, `ratio` is `n1 / n2`.
fn snells_law(eye: Vec3, normal: Unit<Vec3>, ratio: f64) -> Option<Vec3> {
    let cos_i = eye.dot(*normal);
    let sin2_t = ratio * ratio * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    Some(*normal * (ratio * cos_i - cos_t) - eye * ratio)
}
