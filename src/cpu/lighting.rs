use crate::common::math::{Norm, Point3, Unit, Vec3};
use crate::common::scene::{BLACK, Color, Material, Object, PointLight};

/// Phong illumination of a single surface point by a single point light.
///
/// `eye` and `normal` point away from the surface. The result is not clamped.
pub fn lighting(
    material: &Material,
    object: &Object,
    light: &PointLight,
    point: Point3,
    eye: Vec3,
    normal: Unit<Vec3>,
    in_shadow: bool,
) -> Color {
    let surface = match &material.pattern {
        Some(pattern) => pattern.color_at_object(object, point),
        None => material.color,
    };

    let effective = surface * light.intensity;
    let ambient = effective * material.ambient;

    if in_shadow {
        return ambient;
    }

    let light_vector = match (light.position - point).try_normalized() {
        Some(light_vector) => light_vector,
        None => return ambient,
    };

    let light_dot_normal = light_vector.dot(*normal);
    if light_dot_normal < 0.0 {
        // light is behind the surface
        return ambient;
    }

    let diffuse = effective * (material.diffuse * light_dot_normal);

    let reflect_dot_eye = (-*light_vector).reflect(*normal).dot(eye);
    let specular = if reflect_dot_eye <= 0.0 {
        BLACK
    } else {
        light.intensity * (material.specular * reflect_dot_eye.powf(material.shininess))
    };

    ambient + diffuse + specular
}
