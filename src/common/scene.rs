use std::marker::PhantomData;

use derive_more::Constructor;

use crate::common::math::{Point3, Transform};
use crate::common::pattern::Pattern;

/// Linear RGB with unbounded components, clamping only happens when writing images.
pub type Color = palette::LinSrgb<f64>;

pub const BLACK: Color = Color { red: 0.0, green: 0.0, blue: 0.0, standard: PhantomData };
pub const WHITE: Color = Color { red: 1.0, green: 1.0, blue: 1.0, standard: PhantomData };

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Unit sphere with center at origin
    Sphere,
    /// Infinite plane including the xz axes
    Plane,
    /// Axis-aligned cube from -1 to 1 on every axis
    Cube,
    /// Cylinder with radius 1 around the y-axis
    Cylinder(Bounds),
    /// Double cone around the y-axis with its apex at the origin, the radius at height y is |y|
    Cone(Bounds),
    /// No geometry, the normal at a point is the point itself
    Test,
}

/// The y-range of a cylinder or cone, `closed` adds end caps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Bounds {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Bounds { minimum, maximum, closed }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Surface color, ignored when `pattern` is set
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    /// 0 is matte, 1 is a perfect mirror
    pub reflective: f64,
    /// 0 is opaque, 1 is fully transparent
    pub transparency: f64,
    /// 1.0 is vacuum
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: WHITE,
            pattern: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Constructor)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: Color,
}

/// A shape placed in the world. Every object owns its material by value,
/// two objects never share one by accident.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub shape: Shape,
    pub material: Material,
    pub transform: Transform,
}

impl Object {
    pub fn new(shape: Shape) -> Self {
        Object {
            shape,
            material: Material::default(),
            transform: Transform::identity(),
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Object { transform, ..self }
    }

    pub fn with_material(self, material: Material) -> Self {
        Object { material, ..self }
    }
}

/// Everything that is rendered: the objects and the single light illuminating them.
#[derive(Debug, Clone)]
pub struct World {
    pub objects: Vec<Object>,
    pub light: PointLight,
}
