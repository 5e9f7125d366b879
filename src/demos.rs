use std::f64::consts::PI;

use crate::common::error::TraceError;
use crate::common::math::{Angle, Point3, Transform, Vec3};
use crate::common::pattern::Pattern;
use crate::common::scene::{BLACK, Bounds, Color, Material, Object, PointLight, Shape, WHITE, World};
use crate::cpu::camera::Camera;

pub const VACUUM_IOR: f64 = 1.0;
pub const GLASS_IOR: f64 = 1.5;
pub const DIAMOND_IOR: f64 = 2.417;

pub fn color_by_name(name: &str) -> Color {
    palette::Srgb::<f64>::from_format(palette::named::from_str(name).expect("Invalid color name"))
        .into_linear()
}

pub fn color_gray(v: f64) -> Color {
    Color::new(v, v, v)
}

pub fn material_matte(color: Color) -> Material {
    Material {
        color,
        specular: 0.1,
        ..Material::default()
    }
}

pub fn material_patterned(pattern: Pattern) -> Material {
    Material {
        pattern: Some(pattern),
        specular: 0.1,
        ..Material::default()
    }
}

pub fn material_mirror(color: Color, reflective: f64) -> Material {
    assert!((0.0..=1.0).contains(&reflective));
    Material {
        color,
        reflective,
        specular: 1.0,
        shininess: 300.0,
        ..Material::default()
    }
}

pub fn material_glass(refractive_index: f64) -> Material {
    Material {
        color: BLACK,
        ambient: 0.0,
        diffuse: 0.1,
        specular: 1.0,
        shininess: 300.0,
        reflective: 0.9,
        transparency: 0.9,
        refractive_index,
        ..Material::default()
    }
}

/// A unit sphere that only refracts, with the refractive index of glass.
pub fn glass_sphere() -> Object {
    Object::new(Shape::Sphere).with_material(Material {
        transparency: 1.0,
        refractive_index: GLASS_IOR,
        ..Material::default()
    })
}

/// Two concentric spheres lit from the upper left, the scene most rendering checks are written against.
pub fn default_world() -> World {
    let outer = Object::new(Shape::Sphere).with_material(Material {
        color: Color::new(0.8, 1.0, 0.6),
        diffuse: 0.7,
        specular: 0.2,
        ..Material::default()
    });
    let inner = Object::new(Shape::Sphere).with_transform(Transform::uniform_scaling(0.5));

    World {
        objects: vec![outer, inner],
        light: PointLight::new(Point3::new(-10.0, 10.0, -10.0), WHITE),
    }
}

/// Looking at the origin from 5 units in front of it, with a 90 degree field of view.
pub fn default_camera(width: u32, height: u32) -> Result<Camera, TraceError> {
    let view = Transform::view(Point3::new(0.0, 0.0, -5.0), Point3::origin(), Vec3::new(0.0, 1.0, 0.0))?;
    Ok(Camera::new(width, height, Angle::radians(PI / 2.0), view))
}

/// A room with every shape and pattern kind, including mirrors and nested glass.
pub fn showcase_world() -> Result<World, TraceError> {
    let mut objects = vec![];

    // floor and walls
    let floor_pattern = Pattern::checkers(color_gray(0.35), color_gray(0.65))
        .with_transform(Transform::rotation_y(Angle::degrees(30.0)));
    objects.push(Object::new(Shape::Plane).with_material(Material {
        reflective: 0.2,
        ..material_patterned(floor_pattern)
    }));

    let wall_pattern = Pattern::ring(
        Pattern::stripe(color_by_name("steelblue"), color_by_name("lightsteelblue"))
            .with_transform(Transform::uniform_scaling(0.25)),
        color_gray(0.8),
    ).with_transform(Transform::uniform_scaling(2.0));
    objects.push(Object::new(Shape::Plane)
        .with_material(material_patterned(wall_pattern))
        .with_transform(Transform::translation(Vec3::new(0.0, 0.0, 8.0)) * Transform::rotation_x(Angle::degrees(90.0))));

    let side_pattern = Pattern::blended(vec![
        Pattern::stripe(WHITE, color_by_name("darkseagreen")),
        Pattern::stripe(WHITE, color_by_name("darkseagreen")).with_transform(Transform::rotation_y(Angle::degrees(90.0))),
    ]);
    objects.push(Object::new(Shape::Plane)
        .with_material(material_patterned(side_pattern))
        .with_transform(Transform::translation(Vec3::new(-7.0, 0.0, 0.0)) * Transform::rotation_z(Angle::degrees(90.0))));

    // glass sphere with an air bubble
    objects.push(Object::new(Shape::Sphere)
        .with_material(material_glass(GLASS_IOR))
        .with_transform(Transform::translation(Vec3::new(0.0, 1.0, 0.5))));
    objects.push(Object::new(Shape::Sphere)
        .with_material(material_glass(VACUUM_IOR))
        .with_transform(Transform::translation(Vec3::new(0.0, 1.0, 0.5)) * Transform::uniform_scaling(0.5)));

    // mirror cube
    objects.push(Object::new(Shape::Cube)
        .with_material(material_mirror(color_gray(0.1), 0.8))
        .with_transform(
            Transform::translation(Vec3::new(2.6, 0.75, 2.5))
                * Transform::rotation_y(Angle::degrees(35.0))
                * Transform::uniform_scaling(0.75)
        ));

    // banded capped cylinder with a spotted sphere on top
    objects.push(Object::new(Shape::Cylinder(Bounds::new(0.0, 1.0, true)))
        .with_material(material_patterned(
            Pattern::stripe(color_by_name("firebrick"), color_by_name("gold"))
                .with_transform(Transform::rotation_z(Angle::degrees(90.0)) * Transform::uniform_scaling(0.1))
        ))
        .with_transform(Transform::translation(Vec3::new(-2.5, 0.0, 1.5)) * Transform::scaling(Vec3::new(0.8, 1.2, 0.8))));
    objects.push(Object::new(Shape::Sphere)
        .with_material(material_patterned(
            Pattern::spotted(color_by_name("orange"), color_by_name("ivory"))
                .with_transform(Transform::uniform_scaling(0.2))
        ))
        .with_transform(Transform::translation(Vec3::new(-2.5, 1.8, 1.5)) * Transform::uniform_scaling(0.6)));

    // open cone with a gradient
    objects.push(Object::new(Shape::Cone(Bounds::new(-1.0, 0.0, false)))
        .with_material(material_patterned(
            Pattern::gradient(color_by_name("mediumpurple"), color_by_name("lightpink"))
                .with_transform(Transform::translation(Vec3::new(-1.0, 0.0, 0.0)) * Transform::uniform_scaling(2.0))
        ))
        .with_transform(Transform::translation(Vec3::new(1.4, 1.0, -1.2)) * Transform::uniform_scaling(0.6)));

    // sheared cube with random tiles
    let tiles = Pattern::random(vec![
        color_by_name("teal").into(),
        color_by_name("coral").into(),
        color_by_name("khaki").into(),
    ], 7).with_transform(Transform::uniform_scaling(0.25));
    let shear = Transform::shearing(0.3, 0.0, 0.0, 0.0, 0.2, 0.0)?;
    objects.push(Object::new(Shape::Cube)
        .with_material(material_patterned(tiles))
        .with_transform(Transform::translation(Vec3::new(-1.0, 0.4, -1.8)) * shear * Transform::uniform_scaling(0.4)));

    // small diamond on a radial-gradient disk
    objects.push(Object::new(Shape::Cylinder(Bounds::new(0.0, 0.05, true)))
        .with_material(material_patterned(
            Pattern::radial_gradient(color_by_name("white"), color_by_name("slategray"))
        ))
        .with_transform(Transform::translation(Vec3::new(0.6, 0.0, -2.4)) * Transform::uniform_scaling(0.5)));
    objects.push(Object::new(Shape::Sphere)
        .with_material(material_glass(DIAMOND_IOR))
        .with_transform(Transform::translation(Vec3::new(0.6, 0.3, -2.4)) * Transform::uniform_scaling(0.25)));

    objects.push(Object::new(Shape::Sphere)
        .with_material(material_matte(color_by_name("cornflowerblue")))
        .with_transform(Transform::translation(Vec3::new(3.2, 0.35, -0.8)) * Transform::uniform_scaling(0.35)));

    Ok(World {
        objects,
        light: PointLight::new(Point3::new(-4.0, 7.0, -6.0), color_gray(1.0)),
    })
}

pub fn showcase_camera(width: u32, height: u32) -> Result<Camera, TraceError> {
    let view = Transform::view(Point3::new(1.0, 2.5, -6.5), Point3::new(0.0, 0.9, 0.5), Vec3::new(0.0, 1.0, 0.0))?;
    Ok(Camera::new(width, height, Angle::degrees(60.0), view))
}
