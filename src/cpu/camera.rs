use imgref::ImgVec;

use crate::common::math::{Angle, Norm, Point3, Transform};
use crate::common::scene::{Color, World};
use crate::cpu::geometry::Ray;
use crate::cpu::renderer::DEFAULT_DEPTH;

/// A pinhole camera looking down its negative z axis, with the canvas one unit in front of the eye.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    hsize: u32,
    vsize: u32,
    field_of_view: Angle,
    transform: Transform,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// `transform` maps world space to camera space, usually built with [Transform::view].
    pub fn new(hsize: u32, vsize: u32, field_of_view: Angle, transform: Transform) -> Camera {
        debug_assert!(hsize > 0 && vsize > 0, "empty canvas {}x{}", hsize, vsize);

        let half_view = (field_of_view.radians / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Camera {
            hsize,
            vsize,
            field_of_view,
            transform,
            half_width,
            half_height,
            pixel_size: (half_width * 2.0) / hsize as f64,
        }
    }

    pub fn hsize(&self) -> u32 {
        self.hsize
    }

    pub fn vsize(&self) -> u32 {
        self.vsize
    }

    pub fn field_of_view(&self) -> Angle {
        self.field_of_view
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The world-space ray through the center of pixel (`x`, `y`), `y` counts down from the top row.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let x_offset = (x as f64 + 0.5) * self.pixel_size;
        let y_offset = (y as f64 + 0.5) * self.pixel_size;

        // +x is to the left when looking down -z
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let inv = self.transform.inv();
        let pixel = inv * Point3::new(world_x, world_y, -1.0);
        let origin = inv * Point3::origin();

        Ray::new(origin, (pixel - origin).normalized().into_inner())
    }

    /// Render every pixel on the current thread.
    pub fn render(&self, world: &World) -> ImgVec<Color> {
        self.render_with_depth(world, DEFAULT_DEPTH)
    }

    pub fn render_with_depth(&self, world: &World, max_depth: u32) -> ImgVec<Color> {
        let mut pixels = Vec::with_capacity(self.hsize as usize * self.vsize as usize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                pixels.push(world.color_at(self.ray_for_pixel(x, y), max_depth));
            }
        }
        ImgVec::new(pixels, self.hsize as usize, self.vsize as usize)
    }
}
