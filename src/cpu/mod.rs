pub use camera::Camera;
pub use driver::{CpuRenderer, RenderSettings};
pub use geometry::Ray;
pub use intersection::{Computations, Intersection, Intersections};
pub use renderer::DEFAULT_DEPTH;

pub mod camera;
pub mod driver;
pub mod geometry;
pub mod intersection;
pub mod lighting;
pub mod renderer;
