pub mod error;
pub mod logging;
pub mod math;
pub mod matrix;
pub mod pattern;
pub mod progress;
pub mod scene;

#[cfg(test)]
pub mod testing;
