pub mod common;
pub mod cpu;
pub mod demos;
pub mod images;
