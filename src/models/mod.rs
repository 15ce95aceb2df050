pub mod common;
pub mod image;
pub mod vertex;

pub use common::*;
pub use image::*;
pub use vertex::*;
