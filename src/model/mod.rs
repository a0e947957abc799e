mod animation;
mod cube;
mod mesh;

pub use animation::*;
pub use cube::*;
pub use mesh::*;
