pub mod photos;
pub mod position;

pub use photos::*;
pub use position::*;
