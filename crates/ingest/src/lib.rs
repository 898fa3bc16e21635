pub mod city_file;
pub mod normalize;

pub use city_file::*;
pub use normalize::*;
