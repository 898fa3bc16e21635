pub mod filter;
pub mod nearby;
pub mod selection;

pub use filter::*;
pub use nearby::*;
pub use selection::*;
