pub mod math_safe;
pub mod seeds;

pub use math_safe::*;
pub use seeds::*;
