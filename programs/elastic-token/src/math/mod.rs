pub mod scaling;

pub use scaling::*;
