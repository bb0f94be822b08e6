pub mod ids;
pub mod water;
