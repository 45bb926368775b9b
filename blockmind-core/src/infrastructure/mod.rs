pub mod memory;
pub mod model;
