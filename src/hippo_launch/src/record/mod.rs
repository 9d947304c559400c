//! Launch graph records

pub mod generator;
pub mod types;

pub use generator::CommandGenerator;
pub use types::*;
