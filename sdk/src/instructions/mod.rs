/// Instruction builders for a token launch
pub mod launch;

pub use launch::*;
