//! # Pointscape Algorithms
//!
//! Pure transforms over point sets: the category/size/color filter and the
//! positional clustering transform. Neither can fail; both return new sets
//! and leave their input untouched.

pub mod filtering;
pub mod clustering;

// Re-export commonly used items
pub use filtering::*;
pub use clustering::*;
