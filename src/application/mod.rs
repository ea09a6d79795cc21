//! Application services layer.

pub mod error;
pub mod quiz;
pub mod render;
