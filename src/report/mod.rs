//! Dashboard page generation.

pub mod generator;

pub use generator::*;
