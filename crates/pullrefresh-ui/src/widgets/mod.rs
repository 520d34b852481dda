//! Ready-made presenters

pub mod normal_header;

pub use normal_header::*;
