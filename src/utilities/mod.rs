//! Shared helpers: error types and template interpolation.

pub mod errors;
pub mod string_utils;
