//! Terminal output helpers for the binary

pub mod json;
