//! Core types for type-safe vector spaces

pub mod spaces;
