//! Process models for the prediction step of a Bayesian tracker
//!
//! This module defines the stationary-process contract shared by all models
//! and its concrete implementations.

pub mod occlusion;
pub mod stationary;
pub mod wiener;

pub use occlusion::*;
pub use stationary::*;
pub use wiener::*;
