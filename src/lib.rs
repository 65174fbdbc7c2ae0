//! Procmod: Stationary Process Models for Bayesian Object Tracking
//!
//! Building blocks for the prediction step of recursive Bayesian state
//! estimators (particle filters) that track rigid objects with a range
//! sensor.
//!
//! # Features
//!
//! - **Exact Propagation**: closed-form continuous-time solutions, no
//!   Euler-style time discretization
//! - **Type Safety**: state, control, and noise spaces encoded in the type
//!   system; dimension mismatches caught at compile time
//! - **no_std Support**: works in embedded environments
//!
//! The centrepiece is [`models::OcclusionProcessModel`], which propagates the
//! probability that an observation source (a pixel or a tracked 3-D surface
//! point) is hidden from the sensor, under a two-state continuous-time Markov
//! chain. [`models::DampedWienerProcess`] is its noise-driven sibling for
//! velocity-like states.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod models;
pub mod types;

pub mod prelude {
    pub use crate::models::*;
    pub use crate::types::spaces::*;
}
