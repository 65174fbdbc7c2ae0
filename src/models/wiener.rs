//! Damped Wiener process model
//!
//! Exact interval solution of a damped velocity-like process driven by a
//! constant control input and isotropic Gaussian noise. The stochastic
//! counterpart of the occlusion model under the same stationary-process
//! contract: its noise sample is a real N-dimensional standard-normal draw.

use nalgebra::RealField;
use num_traits::Float;

use super::stationary::{Conditioning, StationaryProcess};
use crate::types::spaces::{ControlVector, NoiseVector, StateVector};

/// Damped Wiener process with constant forcing.
///
/// Dynamics over the interval:
/// dv = (-lambda * v + a) dt + sigma dW
///
/// where:
/// - `lambda` is the damping rate (0 recovers pure Brownian drift)
/// - `a` is the control input, held constant over the interval
/// - `sigma` is the noise intensity per axis
///
/// The solution over an interval `dt` is Gaussian with mean
/// `e^{-lambda dt} v + a (1 - e^{-lambda dt})/lambda` and per-axis standard
/// deviation `sigma sqrt((1 - e^{-2 lambda dt})/(2 lambda))`; [`map`] applies
/// exactly that affine transform to the caller's standard-normal sample. The
/// model never draws samples itself.
///
/// [`map`]: StationaryProcess::map
#[derive(Debug, Clone)]
pub struct DampedWienerProcess<T: RealField, const N: usize> {
    /// Damping rate (1/s)
    damping: T,
    /// Noise intensity per axis
    noise_intensity: T,
}

impl<T: RealField + Float + Copy, const N: usize> DampedWienerProcess<T, N> {
    /// Creates a damped Wiener process model.
    ///
    /// # Arguments
    /// - `damping`: damping rate (must be >= 0)
    /// - `noise_intensity`: per-axis noise standard deviation rate (must be >= 0)
    ///
    /// # Panics
    /// Panics if `damping < 0` or `noise_intensity < 0`.
    pub fn new(damping: T, noise_intensity: T) -> Self {
        assert!(damping >= T::zero(), "Damping rate must be non-negative");
        assert!(
            noise_intensity >= T::zero(),
            "Noise intensity must be non-negative"
        );
        Self {
            damping,
            noise_intensity,
        }
    }

    /// Mean of the predicted state after `delta_time`.
    pub fn mean(
        &self,
        state: &StateVector<T, N>,
        control: &ControlVector<T, N>,
        delta_time: T,
    ) -> StateVector<T, N> {
        let decay = Float::exp(-self.damping * delta_time);
        let eps = T::from_f64(1e-9).unwrap();

        // (1 - e^{-lambda dt})/lambda, with its lambda -> 0 limit dt
        let gain = if self.damping < eps {
            delta_time
        } else {
            (T::one() - decay) / self.damping
        };

        StateVector::from_svector(state.as_svector() * decay + control.as_svector() * gain)
    }

    /// Per-axis standard deviation of the predicted state after `delta_time`.
    pub fn noise_std(&self, delta_time: T) -> T {
        let eps = T::from_f64(1e-9).unwrap();
        if self.damping < eps {
            // lambda -> 0 limit: plain Brownian growth
            self.noise_intensity * Float::sqrt(delta_time)
        } else {
            let two = T::from_f64(2.0).unwrap();
            let two_lambda = two * self.damping;
            let variance_factor =
                (T::one() - Float::exp(-two_lambda * delta_time)) / two_lambda;
            self.noise_intensity * Float::sqrt(variance_factor)
        }
    }
}

impl<T: RealField + Float + Copy, const N: usize> StationaryProcess<T, N, N>
    for DampedWienerProcess<T, N>
{
    type Noise = NoiseVector<T, N>;
    const NOISE_DIM: usize = N;

    fn map(
        &self,
        conditioning: &Conditioning<T, N, N>,
        noise: &NoiseVector<T, N>,
    ) -> StateVector<T, N> {
        match conditioning.delta_time {
            None => conditioning.state,
            Some(delta_time) => {
                let mean = self.mean(&conditioning.state, &conditioning.control, delta_time);
                let spread = noise.as_svector() * self.noise_std(delta_time);
                StateVector::from_svector(mean.into_svector() + spread)
            }
        }
    }
}
