//! The stationary process contract
//!
//! A stationary process model predicts a state forward in time; its
//! transition law depends only on the elapsed interval, never on absolute
//! time. The hosting estimator treats heterogeneous models uniformly through
//! the [`StationaryProcess`] trait: build a [`Conditioning`] context from the
//! previous state, then map a noise sample to a predicted state.

use nalgebra::{RealField, Scalar};

use crate::types::spaces::{ControlVector, StateVector};

// ============================================================================
// Conditioning Context
// ============================================================================

/// The immutable conditioning context of a prediction.
///
/// Bundles everything a prediction is conditioned on: the previous state, the
/// control input held over the interval, and the elapsed time. Built by
/// [`StationaryProcess::conditional`] and consumed by
/// [`StationaryProcess::map`], so models never carry mutable call-to-call
/// state and stay freely shareable across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditioning<T: Scalar, const N: usize, const C: usize> {
    /// Elapsed time since `state` was observed, in seconds. `None` means no
    /// previous timestamp exists yet (the bootstrap path): predictions pass
    /// the conditioned state through unchanged.
    pub delta_time: Option<T>,
    /// The state being conditioned on (the "previous" value).
    pub state: StateVector<T, N>,
    /// Control input applied over the interval.
    pub control: ControlVector<T, C>,
}

impl<T: Scalar, const N: usize, const C: usize> Conditioning<T, N, C> {
    /// Creates a conditioning context.
    #[inline]
    pub fn new(
        delta_time: Option<T>,
        state: StateVector<T, N>,
        control: ControlVector<T, C>,
    ) -> Self {
        Self {
            delta_time,
            state,
            control,
        }
    }
}

impl<T: Scalar + Copy, const N: usize, const C: usize> Copy for Conditioning<T, N, C> {}

// ============================================================================
// Noise Samples
// ============================================================================

/// Zero-dimensional noise sample for deterministic process models.
///
/// A model whose `Noise` type is `NoNoise` is a deterministic function of its
/// conditioning context: there is no innovation term to sample, and no empty
/// buffer to allocate or iterate per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoNoise;

// ============================================================================
// Stationary Process Trait
// ============================================================================

/// Trait for stationary process models.
///
/// Describes state evolution over an interval `Δt` in the form:
/// x_{t+Δt} = f(x_t, u, Δt, w)
///
/// where:
/// - `x_t` is the previous state (dimension `N`)
/// - `u` is a control input held constant over the interval (dimension `C`;
///   zero for autonomous models)
/// - `w` is a noise sample drawn by the caller ([`NoNoise`] for deterministic
///   models)
///
/// Implementations solve the underlying continuous-time process exactly over
/// the interval; none of them discretize time.
pub trait StationaryProcess<T: RealField + Copy, const N: usize, const C: usize> {
    /// Noise sample consumed by [`map`](Self::map). [`NoNoise`] marks a
    /// deterministic model.
    type Noise;

    /// Dimensionality of the noise sample.
    const NOISE_DIM: usize;

    /// Maps a noise sample to a predicted state under the given conditioning.
    fn map(&self, conditioning: &Conditioning<T, N, C>, noise: &Self::Noise) -> StateVector<T, N>;

    /// Builds the conditioning context for a subsequent prediction.
    ///
    /// `delta_time` is the elapsed time since `state` was observed; `None`
    /// marks the bootstrap case where no previous timestamp exists.
    #[inline]
    fn conditional(
        &self,
        delta_time: Option<T>,
        state: StateVector<T, N>,
        control: ControlVector<T, C>,
    ) -> Conditioning<T, N, C> {
        Conditioning::new(delta_time, state, control)
    }

    /// State dimensionality; estimators use this to size generic buffers.
    #[inline]
    fn state_dim(&self) -> usize {
        N
    }

    /// Control input dimensionality.
    #[inline]
    fn control_dim(&self) -> usize {
        C
    }

    /// Noise sample dimensionality.
    #[inline]
    fn noise_dim(&self) -> usize {
        Self::NOISE_DIM
    }
}

// ============================================================================
// Deterministic Extension
// ============================================================================

/// Extension trait for deterministic process models.
///
/// Blanket-implemented for every [`StationaryProcess`] whose noise type is
/// [`NoNoise`], so callers can predict without conjuring a sample.
pub trait DeterministicProcess<T: RealField + Copy, const N: usize, const C: usize>:
    StationaryProcess<T, N, C, Noise = NoNoise>
{
    /// Predicts the state for the given conditioning.
    #[inline]
    fn predict(&self, conditioning: &Conditioning<T, N, C>) -> StateVector<T, N> {
        self.map(conditioning, &NoNoise)
    }
}

impl<T, const N: usize, const C: usize, M> DeterministicProcess<T, N, C> for M
where
    T: RealField + Copy,
    M: StationaryProcess<T, N, C, Noise = NoNoise>,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    // A process that moves the state toward zero by dt, for exercising the
    // trait surface without any model-specific math.
    struct Shrink;

    impl StationaryProcess<f64, 2, 0> for Shrink {
        type Noise = NoNoise;
        const NOISE_DIM: usize = 0;

        fn map(&self, conditioning: &Conditioning<f64, 2, 0>, _: &NoNoise) -> StateVector<f64, 2> {
            match conditioning.delta_time {
                None => conditioning.state,
                Some(dt) => conditioning.state.scale(1.0 / (1.0 + dt)),
            }
        }
    }

    #[test]
    fn test_conditional_records_inputs() {
        let model = Shrink;
        let cond = model.conditional(
            Some(0.5),
            StateVector::from_array([1.0, 2.0]),
            ControlVector::zeros(),
        );

        assert_eq!(cond.delta_time, Some(0.5));
        assert!((cond.state.index(1) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_dimensionality_accessors() {
        let model = Shrink;
        assert_eq!(model.state_dim(), 2);
        assert_eq!(model.control_dim(), 0);
        assert_eq!(model.noise_dim(), 0);
    }

    #[test]
    fn test_predict_equals_map_with_no_noise() {
        let model = Shrink;
        let cond = model.conditional(
            Some(1.0),
            StateVector::from_array([4.0, 8.0]),
            ControlVector::zeros(),
        );

        let from_map = model.map(&cond, &NoNoise);
        let from_predict = model.predict(&cond);
        assert_eq!(from_map, from_predict);
        assert!((from_predict.index(0) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_bootstrap_passes_state_through() {
        let model = Shrink;
        let cond = model.conditional(
            None,
            StateVector::from_array([3.0, -1.0]),
            ControlVector::zeros(),
        );

        let predicted = model.predict(&cond);
        assert_eq!(predicted, cond.state);
    }
}
