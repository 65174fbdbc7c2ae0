//! Occlusion process model
//!
//! Propagates the probability that an observation source (a pixel or a
//! tracked 3-D surface point) is occluded, under a two-state
//! {visible, occluded} continuous-time Markov chain. The propagation is the
//! exact solution obtained by diagonalizing the chain's infinitesimal
//! generator, not a time-discretized approximation.

use nalgebra::RealField;
use num_traits::Float;

use super::stationary::{Conditioning, NoNoise, StationaryProcess};
use crate::types::spaces::StateVector;

/// Exact occlusion-probability propagation for one observation source.
///
/// The chain is calibrated by its one-time-unit transition probabilities:
/// the probability the source is occluded now given it was visible one
/// second ago, and given it was occluded one second ago. The generator's
/// non-zero eigenvalue is `ln c` with
/// `c = p_occluded_occluded - p_occluded_visible`, which gives the closed
/// form
///
/// ```text
/// p(t + dt) = 1 - [c^dt (1 - p(t)) + (1 - p_occluded_occluded) (c^dt - 1)/(c - 1)]
/// ```
///
/// The model is deterministic: given the previous probability and the
/// elapsed time there is no innovation term, so its noise sample type is
/// [`NoNoise`]. One instance is typically owned per tracked source and
/// reused for its whole lifetime.
///
/// # Examples
///
/// ```
/// use procmod::models::OcclusionProcessModel;
///
/// let model = OcclusionProcessModel::<f64>::new(0.1, 0.9);
/// // One time unit from fully visible lands on the calibration probability.
/// assert!((model.propagate(0.0, 1.0) - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct OcclusionProcessModel<T: RealField> {
    p_occluded_visible: T,
    p_occluded_occluded: T,
    // non-unit eigenvalue of the one-step transition, and its cached log
    c: T,
    log_c: T,
}

impl<T: RealField + Float + Copy> OcclusionProcessModel<T> {
    /// Creates an occlusion process model from its calibration parameters.
    ///
    /// # Arguments
    /// - `p_occluded_visible`: probability the source is occluded now given
    ///   it was visible one time unit ago (must be in (0, 1))
    /// - `p_occluded_occluded`: probability the source is occluded now given
    ///   it was occluded one time unit ago (must be in (0, 1))
    ///
    /// The difference `c = p_occluded_occluded - p_occluded_visible` must be
    /// positive for a mixing, non-oscillating chain.
    ///
    /// # Panics
    /// Panics if either probability lies outside (0, 1) or if
    /// `p_occluded_occluded <= p_occluded_visible`.
    pub fn new(p_occluded_visible: T, p_occluded_occluded: T) -> Self {
        assert!(
            p_occluded_visible > T::zero() && p_occluded_visible < T::one(),
            "p_occluded_visible must be in (0, 1)"
        );
        assert!(
            p_occluded_occluded > T::zero() && p_occluded_occluded < T::one(),
            "p_occluded_occluded must be in (0, 1)"
        );
        let c = p_occluded_occluded - p_occluded_visible;
        assert!(
            c > T::zero(),
            "p_occluded_occluded must exceed p_occluded_visible"
        );
        Self {
            p_occluded_visible,
            p_occluded_occluded,
            c,
            log_c: Float::ln(c),
        }
    }

    /// Returns the calibration probability p(occluded now | visible 1s ago).
    #[inline]
    pub fn p_occluded_visible(&self) -> T {
        self.p_occluded_visible
    }

    /// Returns the calibration probability p(occluded now | occluded 1s ago).
    #[inline]
    pub fn p_occluded_occluded(&self) -> T {
        self.p_occluded_occluded
    }

    /// Propagates an occlusion probability forward by `delta_time` seconds.
    ///
    /// Convenience entry point for stateless callers; equivalent to
    /// [`conditional`](StationaryProcess::conditional) followed by a
    /// deterministic prediction. Inputs outside `p ∈ [0, 1]`, `delta_time >=
    /// 0` are not rejected; they produce mathematically defined but
    /// physically meaningless output.
    #[inline]
    pub fn propagate(&self, occlusion_probability: T, delta_time: T) -> T {
        self.propagate_scalar(occlusion_probability, delta_time)
    }

    /// Returns the chain's stationary occlusion probability, the limit of
    /// [`propagate`](Self::propagate) as `delta_time` grows without bound.
    #[inline]
    pub fn stationary_occlusion(&self) -> T {
        T::one() - (T::one() - self.p_occluded_occluded) / (T::one() - self.c)
    }

    fn propagate_scalar(&self, p: T, delta_time: T) -> T {
        let one = T::one();
        let pow_c_dt = Float::exp(delta_time * self.log_c);
        one - (pow_c_dt * (one - p)
            + (one - self.p_occluded_occluded) * self.geometric_factor(pow_c_dt, delta_time))
    }

    /// Computes `(c^dt - 1)/(c - 1)`.
    ///
    /// Near `c = 1` the quotient degenerates to 0/0, so below a threshold it
    /// switches to the first-order expansion around `c = 1`,
    /// `dt (1 + (dt - 1)(c - 1)/2)`, whose limit `dt` is the linear-in-time
    /// growth of a chain with coinciding transition probabilities.
    fn geometric_factor(&self, pow_c_dt: T, delta_time: T) -> T {
        let one = T::one();
        let c_minus_one = self.c - one;
        let threshold = T::from_f64(1e-6).unwrap();

        if num_traits::Float::abs(c_minus_one) < threshold {
            let half = T::from_f64(0.5).unwrap();
            delta_time * (one + half * (delta_time - one) * c_minus_one)
        } else {
            (pow_c_dt - one) / c_minus_one
        }
    }
}

impl<T: RealField + Float + Copy> StationaryProcess<T, 1, 0> for OcclusionProcessModel<T> {
    type Noise = NoNoise;
    const NOISE_DIM: usize = 0;

    fn map(&self, conditioning: &Conditioning<T, 1, 0>, _noise: &NoNoise) -> StateVector<T, 1> {
        match conditioning.delta_time {
            // bootstrap: no previous timestamp yet
            None => conditioning.state,
            Some(delta_time) => {
                let p = *conditioning.state.index(0);
                StateVector::from_array([self.propagate_scalar(p, delta_time)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stationary::DeterministicProcess;
    use crate::types::spaces::ControlVector;

    fn reference_model() -> OcclusionProcessModel<f64> {
        // c = 0.8, log_c ≈ -0.2231
        OcclusionProcessModel::new(0.1, 0.9)
    }

    #[test]
    fn test_zero_interval_is_identity() {
        let model = reference_model();
        for &p in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!((model.propagate(p, 0.0) - p).abs() < 1e-12);
        }
    }

    #[test]
    fn test_repeated_zero_interval_is_idempotent() {
        let model = reference_model();
        let mut p = 0.37;
        for _ in 0..100 {
            p = model.propagate(p, 0.0);
        }
        assert!((p - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_one_step_matches_calibration() {
        let model = reference_model();
        // From fully visible, one time unit lands on p_occluded_visible;
        // from fully occluded, on p_occluded_occluded.
        assert!((model.propagate(0.0, 1.0) - 0.1).abs() < 1e-12);
        assert!((model.propagate(1.0, 1.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_worked_scenario_fixed_point() {
        // p = 0.5 is the stationary probability of the (0.1, 0.9) chain, so
        // one step leaves it in place.
        let model = reference_model();
        assert!((model.propagate(0.5, 1.0) - 0.5).abs() < 1e-12);
        assert!((model.stationary_occlusion() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_convergence_to_stationary() {
        let model = reference_model();
        let stationary = model.stationary_occlusion();
        for &p in &[0.0, 0.2, 0.9, 1.0] {
            assert!((model.propagate(p, 1000.0) - stationary).abs() < 1e-10);
        }
    }

    #[test]
    fn test_asymmetric_stationary_probability() {
        // An occlusion-prone chain settles above 0.5.
        let model = OcclusionProcessModel::new(0.3, 0.8);
        // pi = p_ov / (1 - c) = 0.3 / 0.5
        assert!((model.stationary_occlusion() - 0.6).abs() < 1e-12);
        assert!((model.propagate(0.0, 1000.0) - 0.6).abs() < 1e-10);
    }

    #[test]
    fn test_boundaries_mix_strictly_inward() {
        let model = reference_model();
        for &dt in &[1e-3, 0.1, 1.0, 10.0] {
            let from_visible = model.propagate(0.0, dt);
            let from_occluded = model.propagate(1.0, dt);
            assert!(from_visible > 0.0 && from_visible < 1.0);
            assert!(from_occluded > 0.0 && from_occluded < 1.0);
        }
    }

    #[test]
    fn test_continuity_in_time_and_probability() {
        let model = reference_model();
        let eps = 1e-9;

        let base = model.propagate(0.3, 2.0);
        assert!((model.propagate(0.3, 2.0 + eps) - base).abs() < 1e-6);
        assert!((model.propagate(0.3 + eps, 2.0) - base).abs() < 1e-6);
    }

    #[test]
    fn test_monotone_approach_to_stationary() {
        let model = reference_model();
        let stationary = model.stationary_occlusion();

        let mut previous_gap = (0.0f64 - stationary).abs();
        for i in 1..=20 {
            let gap = (model.propagate(0.0, i as f64) - stationary).abs();
            assert!(gap < previous_gap);
            previous_gap = gap;
        }
    }

    #[test]
    fn test_near_degenerate_chain_stays_stable() {
        // c = 0.999_999_9 is inside the series branch; the absorbing-chain
        // limit keeps the probability essentially in place because
        // 1 - p_occluded_occluded is itself tiny.
        let model = OcclusionProcessModel::new(1e-7, 1.0 - 1e-7 + 1e-7 * 1e-7);
        let predicted = model.propagate(0.4, 5.0);
        assert!(predicted.is_finite());
        assert!((predicted - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_series_branch_agrees_with_quotient() {
        // Two chains straddling the 1e-6 threshold on |c - 1| must produce
        // nearly identical predictions.
        let quotient = OcclusionProcessModel::new(1e-5, 1.0 - 2e-5);
        let series = OcclusionProcessModel::new(1e-7, 1.0 - 2e-7);
        for &dt in &[0.5, 1.0, 3.0] {
            let a = quotient.propagate(0.25, dt);
            let b = series.propagate(0.25, dt);
            assert!((a - b).abs() < 1e-4, "dt {}: {} vs {}", dt, a, b);
        }
    }

    #[test]
    fn test_unset_delta_time_bootstraps() {
        let model = reference_model();
        let cond = model.conditional(
            None,
            StateVector::from_array([0.73]),
            ControlVector::zeros(),
        );
        assert!((model.predict(&cond).index(0) - 0.73).abs() < 1e-15);

        // Independent of calibration.
        let other = OcclusionProcessModel::new(0.01, 0.02);
        assert!((other.predict(&cond).index(0) - 0.73).abs() < 1e-15);
    }

    #[test]
    fn test_trait_prediction_matches_propagate() {
        let model = reference_model();
        let cond = model.conditional(
            Some(2.5),
            StateVector::from_array([0.2]),
            ControlVector::zeros(),
        );
        let via_trait = *model.predict(&cond).index(0);
        assert!((via_trait - model.propagate(0.2, 2.5)).abs() < 1e-15);
    }

    #[test]
    fn test_dimensionalities() {
        let model = reference_model();
        assert_eq!(model.state_dim(), 1);
        assert_eq!(model.control_dim(), 0);
        assert_eq!(model.noise_dim(), 0);
    }

    #[test]
    #[should_panic(expected = "p_occluded_occluded must exceed")]
    fn test_rejects_non_mixing_calibration() {
        let _ = OcclusionProcessModel::new(0.9, 0.1);
    }

    #[test]
    #[should_panic(expected = "must be in (0, 1)")]
    fn test_rejects_degenerate_probability() {
        let _ = OcclusionProcessModel::new(0.0, 0.9);
    }
}
