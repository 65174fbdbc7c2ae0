//! Example usage of the procmod library
//!
//! Walks one tracked pixel through an occlusion scenario: bootstrapped with
//! no timestamp, then propagated across irregular sensor intervals.

use procmod::prelude::*;

fn main() {
    println!("Procmod: Stationary Process Models for Object Tracking");
    println!("======================================================\n");

    let model = OcclusionProcessModel::new(
        0.1, // p(occluded now | visible 1s ago)
        0.9, // p(occluded now | occluded 1s ago)
    );

    println!(
        "Calibration: p_ov = {:.2}, p_oo = {:.2}, stationary occlusion = {:.3}\n",
        model.p_occluded_visible(),
        model.p_occluded_occluded(),
        model.stationary_occlusion()
    );

    // First observation: no previous timestamp yet, so the prior passes
    // through unchanged.
    let prior = 0.05;
    let bootstrap = model.conditional(
        None,
        StateVector::from_array([prior]),
        ControlVector::zeros(),
    );
    let mut p = *model.predict(&bootstrap).index(0);
    println!("bootstrap (no elapsed time): p = {:.4}", p);

    // Irregular sensor intervals, e.g. dropped frames in a range camera.
    let intervals = [0.033, 0.033, 0.5, 0.033, 2.0, 10.0];
    let mut t = 0.0;
    for &dt in &intervals {
        t += dt;
        p = model.propagate(p, dt);
        println!("t = {:7.3}s  (dt = {:5.3}s): p = {:.4}", t, dt, p);
    }

    println!(
        "\nAfter a long gap the prediction approaches the stationary value:"
    );
    println!(
        "propagate(p, 1000) = {:.6} vs stationary {:.6}",
        model.propagate(p, 1000.0),
        model.stationary_occlusion()
    );
}
