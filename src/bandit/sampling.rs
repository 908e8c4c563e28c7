//! Random variate generation for posterior sampling.
//!
//! Every function takes its randomness source explicitly, so a seeded or
//! constant generator can be substituted without touching the algorithms.
//!
//! - [`standard_normal`]: Box-Muller transform.
//! - [`gamma`]: Marsaglia-Tsang squeeze for `shape >= 1`; smaller shapes are
//!   boosted via `Gamma(a) = Gamma(a + 1) * U^(1/a)`.
//! - [`dirichlet`]: independent unit-scale Gammas normalized onto the simplex.

use std::f64::consts::TAU;

use rand::Rng;

/// Uniform draw on `(0, 1]`, safe to take the logarithm or a root of.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}

/// One standard normal variate (mean 0, variance 1).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = open_unit(rng);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// One draw from `Gamma(shape, scale = 1)`. `shape` must be positive.
pub fn gamma<R: Rng + ?Sized>(shape: f64, rng: &mut R) -> f64 {
    debug_assert!(shape > 0.0, "gamma shape must be positive, got {shape}");

    if shape < 1.0 {
        let u = open_unit(rng);
        return gamma(shape + 1.0, rng) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let x = standard_normal(rng);
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = rng.random::<f64>();
        let x2 = x * x;

        // Squeeze: cheap acceptance for the bulk of draws.
        if u < 1.0 - 0.0331 * x2 * x2 {
            return d * v;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

/// One probability vector from `Dirichlet(alphas)`. All alphas must be
/// positive; the result has the same length and sums to one.
pub fn dirichlet<R: Rng + ?Sized>(alphas: &[f64], rng: &mut R) -> Vec<f64> {
    let mut draws: Vec<f64> = alphas.iter().map(|&a| gamma(a, rng)).collect();
    let total: f64 = draws.iter().sum();
    for draw in &mut draws {
        *draw /= total;
    }
    draws
}

/// Dirichlet draw parameterized directly by integer counts.
pub fn dirichlet_from_counts<R: Rng + ?Sized>(counts: &[u64], rng: &mut R) -> Vec<f64> {
    let alphas: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    dirichlet(&alphas, rng)
}
