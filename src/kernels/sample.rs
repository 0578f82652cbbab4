//!
//! Numeric support for stochastic error models: error-function evaluation
//! and truncated-Gaussian sampling.
//!
//! Lattice-assembly code that wants randomized error amplitudes (e.g. a
//! misalignment drawn from a Gaussian clipped at a few sigma) draws them
//! here, over any [`rand_core::RngCore`]. Tracking itself never samples;
//! node parameters are fixed at construction.

use rand_core::RngCore;

/// Error function, evaluated with the Abramowitz–Stegun 7.1.26 rational
/// approximation (absolute error below 1.5e-7, adequate for sampling).
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF in terms of [`erf`].
#[inline]
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Solves the inverse CDF of a standard normal truncated at `±cutoff` by
/// bisection: returns the `x` in `[-cutoff, cutoff]` whose truncated CDF
/// equals `u`. `u` outside `(0, 1)` clamps to the respective cutoff.
pub fn root_normal(u: f64, cutoff: f64) -> f64 {
    let cutoff = cutoff.abs();
    if u <= 0.0 {
        return -cutoff;
    }
    if u >= 1.0 {
        return cutoff;
    }

    let lo_cdf = normal_cdf(-cutoff);
    let hi_cdf = normal_cdf(cutoff);
    // Rescale the truncated quantile onto the full CDF.
    let target = lo_cdf + u * (hi_cdf - lo_cdf);

    let (mut lo, mut hi) = (-cutoff, cutoff);
    // 64 halvings take the bracket width below 1e-15 for any sane cutoff.
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if normal_cdf(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Draws one Gaussian value with the given mean and sigma, truncated at
/// `mean ± cutoff * sigma`.
pub fn gauss_truncated<R: RngCore>(rng: &mut R, mean: f64, sigma: f64, cutoff: f64) -> f64 {
    // 53 uniform bits in (0, 1); the half-ulp offset keeps the endpoints out.
    let u = ((rng.next_u64() >> 11) as f64 + 0.5) * (1.0 / (1u64 << 53) as f64);
    mean + sigma * root_normal(u, cutoff)
}
