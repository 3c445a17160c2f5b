//! Monte Carlo (rejection) sampling of electron clouds.
//!
//! Candidates are drawn uniformly in a cube around the nucleus and kept with
//! probability |ψ|² / `max_val`. The loop is bounded by a hard attempt budget,
//! so a sparse orbital yields fewer points than requested instead of running
//! forever. A short cloud is a normal result.

use log::{debug, warn};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SamplerConfig;
use crate::error::Result;
use crate::physics::{cartesian_to_spherical, probability_density, QuantumNumbers};

/// Accepted points of one sampling run plus its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronCloud {
    pub qn: QuantumNumbers,
    /// Accepted (x, y, z) in Bohr radii, in acceptance order.
    pub points: Vec<[f64; 3]>,
    /// Loop iterations consumed, including candidates skipped at the origin.
    pub attempts: usize,
    pub requested: usize,
    pub half_width: f64,
}

impl ElectronCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Accepted / attempted, 0 when nothing was attempted.
    pub fn efficiency(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.points.len() as f64 / self.attempts as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.requested
    }

    /// Points as an (accepted × 3) array.
    pub fn as_array(&self) -> Array2<f64> {
        Array2::from(self.points.clone())
    }
}

/// Sample a cloud for (n, l, m) with a generator built from `config.seed`
/// (or from entropy when no seed is set).
pub fn generate_electron_cloud(
    n: i32,
    l: i32,
    m: i32,
    num_points: usize,
    config: &SamplerConfig,
) -> Result<ElectronCloud> {
    let qn = QuantumNumbers::new(n, l, m)?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(sample_cloud(qn, num_points, config, &mut rng))
}

/// Same as [`generate_electron_cloud`] with a caller-supplied generator.
pub fn generate_electron_cloud_with_rng<R: Rng>(
    n: i32,
    l: i32,
    m: i32,
    num_points: usize,
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<ElectronCloud> {
    let qn = QuantumNumbers::new(n, l, m)?;
    Ok(sample_cloud(qn, num_points, config, rng))
}

/// Rejection sampling loop for a validated state.
pub fn sample_cloud<R: Rng>(
    qn: QuantumNumbers,
    num_points: usize,
    config: &SamplerConfig,
    rng: &mut R,
) -> ElectronCloud {
    let half_width = config.half_width(qn.n());
    let max_attempts = config.max_attempts(num_points);

    if config.verbose {
        println!(
            "Generating cloud for orbital ({}, {}, {})...",
            qn.n(),
            qn.l(),
            qn.m_l()
        );
    }

    let mut points = Vec::with_capacity(num_points.min(max_attempts));
    let mut attempts = 0usize;

    while points.len() < num_points && attempts < max_attempts {
        attempts += 1;

        let x = (rng.gen::<f64>() * 2.0 - 1.0) * half_width;
        let y = (rng.gen::<f64>() * 2.0 - 1.0) * half_width;
        let z = (rng.gen::<f64>() * 2.0 - 1.0) * half_width;

        let [r, theta, phi] = cartesian_to_spherical(x, y, z);
        if r == 0.0 {
            continue;
        }

        let density = probability_density(qn, r, theta, phi);

        if rng.gen::<f64>() * config.max_val < density {
            points.push([x, y, z]);
        }
    }

    let cloud = ElectronCloud {
        qn,
        points,
        attempts,
        requested: num_points,
        half_width,
    };

    debug!(
        "orbital {}: {} / {} points, {} attempts (cap {}), half-width {:.1}",
        qn.label(),
        cloud.len(),
        num_points,
        attempts,
        max_attempts,
        half_width
    );
    if !cloud.is_complete() {
        warn!(
            "attempt budget exhausted for {}: accepted {} of {} points",
            qn.label(),
            cloud.len(),
            num_points
        );
    }
    if config.verbose {
        println!(
            "Generated {} points in {} attempts ({:.1}% efficiency)",
            cloud.len(),
            attempts,
            cloud.efficiency() * 100.0
        );
    }

    cloud
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumStateError;
    use approx::assert_abs_diff_eq;

    fn quiet(seed: u64) -> SamplerConfig {
        SamplerConfig::default().with_seed(seed).quiet()
    }

    #[test]
    fn ground_state_cloud_has_three_columns() {
        let cloud = generate_electron_cloud(1, 0, 0, 100, &quiet(1)).unwrap();
        let arr = cloud.as_array();
        assert_eq!(arr.ndim(), 2);
        assert_eq!(arr.ncols(), 3);
        assert!(arr.nrows() > 0 && arr.nrows() <= 100);
    }

    #[test]
    fn zero_points_means_zero_attempts() {
        let cloud = generate_electron_cloud(3, 2, 1, 0, &quiet(2)).unwrap();
        assert!(cloud.is_empty());
        assert_eq!(cloud.attempts, 0);
        assert_eq!(cloud.efficiency(), 0.0);
        assert_eq!(cloud.as_array().shape(), &[0, 3]);
    }

    #[test]
    fn attempts_never_exceed_budget() {
        // An envelope of 1e6 makes acceptance practically impossible.
        let cfg = quiet(3).with_max_val(1e6).with_attempts_multiplier(5);
        let cloud = generate_electron_cloud(2, 1, 0, 40, &cfg).unwrap();
        assert_eq!(cloud.attempts, 200);
        assert!(cloud.len() < 40);
        assert!(!cloud.is_complete());
    }

    #[test]
    fn points_stay_inside_the_box() {
        let cloud = generate_electron_cloud(2, 1, -1, 200, &quiet(4)).unwrap();
        let hw = cloud.half_width;
        assert_eq!(hw, 15.0);
        for p in &cloud.points {
            assert!(p.iter().all(|c| c.abs() <= hw));
        }
    }

    #[test]
    fn same_seed_same_cloud() {
        let a = generate_electron_cloud(2, 0, 0, 50, &quiet(99)).unwrap();
        let b = generate_electron_cloud(2, 0, 0, 50, &quiet(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_rng_is_used() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let cloud =
            generate_electron_cloud_with_rng(1, 0, 0, 20, &quiet(0), &mut rng).unwrap();
        assert!(cloud.len() <= 20);
        assert!(cloud.attempts <= 20 * 200);
    }

    #[test]
    fn invalid_state_fails_before_sampling() {
        let err = generate_electron_cloud(1, 1, 0, 10, &quiet(0)).unwrap_err();
        assert_eq!(err, QuantumStateError::AzimuthalTooLarge { n: 1, l: 1 });
    }

    #[test]
    fn ground_state_mean_radius_is_plausible() {
        // <r> = 1.5 a0 for 1s. Acceptance is ~1/1600 per attempt in the default
        // cube, so the budget is widened.
        let cfg = quiet(11).with_attempts_multiplier(10_000);
        let cloud = generate_electron_cloud(1, 0, 0, 300, &cfg).unwrap();
        assert_eq!(cloud.len(), 300);
        let mean: f64 = cloud
            .points
            .iter()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .sum::<f64>()
            / cloud.len() as f64;
        assert_abs_diff_eq!(mean, 1.5, epsilon = 0.25);
    }
}
