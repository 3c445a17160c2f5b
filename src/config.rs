//! Tunable parameters for sampling, slicing and plotting.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Rejection-sampler settings.
///
/// The bounding cube has half-width `box_scale * n + box_offset`. `max_val` is
/// the rejection ceiling: an empirical bound on |ψ|² for small (n, l), not an
/// analytic one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub box_scale: f64,
    pub box_offset: f64,
    pub max_val: f64,
    pub attempts_multiplier: usize,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            box_scale: 5.0,
            box_offset: 5.0,
            max_val: 0.2,
            attempts_multiplier: 200,
            seed: None,
            verbose: true,
        }
    }
}

impl SamplerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_attempts_multiplier(mut self, multiplier: usize) -> Self {
        self.attempts_multiplier = multiplier;
        self
    }

    pub fn with_max_val(mut self, max_val: f64) -> Self {
        self.max_val = max_val;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    /// Half-width of the sampling cube for principal quantum number `n`.
    pub fn half_width(&self, n: u32) -> f64 {
        self.box_scale * n as f64 + self.box_offset
    }

    /// Hard cap on loop iterations for a request of `num_points`.
    pub fn max_attempts(&self, num_points: usize) -> usize {
        num_points.saturating_mul(self.attempts_multiplier)
    }
}

/// Cross-section animation settings. Distances are in Bohr radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    pub grid_limit: f64,
    pub resolution: usize,
    pub frames: usize,
    pub fps: u32,
    /// Fraction of the estimated global maximum mapped to the top of the colormap.
    pub vmax_fraction: f64,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            grid_limit: 18.0,
            resolution: 250,
            frames: 60,
            fps: 15,
            vmax_fraction: 0.8,
        }
    }
}

impl SliceConfig {
    /// Shared x / y axis of every frame.
    pub fn axis(&self) -> Array1<f64> {
        Array1::linspace(-self.grid_limit, self.grid_limit, self.resolution)
    }

    /// Heights of the animation frames, bottom to top.
    pub fn z_planes(&self) -> Array1<f64> {
        Array1::linspace(-self.grid_limit, self.grid_limit, self.frames)
    }

    /// Planes probed when estimating the shared color scale.
    pub fn probe_planes(&self) -> [f64; 3] {
        [0.0, self.grid_limit / 2.0, -self.grid_limit / 2.0]
    }

    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }
}

/// One curve of the radial density plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialState {
    pub n: i32,
    pub l: i32,
    pub label: String,
}

impl RadialState {
    pub fn new(n: i32, l: i32, label: &str) -> Self {
        Self {
            n,
            l,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialPlotConfig {
    pub r_max: f64,
    pub num_points: usize,
    pub states: Vec<RadialState>,
}

impl Default for RadialPlotConfig {
    fn default() -> Self {
        Self {
            r_max: 25.0,
            num_points: 1000,
            states: vec![
                RadialState::new(1, 0, "1s"),
                RadialState::new(2, 0, "2s"),
                RadialState::new(2, 1, "2p"),
                RadialState::new(3, 2, "3d"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_defaults() {
        let cfg = SamplerConfig::default();
        assert_eq!(cfg.half_width(1), 10.0);
        assert_eq!(cfg.half_width(3), 20.0);
        assert_eq!(cfg.max_attempts(100), 20_000);
        assert_eq!(cfg.max_val, 0.2);
    }

    #[test]
    fn max_attempts_saturates() {
        let cfg = SamplerConfig::default().with_attempts_multiplier(usize::MAX);
        assert_eq!(cfg.max_attempts(2), usize::MAX);
        assert_eq!(cfg.max_attempts(0), 0);
    }

    #[test]
    fn slice_axes_span_the_grid() {
        let cfg = SliceConfig {
            resolution: 5,
            frames: 3,
            ..SliceConfig::default()
        };
        let axis = cfg.axis();
        assert_eq!(axis.len(), 5);
        assert_eq!(axis[0], -18.0);
        assert_eq!(axis[4], 18.0);
        assert_eq!(cfg.z_planes().to_vec(), vec![-18.0, 0.0, 18.0]);
        assert_eq!(cfg.probe_planes(), [0.0, 9.0, -9.0]);
        assert_eq!(cfg.frame_delay_ms(), 66);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: SamplerConfig = serde_json::from_str(r#"{"seed": 7, "verbose": false}"#).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.verbose);
        assert_eq!(cfg.attempts_multiplier, 200);
    }
}
