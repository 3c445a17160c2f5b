//! Radial probability density and 2D cross-sections of |ψ|².

use log::debug;
use ndarray::{Array, Array1, Array2, ArrayBase, ArrayView1, Data, Dimension, Zip};

use crate::config::SliceConfig;
use crate::error::Result;
use crate::physics::{
    cartesian_to_spherical, probability_density_safe, radial_wavefunction, radial_wavefunction_array,
    QuantumNumbers,
};

/// P(r) = r² R_nl(r)² over an array of radii.
pub fn radial_probability_density<S, D>(n: i32, l: i32, r: &ArrayBase<S, D>) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let radial = radial_wavefunction_array(n, l, r)?;
    Ok(Zip::from(r).and(&radial).map_collect(|&r, &rv| r * r * rv * rv))
}

/// Scalar P(r).
pub fn radial_probability(n: i32, l: i32, r: f64) -> Result<f64> {
    let rv = radial_wavefunction(n, l, r)?;
    Ok(r * r * rv * rv)
}

/// Evenly spaced radii on [0, r_max].
pub fn radial_axis(r_max: f64, num_points: usize) -> Array1<f64> {
    Array1::linspace(0.0, r_max, num_points)
}

/// Trapezoidal rule on uniformly spaced samples.
pub fn trapezoid(y: ArrayView1<f64>, dx: f64) -> f64 {
    if y.len() < 2 {
        return 0.0;
    }
    let inner: f64 = y.sum();
    (inner - 0.5 * (y[0] + y[y.len() - 1])) * dx
}

/// |ψ|² over the plane z = const. `density[[i, j]]` belongs to (xs[j], ys[i]).
#[derive(Debug, Clone)]
pub struct DensitySlice {
    pub z: f64,
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    pub density: Array2<f64>,
}

impl DensitySlice {
    pub fn max(&self) -> f64 {
        self.density.iter().cloned().fold(0.0, f64::max)
    }
}

/// Density field on the (xs × ys) grid at height z. The origin cell is 0.
pub fn slice_density(qn: QuantumNumbers, z: f64, xs: &Array1<f64>, ys: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((ys.len(), xs.len()), |(i, j)| {
        let [r, theta, phi] = cartesian_to_spherical(xs[j], ys[i], z);
        probability_density_safe(qn, r, theta, phi)
    })
}

/// One frame of the slicing animation for (n, l, m) at height z.
pub fn density_slice(n: i32, l: i32, m: i32, z: f64, config: &SliceConfig) -> Result<DensitySlice> {
    let qn = QuantumNumbers::new(n, l, m)?;
    Ok(slice_at(qn, z, config))
}

pub fn slice_at(qn: QuantumNumbers, z: f64, config: &SliceConfig) -> DensitySlice {
    let axis = config.axis();
    let density = slice_density(qn, z, &axis, &axis);
    DensitySlice {
        z,
        xs: axis.clone(),
        ys: axis,
        density,
    }
}

/// Largest |ψ|² over every animation frame and the probe planes, used as the
/// shared color scale of an animation. No frame rendered from `config`
/// exceeds it.
pub fn estimate_max_density(qn: QuantumNumbers, config: &SliceConfig) -> f64 {
    let axis = config.axis();
    let frames = config.z_planes();
    let max = frames
        .iter()
        .chain(config.probe_planes().iter())
        .map(|&z| slice_density(qn, z, &axis, &axis).iter().cloned().fold(0.0, f64::max))
        .fold(0.0, f64::max);
    debug!("global max |ψ|² for {} over {} planes: {max:e}", qn.label(), frames.len() + 3);
    max
}
