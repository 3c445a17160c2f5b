//! Hydrogen atom orbitals: wavefunction evaluation, Monte Carlo electron
//! clouds, radial densities and cross-section slices.
//!
//! Distances are in Bohr radii. Every entry point that takes raw quantum
//! numbers validates them first and returns [`QuantumStateError`] on failure.

pub mod config;
pub mod density;
pub mod error;
pub mod physics;
pub mod render;
pub mod sampler;
pub mod special;

pub use config::{RadialPlotConfig, RadialState, SamplerConfig, SliceConfig};
pub use density::{
    density_slice, estimate_max_density, radial_probability, radial_probability_density, DensitySlice,
};
pub use error::QuantumStateError;
pub use physics::{
    hydrogen_wavefunction, hydrogen_wavefunction_safe, radial_wavefunction, radial_wavefunction_array,
    spherical_harmonic, QuantumNumbers,
};
pub use sampler::{generate_electron_cloud, ElectronCloud};
