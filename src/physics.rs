/// Hydrogen atom quantum physics calculations
/// Based on the Schrödinger equation for hydrogen-like atoms

use std::f64::consts::PI;

use ndarray::{Array, ArrayBase, ArrayView, Data, Dimension, Zip};
use num_complex::Complex64;

use crate::error::{QuantumStateError, Result};
use crate::special::{associated_legendre, factorial_ratio, laguerre_polynomial};

/// Represents quantum numbers (n, l, m_l)
/// n: Principal quantum number (1, 2, 3, ...)
/// l: Azimuthal quantum number (0 to n-1)
/// m_l: Magnetic quantum number (-l to l)
///
/// Only constructible through validation, so a value of this type is always a
/// legal hydrogen eigenstate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumNumbers {
    n: u32,
    l: u32,
    m_l: i32,
}

impl QuantumNumbers {
    pub fn new(n: i32, l: i32, m_l: i32) -> Result<Self> {
        let (n_u, l_u) = Self::radial(n, l)?;
        if m_l.unsigned_abs() > l_u {
            return Err(QuantumStateError::MagneticOutOfRange { l, m: m_l });
        }
        Ok(QuantumNumbers {
            n: n_u,
            l: l_u,
            m_l,
        })
    }

    /// Validates the (n, l) pair on its own, for radial-only evaluation.
    pub fn radial(n: i32, l: i32) -> Result<(u32, u32)> {
        if n < 1 {
            return Err(QuantumStateError::PrincipalTooSmall { n });
        }
        if l < 0 {
            return Err(QuantumStateError::NegativeAzimuthal { l });
        }
        if l >= n {
            return Err(QuantumStateError::AzimuthalTooLarge { n, l });
        }
        Ok((n as u32, l as u32))
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn m_l(&self) -> i32 {
        self.m_l
    }

    /// Spectroscopic letter of l: s, p, d, f, or "l=<l>" beyond that.
    pub fn subshell(&self) -> String {
        match self.l {
            0 => "s".to_string(),
            1 => "p".to_string(),
            2 => "d".to_string(),
            3 => "f".to_string(),
            l => format!("l={l}"),
        }
    }

    /// Orbital name such as "3d (m=0)".
    pub fn label(&self) -> String {
        format!("{}{} (m={})", self.n, self.subshell(), self.m_l)
    }
}

/// Bohr radius: dimensionless (all distances are in units of a₀)
const BOHR_RADIUS: f64 = 1.0;

/// Normalization constant of R_nl:
/// sqrt((2 / (n a0))^3 * (n-l-1)! / (2n (n+l)!))
fn radial_norm(n: u32, l: u32) -> f64 {
    let n_f = n as f64;
    let scale = (2.0 / (n_f * BOHR_RADIUS)).powi(3);
    (scale * factorial_ratio(n - l - 1, n + l) / (2.0 * n_f)).sqrt()
}

/// R_nl(r) given the precomputed normalization. Negative radii give 0.
fn radial_kernel(norm: f64, n: u32, l: u32, r: f64) -> f64 {
    if r < 0.0 {
        return 0.0;
    }

    let rho = 2.0 * r / (n as f64 * BOHR_RADIUS);

    let exp_part = (-rho / 2.0).exp();
    let poly = laguerre_polynomial(rho, n - l - 1, 2 * l + 1);
    let rho_power = rho.powi(l as i32);

    norm * exp_part * rho_power * poly
}

/// R_nl(r) for a validated state.
pub(crate) fn radial_value(qn: QuantumNumbers, r: f64) -> f64 {
    radial_kernel(radial_norm(qn.n, qn.l), qn.n, qn.l, r)
}

/// Calculate the normalized radial wavefunction R_nl(r) for hydrogen.
pub fn radial_wavefunction(n: i32, l: i32, r: f64) -> Result<f64> {
    let (n, l) = QuantumNumbers::radial(n, l)?;
    Ok(radial_kernel(radial_norm(n, l), n, l, r))
}

/// R_nl evaluated element-wise over an array of any shape.
pub fn radial_wavefunction_array<S, D>(n: i32, l: i32, r: &ArrayBase<S, D>) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (n, l) = QuantumNumbers::radial(n, l)?;
    let norm = radial_norm(n, l);
    Ok(r.mapv(|r| radial_kernel(norm, n, l, r)))
}

/// Y_lm for an already validated (l, m).
fn spherical_harmonic_value(l: u32, m_l: i32, theta: f64, phi: f64) -> Complex64 {
    let m_abs = m_l.unsigned_abs();
    let legendre = associated_legendre(theta.cos(), l, m_abs);
    let norm = ((2.0 * l as f64 + 1.0) / (4.0 * PI) * factorial_ratio(l - m_abs, l + m_abs)).sqrt();

    let base = Complex64::from_polar(norm * legendre, m_abs as f64 * phi);

    if m_l >= 0 {
        base
    } else {
        // Y_l^{-m} = (-1)^m conj(Y_l^m)
        let sign = if m_abs % 2 == 0 { 1.0 } else { -1.0 };
        base.conj() * sign
    }
}

/// Complex spherical harmonic Y_lm(theta, phi) with Condon-Shortley phase.
pub fn spherical_harmonic(l: i32, m_l: i32, theta: f64, phi: f64) -> Result<Complex64> {
    if l < 0 {
        return Err(QuantumStateError::NegativeAzimuthal { l });
    }
    if m_l.unsigned_abs() > l as u32 {
        return Err(QuantumStateError::MagneticOutOfRange { l, m: m_l });
    }
    Ok(spherical_harmonic_value(l as u32, m_l, theta, phi))
}

/// ψ(r, θ, φ) = R_nl(r) Y_lm(θ, φ)
pub fn psi(qn: QuantumNumbers, r: f64, theta: f64, phi: f64) -> Complex64 {
    radial_value(qn, r) * spherical_harmonic_value(qn.l, qn.m_l, theta, phi)
}

/// ψ with the origin and any NaN mapped to zero. θ is undefined at r = 0.
pub fn psi_safe(qn: QuantumNumbers, r: f64, theta: f64, phi: f64) -> Complex64 {
    if r == 0.0 {
        return Complex64::new(0.0, 0.0);
    }
    let value = psi(qn, r, theta, phi);
    if value.is_nan() {
        Complex64::new(0.0, 0.0)
    } else {
        value
    }
}

/// Calculate the probability density |ψ|² for a given position in spherical coordinates
pub fn probability_density(qn: QuantumNumbers, r: f64, theta: f64, phi: f64) -> f64 {
    psi(qn, r, theta, phi).norm_sqr()
}

pub fn probability_density_safe(qn: QuantumNumbers, r: f64, theta: f64, phi: f64) -> f64 {
    psi_safe(qn, r, theta, phi).norm_sqr()
}

/// Full hydrogen wavefunction over coordinate arrays of identical shape.
///
/// # Panics
/// If `r`, `theta` and `phi` differ in shape.
pub fn hydrogen_wavefunction<D: Dimension>(
    n: i32,
    l: i32,
    m_l: i32,
    r: ArrayView<f64, D>,
    theta: ArrayView<f64, D>,
    phi: ArrayView<f64, D>,
) -> Result<Array<Complex64, D>> {
    let qn = QuantumNumbers::new(n, l, m_l)?;
    Ok(Zip::from(r)
        .and(theta)
        .and(phi)
        .map_collect(|&r, &theta, &phi| psi(qn, r, theta, phi)))
}

/// Same as [`hydrogen_wavefunction`] but safe on grids that pass through the origin:
/// samples at r = 0, and any NaN results, come back as 0.
///
/// # Panics
/// If `r`, `theta` and `phi` differ in shape.
pub fn hydrogen_wavefunction_safe<D: Dimension>(
    n: i32,
    l: i32,
    m_l: i32,
    r: ArrayView<f64, D>,
    theta: ArrayView<f64, D>,
    phi: ArrayView<f64, D>,
) -> Result<Array<Complex64, D>> {
    let qn = QuantumNumbers::new(n, l, m_l)?;
    Ok(Zip::from(r)
        .and(theta)
        .and(phi)
        .map_collect(|&r, &theta, &phi| psi_safe(qn, r, theta, phi)))
}

/// (x, y, z) -> (r, θ, φ) with θ = arccos(z/r) and φ = atan2(y, x).
/// At the origin θ is reported as 0.
pub fn cartesian_to_spherical(x: f64, y: f64, z: f64) -> [f64; 3] {
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return [0.0, 0.0, 0.0];
    }
    let theta = (z / r).clamp(-1.0, 1.0).acos();
    let phi = y.atan2(x);
    [r, theta, phi]
}

pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> [f64; 3] {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    [r * sin_t * cos_p, r * sin_t * sin_p, r * cos_t]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_quantum_numbers() {
        assert!(QuantumNumbers::new(1, 0, 0).is_ok());
        assert!(QuantumNumbers::new(2, 1, -1).is_ok());
        assert!(QuantumNumbers::new(2, 1, 0).is_ok());
        assert!(QuantumNumbers::new(2, 1, 1).is_ok());

        assert_eq!(
            QuantumNumbers::new(0, 0, 0),
            Err(QuantumStateError::PrincipalTooSmall { n: 0 })
        );
        assert_eq!(
            QuantumNumbers::new(2, -1, 0),
            Err(QuantumStateError::NegativeAzimuthal { l: -1 })
        );
        assert_eq!(
            QuantumNumbers::new(2, 2, 0),
            Err(QuantumStateError::AzimuthalTooLarge { n: 2, l: 2 })
        );
        assert_eq!(
            QuantumNumbers::new(2, 1, 2),
            Err(QuantumStateError::MagneticOutOfRange { l: 1, m: 2 })
        );
    }

    #[test]
    fn labels() {
        assert_eq!(QuantumNumbers::new(3, 2, 0).unwrap().label(), "3d (m=0)");
        assert_eq!(QuantumNumbers::new(5, 4, -2).unwrap().label(), "5l=4 (m=-2)");
    }

    #[test]
    fn radial_matches_closed_forms() {
        for &r in &[0.0_f64, 0.5, 1.0, 2.5, 7.0] {
            let r10 = 2.0 * (-r).exp();
            assert_abs_diff_eq!(radial_wavefunction(1, 0, r).unwrap(), r10, epsilon = 1e-12);

            let r20 = (1.0 / 8.0_f64).sqrt() * (2.0 - r) * (-r / 2.0).exp();
            assert_abs_diff_eq!(radial_wavefunction(2, 0, r).unwrap(), r20, epsilon = 1e-12);

            let r21 = (1.0 / 24.0_f64).sqrt() * r * (-r / 2.0).exp();
            assert_abs_diff_eq!(radial_wavefunction(2, 1, r).unwrap(), r21, epsilon = 1e-12);
        }
    }

    #[test]
    fn radial_rejects_invalid_pairs() {
        assert!(radial_wavefunction(0, 0, 1.0).is_err());
        assert!(radial_wavefunction(2, 2, 1.0).is_err());
        assert!(radial_wavefunction(2, -1, 1.0).is_err());
    }

    #[test]
    fn radial_rejects_l_equal_to_n_without_panicking() {
        // n - l - 1 would underflow if the pair reached the kernel
        let r = array![0.5, 1.0];
        assert_eq!(
            radial_wavefunction(1, 1, 1.0),
            Err(QuantumStateError::AzimuthalTooLarge { n: 1, l: 1 })
        );
        assert!(radial_wavefunction_array(1, 1, &r).is_err());
        assert!(radial_wavefunction_array(3, 7, &r).is_err());
    }

    #[test]
    fn scalar_and_array_share_one_kernel() {
        let qn = QuantumNumbers::new(4, 2, 0).unwrap();
        let r = Array1::linspace(0.0, 30.0, 61);
        let arr = radial_wavefunction_array(4, 2, &r).unwrap();
        for (&ri, &vi) in r.iter().zip(arr.iter()) {
            assert_eq!(vi, radial_value(qn, ri));
            assert_eq!(vi, radial_wavefunction(4, 2, ri).unwrap());
        }
        assert_eq!(radial_value(qn, -1.0), 0.0);
    }

    #[test]
    fn radial_array_keeps_shape() {
        let r = array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]];
        let out = radial_wavefunction_array(3, 1, &r).unwrap();
        assert_eq!(out.shape(), r.shape());
        for (&ri, &vi) in r.iter().zip(out.iter()) {
            assert_abs_diff_eq!(vi, radial_wavefunction(3, 1, ri).unwrap(), epsilon = 1e-14);
        }
    }

    #[test]
    fn radial_is_finite_for_large_n() {
        let r = Array1::linspace(0.0, 400.0, 200);
        let out = radial_wavefunction_array(40, 10, &r).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn spherical_harmonic_low_orders() {
        let (theta, phi) = (0.7_f64, 1.3_f64);

        let y00 = spherical_harmonic(0, 0, theta, phi).unwrap();
        assert_abs_diff_eq!(y00.re, 0.5 / PI.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(y00.im, 0.0, epsilon = 1e-15);

        let y10 = spherical_harmonic(1, 0, theta, phi).unwrap();
        assert_abs_diff_eq!(y10.re, (3.0 / (4.0 * PI)).sqrt() * theta.cos(), epsilon = 1e-12);

        // Y_1^1 = -sqrt(3/8π) sinθ e^{iφ}
        let y11 = spherical_harmonic(1, 1, theta, phi).unwrap();
        let amp = -(3.0 / (8.0 * PI)).sqrt() * theta.sin();
        assert_abs_diff_eq!(y11.re, amp * phi.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(y11.im, amp * phi.sin(), epsilon = 1e-12);

        // Y_1^{-1} = sqrt(3/8π) sinθ e^{-iφ}
        let y1m1 = spherical_harmonic(1, -1, theta, phi).unwrap();
        assert_abs_diff_eq!(y1m1.re, -amp * phi.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(y1m1.im, amp * phi.sin(), epsilon = 1e-12);
    }

    #[test]
    fn spherical_harmonic_rejects_large_m() {
        assert_eq!(
            spherical_harmonic(2, 3, 0.1, 0.2),
            Err(QuantumStateError::MagneticOutOfRange { l: 2, m: 3 })
        );
    }

    #[test]
    fn wavefunction_is_complex_for_nonzero_m() {
        let r = array![1.0, 2.0, 3.0];
        let theta = array![0.5, 1.0, 1.5];
        let phi = array![0.0, 1.0, 2.0];
        let out = hydrogen_wavefunction(2, 1, 1, r.view(), theta.view(), phi.view()).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().any(|v| v.im.abs() > 1e-6));
    }

    #[test]
    fn wavefunction_validates_m() {
        let r = array![1.0];
        let err = hydrogen_wavefunction(2, 1, 2, r.view(), r.view(), r.view());
        assert!(err.is_err());
    }

    #[test]
    fn safe_variant_zeroes_origin_and_nan() {
        let r = array![0.0, 0.0, 1.0, 1.0];
        let theta = array![0.0, f64::NAN, f64::NAN, 0.3];
        let phi = array![0.0, 2.0, 0.0, 0.0];
        let out = hydrogen_wavefunction_safe(2, 1, 0, r.view(), theta.view(), phi.view()).unwrap();
        assert_eq!(out[0], Complex64::new(0.0, 0.0));
        assert_eq!(out[1], Complex64::new(0.0, 0.0));
        assert_eq!(out[2], Complex64::new(0.0, 0.0));
        assert!(out[3].norm() > 0.0);
    }

    #[test]
    fn coordinate_round_trip() {
        let [r, theta, phi] = cartesian_to_spherical(1.0, -2.0, 0.5);
        let [x, y, z] = spherical_to_cartesian(r, theta, phi);
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(z, 0.5, epsilon = 1e-12);
        assert_eq!(cartesian_to_spherical(0.0, 0.0, 0.0), [0.0, 0.0, 0.0]);
    }
}
