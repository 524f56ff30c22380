use crate::field::SpinField;
use crate::vec3::dot;

/// Site-resolved energy of the atomistic Hamiltonian.
///
/// `site_energy` returns the energy of site `i` in joules against the current
/// field, such that the full dependence on sᵢ is captured: the energy change
/// from moving sᵢ alone equals `E_i(new) − E_i(old)` with no double-counting
/// correction needed at the call site. Implementations must be pure with
/// respect to the field (thermal fluctuation fields stay disabled during a
/// constrained run) and hold no mutable state.
pub trait EnergyOracle {
    /// Energy contribution of site `i` in joules.
    fn site_energy(&self, field: &SpinField, i: usize) -> f64;
}

/// Zero Hamiltonian: every move is energy-neutral.
///
/// Samples the bare constrained ensemble, where acceptance is governed by the
/// geometric weight alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroField;

impl EnergyOracle for ZeroField {
    #[inline]
    fn site_energy(&self, _field: &SpinField, _i: usize) -> f64 {
        0.0
    }
}

/// Uniaxial anisotropy plus Zeeman coupling, identical at every site.
///
/// E_i = −k_u (sᵢ·e)² − μ_s (sᵢ·h), with `k_u` in joules, `e` the unit easy
/// axis, `h` the applied field in tesla and `mu_s` the moment entering the
/// Zeeman term.
#[derive(Debug, Clone, Copy)]
pub struct UniaxialZeeman {
    /// Anisotropy constant per site (J).
    pub k_u: f64,
    /// Easy axis, unit vector.
    pub easy_axis: [f64; 3],
    /// Applied field (T).
    pub h_ext: [f64; 3],
    /// Moment entering the Zeeman term (J/T).
    pub mu_s: f64,
}

impl EnergyOracle for UniaxialZeeman {
    #[inline]
    fn site_energy(&self, field: &SpinField, i: usize) -> f64 {
        let s = field.get(i);
        let along = dot(s, self.easy_axis);
        -self.k_u * along * along - self.mu_s * dot(s, self.h_ext)
    }
}
