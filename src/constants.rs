//! Physical constants entering the acceptance rule.

/// Bohr magneton (J/T).
pub const MU_B: f64 = 9.27400915e-24;

/// Precomputed reciprocal of [`MU_B`].
pub const INV_MU_B: f64 = 1.07828231e23;

/// Boltzmann constant (J/K).
pub const K_B: f64 = 1.3806503e-23;
