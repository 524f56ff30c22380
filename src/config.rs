use validator::{Validate, ValidationError};

fn validate_cmc_config(cfg: &CmcConfig) -> Result<(), ValidationError> {
    if !cfg.temperature.is_finite() || cfg.temperature <= 0.0 {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    if !cfg.constraint_phi.is_finite() || !cfg.constraint_theta.is_finite() {
        return Err(ValidationError::new("constraint angles must be finite"));
    }
    Ok(())
}

/// Run parameters for one constrained Monte Carlo replica.
///
/// Angles are in degrees; [`CmcConfig::new`] wraps them into [0, 360).
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_cmc_config"))]
pub struct CmcConfig {
    /// Constraint polar angle φ measured from +z, degrees.
    pub constraint_phi: f64,
    /// Constraint azimuthal angle θ measured from +x, degrees.
    pub constraint_theta: f64,
    /// Temperature in kelvin. Must be > 0.
    pub temperature: f64,
    /// Master seed for the replica's random streams.
    pub seed: u64,
    /// Accept ΔE < 0 moves unconditionally, skipping the geometric weight.
    ///
    /// The full acceptance rule evaluates the Boltzmann factor together with
    /// the `(Mz_new/Mz_old)²` weight and the polar Jacobian even for
    /// energy-lowering moves, since the geometric factors can be < 1. This
    /// flag restores the short-circuit used by older integrators; it is a
    /// slight bias and exists for comparison runs only.
    pub greedy_accept: bool,
}

impl CmcConfig {
    /// Build a config with the full (unbiased) acceptance rule.
    pub fn new(phi_deg: f64, theta_deg: f64, temperature: f64, seed: u64) -> Self {
        Self {
            constraint_phi: wrap_degrees(phi_deg),
            constraint_theta: wrap_degrees(theta_deg),
            temperature,
            seed,
            greedy_accept: false,
        }
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    if angle.is_finite() {
        angle.rem_euclid(360.0)
    } else {
        angle
    }
}
