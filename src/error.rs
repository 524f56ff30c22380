use thiserror::Error;

/// Canonical error type for the constrained Monte Carlo integrator.
///
/// Sphere and energy rejects are normal trial outcomes and are counted, never
/// signaled; only contract violations surface as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CmcError {
    /// The run parameters cannot produce a valid replica. Fatal at
    /// construction; the driver is never built.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The energy oracle returned a non-finite site energy. The in-flight
    /// provisional move has been reverted before this is raised, so the spin
    /// field is left in its last accepted state.
    #[error("energy oracle returned non-finite energy {energy} for site {site}")]
    OracleContractViolation { site: usize, energy: f64 },

    /// Interruption observed between sweeps. The spin field is left in its
    /// last accepted state.
    #[error("run interrupted between sweeps")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_site() {
        let err = CmcError::OracleContractViolation {
            site: 7,
            energy: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("site 7"));
        assert!(msg.contains("NaN"));
    }
}
