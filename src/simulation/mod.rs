use std::sync::atomic::{AtomicBool, Ordering};

use validator::Validate;

use crate::config::CmcConfig;
use crate::constants::{K_B, MU_B};
use crate::energy::EnergyOracle;
use crate::error::CmcError;
use crate::field::{Material, SpinField};
use crate::frame::Frame;
use crate::mcmc::pair_move::pair_move;
use crate::mcmc::Trial;
use crate::rng::RandomSource;
use crate::statistics::{CmcStats, SweepDelta, TrialCounters};

/// One constrained Monte Carlo replica.
///
/// Owns the spin field, the constraint frame, the random source, the running
/// lab-frame magnetization and the trial counters. Construction initializes
/// every spin along the constraint direction, so the projected magnetization
/// starts at N and the first `Mz_old` is never zero.
///
/// Trials within a sweep are sequentially dependent; the driver never
/// parallelizes inside a replica. Independent replicas (own field, own seed)
/// may run concurrently, see [`run_replicas_parallel`].
///
/// [`run_replicas_parallel`]: crate::run_replicas_parallel
pub struct CmcDriver<O> {
    config: CmcConfig,
    frame: Frame,
    field: SpinField,
    oracle: O,
    materials: Vec<Material>,
    rng: RandomSource,
    magnetization: [f64; 3],
    counters: TrialCounters,
    /// μ_B / (k_B·T), pairing with trial energies expressed in μ_B·T.
    beta: f64,
}

/// Construct a driver for one replica (the module's init entry point).
///
/// Fails with [`CmcError::InvalidConfig`] if the config does not validate,
/// the field is empty, a site references a missing material, or any μ_s is
/// not strictly positive and finite.
pub fn init_cmc<O: EnergyOracle>(
    config: CmcConfig,
    field: SpinField,
    oracle: O,
    materials: Vec<Material>,
) -> Result<CmcDriver<O>, CmcError> {
    CmcDriver::new(config, field, oracle, materials)
}

impl<O: EnergyOracle> CmcDriver<O> {
    /// See [`init_cmc`].
    pub fn new(
        config: CmcConfig,
        field: SpinField,
        oracle: O,
        materials: Vec<Material>,
    ) -> Result<Self, CmcError> {
        config
            .validate()
            .map_err(|e| CmcError::InvalidConfig(e.to_string()))?;

        if field.n_sites() == 0 {
            return Err(CmcError::InvalidConfig("spin field has no sites".into()));
        }
        for i in 0..field.n_sites() {
            if field.material_id(i) >= materials.len() {
                return Err(CmcError::InvalidConfig(format!(
                    "site {i} references material {} but only {} materials are defined",
                    field.material_id(i),
                    materials.len()
                )));
            }
        }
        for (m, material) in materials.iter().enumerate() {
            if !material.mu_s.is_finite() || material.mu_s <= 0.0 {
                return Err(CmcError::InvalidConfig(format!(
                    "material {m} has invalid mu_s {}",
                    material.mu_s
                )));
            }
        }

        let frame = Frame::new(config.constraint_phi, config.constraint_theta);
        let beta = MU_B / (K_B * config.temperature);
        let rng = RandomSource::from_seed(config.seed);

        let mut driver = Self {
            config,
            frame,
            field,
            oracle,
            materials,
            rng,
            magnetization: [0.0; 3],
            counters: TrialCounters::default(),
            beta,
        };
        driver.initialize();
        Ok(driver)
    }

    /// Align every spin with the constraint direction and zero all counters.
    fn initialize(&mut self) {
        let d = self.frame.constraint();
        for i in 0..self.field.n_sites() {
            self.field.set(i, d);
        }
        self.magnetization = self.field.total_magnetization();
        self.counters = TrialCounters::default();
    }

    /// Re-initialize wholesale: spins along the constraint, counters zeroed,
    /// random streams rewound to the seed. Equivalent to a fresh driver.
    pub fn reset(&mut self) {
        self.rng = RandomSource::from_seed(self.config.seed);
        self.initialize();
    }

    /// Perform exactly N pair-move trials and return the counter deltas.
    ///
    /// On [`CmcError::OracleContractViolation`] the in-flight provisional
    /// move has been reverted; trials already committed this sweep stand.
    pub fn sweep(&mut self) -> Result<SweepDelta, CmcError> {
        let before = self.counters;
        for _ in 0..self.field.n_sites() {
            let trial = pair_move(
                &mut self.field,
                &self.oracle,
                &self.frame,
                &self.materials,
                &mut self.rng,
                &mut self.magnetization,
                self.beta,
                self.config.greedy_accept,
            )?;
            match trial {
                Trial::Accepted => self.counters.successes += 1,
                Trial::EnergyRejected => self.counters.energy_rejects += 1,
                Trial::SphereRejected => self.counters.sphere_rejects += 1,
            }
        }
        Ok(self.counters.since(&before).into())
    }

    /// Run `n_sweeps` sweeps and return the counters accumulated by them.
    ///
    /// `interrupted` is checked between sweeps, never inside one; on
    /// interruption the field is left in its last accepted state and
    /// [`CmcError::Cancelled`] is returned. `on_sweep` is called once before
    /// every sweep (useful for progress reporting or debug logging).
    pub fn run(
        &mut self,
        n_sweeps: usize,
        interrupted: &AtomicBool,
        on_sweep: &(dyn Fn() + Sync),
    ) -> Result<TrialCounters, CmcError> {
        let before = self.counters;
        for _ in 0..n_sweeps {
            if interrupted.load(Ordering::Relaxed) {
                return Err(CmcError::Cancelled);
            }
            on_sweep();
            self.sweep()?;
        }
        Ok(self.counters.since(&before))
    }

    /// Accumulated statistics for the replica.
    pub fn stats(&self) -> CmcStats {
        self.counters.into()
    }

    /// Raw counters (successes, energy rejects, sphere rejects).
    pub fn counters(&self) -> TrialCounters {
        self.counters
    }

    /// Running lab-frame magnetization (Mx, My, Mz).
    pub fn magnetization(&self) -> [f64; 3] {
        self.magnetization
    }

    /// The constraint direction d in lab coordinates.
    pub fn constraint_direction(&self) -> [f64; 3] {
        self.frame.constraint()
    }

    /// Read-only view of the spin field.
    pub fn field(&self) -> &SpinField {
        &self.field
    }

    /// The material table the replica was built with.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }
}
