use std::sync::atomic::AtomicBool;

use rayon::prelude::*;

use crate::energy::EnergyOracle;
use crate::error::CmcError;
use crate::simulation::CmcDriver;
use crate::statistics::TrialCounters;

/// Run `n_sweeps` sweeps on every replica, replicas in parallel.
///
/// Each driver owns its spin field, random source and counters, so replicas
/// share nothing; trials inside a replica remain strictly sequential. Results
/// are the counters accumulated by this call, one entry per driver, in input
/// order. For a single replica the call is made directly, skipping rayon
/// thread-pool overhead.
///
/// `interrupted` is polled by every replica between its sweeps; on
/// interruption the first error ([`CmcError::Cancelled`]) is returned and
/// each replica's field is left in its last accepted state.
pub fn run_replicas_parallel<O: EnergyOracle + Send + Sync>(
    drivers: &mut [CmcDriver<O>],
    n_sweeps: usize,
    interrupted: &AtomicBool,
) -> Result<Vec<TrialCounters>, CmcError> {
    if drivers.len() == 1 {
        return Ok(vec![drivers[0].run(n_sweeps, interrupted, &|| {})?]);
    }

    let results: Vec<Result<TrialCounters, CmcError>> = drivers
        .par_iter_mut()
        .map(|driver| driver.run(n_sweeps, interrupted, &|| {}))
        .collect();

    results.into_iter().collect()
}
