use std::sync::atomic::AtomicBool;
use std::time::Instant;

use cmc_sim::constants::MU_B;
use cmc_sim::{
    init_cmc, run_replicas_parallel, CmcConfig, MagnetizationStatistic, Material, SpinField,
    UniaxialZeeman,
};

const N_SPINS: usize = 4096;
const N_TEMPS: usize = 8;
const N_SWEEPS: usize = 200;
const PHI: f64 = 45.0;
const THETA: f64 = 30.0;

fn main() {
    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 10.0 * (100.0f64).powf(i as f64 / (N_TEMPS - 1) as f64))
        .collect();

    let mut drivers: Vec<_> = temps
        .iter()
        .enumerate()
        .map(|(i, &temp)| {
            let config = CmcConfig::new(PHI, THETA, temp, 42 + i as u64);
            let oracle = UniaxialZeeman {
                k_u: 1.0e4,
                easy_axis: [0.0, 0.0, 1.0],
                h_ext: [0.0; 3],
                mu_s: MU_B,
            };
            init_cmc(
                config,
                SpinField::uniform_material(N_SPINS),
                oracle,
                vec![Material { mu_s: MU_B }],
            )
            .unwrap()
        })
        .collect();

    println!(
        "Spins: {N_SPINS}  |  Constraint: phi={PHI} theta={THETA}  |  Sweeps: {N_SWEEPS}"
    );

    let interrupted = AtomicBool::new(false);
    let start = Instant::now();
    let results = run_replicas_parallel(&mut drivers, N_SWEEPS, &interrupted).unwrap();
    let elapsed = start.elapsed().as_secs_f64();

    println!("Done in {elapsed:.2}s\n");
    println!(
        "{:>10}  {:>10}  {:>12}  {:>10}  {:>10}",
        "T (K)", "accept", "sphere", "M.c/N", "|m|"
    );
    for ((temp, driver), counters) in temps.iter().zip(&drivers).zip(&results) {
        let m = driver.magnetization();
        let c = driver.constraint_direction();
        let projected = (m[0] * c[0] + m[1] * c[1] + m[2] * c[2]) / N_SPINS as f64;
        let sphere_fraction = counters.sphere_rejects as f64 / counters.total() as f64;

        let mut stat = MagnetizationStatistic::new(driver.field(), driver.materials());
        stat.update(driver.field(), driver.materials());
        let reduced = stat.average()[0][3];

        println!(
            "{temp:>10.1}  {:>10.4}  {sphere_fraction:>12.4}  {projected:>10.4}  {reduced:>10.4}",
            counters.acceptance_ratio(),
        );
    }
}
