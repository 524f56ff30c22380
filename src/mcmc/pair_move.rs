use crate::constants::INV_MU_B;
use crate::energy::EnergyOracle;
use crate::error::CmcError;
use crate::field::{Material, SpinField};
use crate::frame::Frame;
use crate::rng::RandomSource;
use crate::vec3::normalize;

/// Outcome of a single pair-move trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trial {
    /// Both spins committed; the running magnetization has been updated.
    Accepted,
    /// Geometrically valid move that failed the modified Metropolis test.
    /// Both sites reverted.
    EnergyRejected,
    /// The compensated spin left the unit disk, or the same site was drawn
    /// twice. Site i reverted; site j untouched.
    SphereRejected,
}

/// Hemisphere selector with sign(0) = +1.
#[inline]
fn sign(z: f64) -> f64 {
    if z < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[inline]
fn check_finite(energy: f64, site: usize) -> Result<f64, CmcError> {
    if energy.is_finite() {
        Ok(energy)
    } else {
        Err(CmcError::OracleContractViolation { site, energy })
    }
}

/// One constrained pair-move trial.
///
/// Proposes a Gaussian move on a random site i, then a compensating move on a
/// random site j chosen so the two in-plane components of the magnetization
/// in the constraint frame are exactly conserved. Acceptance follows the
/// modified Metropolis rule
///
/// ```text
/// P = exp(−ΔE·β) · (Mz_new / Mz_old)² · |z_j / z_j′|
/// ```
///
/// with ΔE in μ_B·T, β = μ_B/(k_B·T), and z taken in the constraint frame.
/// A move is accepted iff Mz_new ≥ 0 and P ≥ U(0,1). On accept the running
/// magnetization is updated in place; on any reject the touched sites are
/// restored. `Mz_old = 0` is treated as an energy reject, never a division.
#[allow(clippy::too_many_arguments)]
pub(crate) fn pair_move<O: EnergyOracle>(
    field: &mut SpinField,
    oracle: &O,
    frame: &Frame,
    materials: &[Material],
    rng: &mut RandomSource,
    magnetization: &mut [f64; 3],
    beta: f64,
    greedy_accept: bool,
) -> Result<Trial, CmcError> {
    let n = field.n_sites();

    // First site: Gaussian kick on the current spin, then renormalize.
    let site1 = rng.index(n);
    let s1_old = field.snapshot(site1);
    let s1_old_cf = frame.to_cf(s1_old);

    let s1_new = normalize([
        s1_old[0] + rng.gaussian(),
        s1_old[1] + rng.gaussian(),
        s1_old[2] + rng.gaussian(),
    ]);
    let s1_new_cf = frame.to_cf(s1_new);

    let e_old = check_finite(oracle.site_energy(field, site1), site1)?;
    field.set(site1, s1_new);
    let e_new = match check_finite(oracle.site_energy(field, site1), site1) {
        Ok(e) => e,
        Err(err) => {
            field.restore(site1, s1_old);
            return Err(err);
        }
    };
    let delta_e1 = (e_new - e_old) * materials[field.material_id(site1)].mu_s * INV_MU_B;

    // Second site: compensate so the in-plane magnetization is unchanged.
    let site2 = rng.index(n);
    let s2_old = field.snapshot(site2);
    let s2_old_cf = frame.to_cf(s2_old);

    let s2x = s1_old_cf[0] + s2_old_cf[0] - s1_new_cf[0];
    let s2y = s1_old_cf[1] + s2_old_cf[1] - s1_new_cf[1];
    let planar = s2x * s2x + s2y * s2y;

    // Strict < keeps z_j' away from zero, so the Jacobian below stays finite.
    if planar >= 1.0 || site2 == site1 {
        field.restore(site1, s1_old);
        return Ok(Trial::SphereRejected);
    }

    let s2z = sign(s2_old_cf[2]) * (1.0 - planar).sqrt();
    let s2_new = frame.to_lab([s2x, s2y, s2z]);

    let e_old = match check_finite(oracle.site_energy(field, site2), site2) {
        Ok(e) => e,
        Err(err) => {
            field.restore(site1, s1_old);
            return Err(err);
        }
    };
    field.set(site2, s2_new);
    let e_new = match check_finite(oracle.site_energy(field, site2), site2) {
        Ok(e) => e,
        Err(err) => {
            field.restore(site2, s2_old);
            field.restore(site1, s1_old);
            return Err(err);
        }
    };
    let delta_e2 = (e_new - e_old) * materials[field.material_id(site2)].mu_s * INV_MU_B;

    let delta_e = delta_e1 + delta_e2;

    // Projection of the running magnetization before and after the move.
    let dm = [
        s1_new[0] + s2_new[0] - s1_old[0] - s2_old[0],
        s1_new[1] + s2_new[1] - s1_old[1] - s2_old[1],
        s1_new[2] + s2_new[2] - s1_old[2] - s2_old[2],
    ];
    let mz_old = frame.project(*magnetization);
    let mz_new = frame.project([
        magnetization[0] + dm[0],
        magnetization[1] + dm[1],
        magnetization[2] + dm[2],
    ]);

    let accepted = if mz_old == 0.0 {
        false
    } else if greedy_accept && delta_e < 0.0 {
        true
    } else {
        let weight = (mz_new / mz_old) * (mz_new / mz_old);
        let jacobian = (s2_old_cf[2] / s2z).abs();
        let probability = (-delta_e * beta).exp() * weight * jacobian;
        probability >= rng.uniform() && mz_new >= 0.0
    };

    if accepted {
        magnetization[0] += dm[0];
        magnetization[1] += dm[1];
        magnetization[2] += dm[2];
        Ok(Trial::Accepted)
    } else {
        field.restore(site1, s1_old);
        field.restore(site2, s2_old);
        Ok(Trial::EnergyRejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::ZeroField;
    use crate::vec3::norm;

    const BETA_300K: f64 = crate::constants::MU_B / (crate::constants::K_B * 300.0);

    fn aligned_setup(n: usize, phi: f64, theta: f64) -> (SpinField, Frame, [f64; 3]) {
        let frame = Frame::new(phi, theta);
        let d = frame.constraint();
        let mut field = SpinField::uniform_material(n);
        for i in 0..n {
            field.set(i, d);
        }
        let m = [d[0] * n as f64, d[1] * n as f64, d[2] * n as f64];
        (field, frame, m)
    }

    fn snapshot_all(field: &SpinField) -> Vec<[f64; 3]> {
        field.iter().copied().collect()
    }

    fn changed_sites(before: &[[f64; 3]], field: &SpinField) -> usize {
        before
            .iter()
            .enumerate()
            .filter(|(i, s)| field.get(*i) != **s)
            .count()
    }

    #[test]
    fn test_pair_locality() {
        let (mut field, frame, mut m) = aligned_setup(50, 45.0, 30.0);
        let materials = [Material { mu_s: 1.5e-23 }];
        let mut rng = RandomSource::from_seed(11);

        let mut seen_accept = false;
        let mut seen_sphere = false;
        let mut seen_energy = false;
        for _ in 0..2000 {
            let before = snapshot_all(&field);
            let trial = pair_move(
                &mut field,
                &ZeroField,
                &frame,
                &materials,
                &mut rng,
                &mut m,
                BETA_300K,
                false,
            )
            .unwrap();
            match trial {
                Trial::Accepted => {
                    assert_eq!(changed_sites(&before, &field), 2);
                    seen_accept = true;
                }
                Trial::SphereRejected => {
                    assert_eq!(changed_sites(&before, &field), 0);
                    seen_sphere = true;
                }
                Trial::EnergyRejected => {
                    assert_eq!(changed_sites(&before, &field), 0);
                    seen_energy = true;
                }
            }
        }
        assert!(seen_accept);
        assert!(seen_sphere);
        assert!(seen_energy);
    }

    #[test]
    fn test_inplane_conservation_on_accept() {
        let (mut field, frame, mut m) = aligned_setup(40, 120.0, 250.0);
        let materials = [Material { mu_s: 1.5e-23 }];
        let mut rng = RandomSource::from_seed(5);

        let mut accepts = 0;
        for _ in 0..5000 {
            let before = field.total_magnetization();
            let trial = pair_move(
                &mut field,
                &ZeroField,
                &frame,
                &materials,
                &mut rng,
                &mut m,
                BETA_300K,
                false,
            )
            .unwrap();
            if trial == Trial::Accepted {
                let after = field.total_magnetization();
                let dm_cf = frame.to_cf([
                    after[0] - before[0],
                    after[1] - before[1],
                    after[2] - before[2],
                ]);
                assert!(dm_cf[0].abs() < 1e-10, "in-plane x drift {}", dm_cf[0]);
                assert!(dm_cf[1].abs() < 1e-10, "in-plane y drift {}", dm_cf[1]);
                accepts += 1;
            }
        }
        assert!(accepts > 100);
    }

    #[test]
    fn test_unit_norms_preserved() {
        let (mut field, frame, mut m) = aligned_setup(30, 45.0, 30.0);
        let materials = [Material { mu_s: 1.5e-23 }];
        let mut rng = RandomSource::from_seed(23);

        for _ in 0..3000 {
            pair_move(
                &mut field,
                &ZeroField,
                &frame,
                &materials,
                &mut rng,
                &mut m,
                BETA_300K,
                false,
            )
            .unwrap();
        }
        for s in field.iter() {
            assert!((norm(*s) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_single_site_always_sphere_rejects() {
        let (mut field, frame, mut m) = aligned_setup(1, 0.0, 0.0);
        let materials = [Material { mu_s: 1.5e-23 }];
        let mut rng = RandomSource::from_seed(9);

        for _ in 0..100 {
            let trial = pair_move(
                &mut field,
                &ZeroField,
                &frame,
                &materials,
                &mut rng,
                &mut m,
                BETA_300K,
                false,
            )
            .unwrap();
            assert_eq!(trial, Trial::SphereRejected);
        }
        assert_eq!(field.get(0), frame.constraint());
    }

    /// Finite while the spin sits on the constraint direction, NaN once moved.
    struct PoisonedOracle {
        home: [f64; 3],
    }

    impl EnergyOracle for PoisonedOracle {
        fn site_energy(&self, field: &SpinField, i: usize) -> f64 {
            if field.get(i) == self.home {
                0.0
            } else {
                f64::NAN
            }
        }
    }

    #[test]
    fn test_oracle_violation_reverts_provisional_move() {
        let (mut field, frame, mut m) = aligned_setup(20, 45.0, 30.0);
        let materials = [Material { mu_s: 1.5e-23 }];
        let mut rng = RandomSource::from_seed(2);
        let oracle = PoisonedOracle {
            home: frame.constraint(),
        };

        let before = snapshot_all(&field);
        let err = pair_move(
            &mut field,
            &oracle,
            &frame,
            &materials,
            &mut rng,
            &mut m,
            BETA_300K,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CmcError::OracleContractViolation { .. }));
        assert_eq!(changed_sites(&before, &field), 0);
    }
}
