/// Read-only per-material parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Atomic magnetic moment μ_s in joules per tesla.
    pub mu_s: f64,
}

/// Storage for the spin ensemble.
///
/// One unit 3-vector and one immutable material index per site. The site
/// count is fixed for the lifetime of a run; only the integrator mutates
/// spins, through provisional `set` / `restore` pairs.
pub struct SpinField {
    spins: Vec<[f64; 3]>,
    material_ids: Vec<usize>,
}

impl SpinField {
    /// Create a field from per-site material indices; spins start along +z
    /// (the driver re-initializes them along the constraint direction).
    pub fn new(material_ids: Vec<usize>) -> Self {
        let spins = vec![[0.0, 0.0, 1.0]; material_ids.len()];
        Self {
            spins,
            material_ids,
        }
    }

    /// Single-material convenience: `n_sites` sites, all of material 0.
    pub fn uniform_material(n_sites: usize) -> Self {
        Self::new(vec![0; n_sites])
    }

    /// Number of sites.
    #[inline]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    /// Read the spin at site `i`.
    #[inline]
    pub fn get(&self, i: usize) -> [f64; 3] {
        self.spins[i]
    }

    /// Write the spin at site `i`. The caller keeps ‖s‖ = 1.
    #[inline]
    pub fn set(&mut self, i: usize, s: [f64; 3]) {
        self.spins[i] = s;
    }

    /// Copy of the spin at site `i`, taken before a provisional move.
    #[inline]
    pub fn snapshot(&self, i: usize) -> [f64; 3] {
        self.spins[i]
    }

    /// Undo a provisional move on site `i`.
    #[inline]
    pub fn restore(&mut self, i: usize, s: [f64; 3]) {
        self.spins[i] = s;
    }

    /// Material index of site `i`.
    #[inline]
    pub fn material_id(&self, i: usize) -> usize {
        self.material_ids[i]
    }

    /// Iterate over all spins.
    pub fn iter(&self) -> impl Iterator<Item = &[f64; 3]> {
        self.spins.iter()
    }

    /// Lab-frame sum Σᵢ sᵢ, recomputed from scratch.
    pub fn total_magnetization(&self) -> [f64; 3] {
        let mut m = [0.0; 3];
        for s in &self.spins {
            m[0] += s[0];
            m[1] += s[1];
            m[2] += s[2];
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_restore() {
        let mut field = SpinField::uniform_material(4);
        let before = field.snapshot(2);
        field.set(2, [1.0, 0.0, 0.0]);
        assert_eq!(field.get(2), [1.0, 0.0, 0.0]);
        field.restore(2, before);
        assert_eq!(field.get(2), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_material_ids() {
        let field = SpinField::new(vec![0, 1, 1, 0]);
        assert_eq!(field.n_sites(), 4);
        assert_eq!(field.material_id(1), 1);
        assert_eq!(field.material_id(3), 0);
    }

    #[test]
    fn test_total_magnetization() {
        let mut field = SpinField::uniform_material(3);
        field.set(0, [1.0, 0.0, 0.0]);
        let m = field.total_magnetization();
        assert_eq!(m, [1.0, 0.0, 2.0]);
    }
}
