use crate::vec3::dot;

/// Rotation pair mapping the lab frame onto the constraint frame.
///
/// The constraint frame is the orthonormal frame whose z axis is the
/// constraint direction d = (sinφ cosθ, sinφ sinθ, cosφ). The matrices are
/// built once as `R = R_y(φ) · R_z(θ)` and kept as fixed-size arrays; every
/// per-trial product is nine multiplies and six adds.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    rot: [[f64; 3]; 3],
    rot_tp: [[f64; 3]; 3],
    /// Third row of `rot`; equals the constraint direction d.
    constraint: [f64; 3],
}

impl Frame {
    /// Build the rotation pair for the constraint angles in degrees.
    pub fn new(phi_deg: f64, theta_deg: f64) -> Self {
        let (sin_p, cos_p) = phi_deg.to_radians().sin_cos();
        let (sin_t, cos_t) = theta_deg.to_radians().sin_cos();

        let rot_y = [
            [cos_p, 0.0, -sin_p],
            [0.0, 1.0, 0.0],
            [sin_p, 0.0, cos_p],
        ];
        let rot_z = [
            [cos_t, sin_t, 0.0],
            [-sin_t, cos_t, 0.0],
            [0.0, 0.0, 1.0],
        ];

        let rot = mat_mul(&rot_y, &rot_z);
        let rot_tp = transpose(&rot);
        let constraint = rot[2];

        Self {
            rot,
            rot_tp,
            constraint,
        }
    }

    /// Map a lab-frame vector into the constraint frame.
    #[inline]
    pub fn to_cf(&self, v: [f64; 3]) -> [f64; 3] {
        mat_vec(&self.rot, v)
    }

    /// Map a constraint-frame vector back into the lab frame.
    #[inline]
    pub fn to_lab(&self, v: [f64; 3]) -> [f64; 3] {
        mat_vec(&self.rot_tp, v)
    }

    /// The constraint direction d in lab coordinates (unit vector).
    #[inline]
    pub fn constraint(&self) -> [f64; 3] {
        self.constraint
    }

    /// Projection of a lab-frame vector onto the constraint direction.
    #[inline]
    pub fn project(&self, v: [f64; 3]) -> f64 {
        dot(v, self.constraint)
    }
}

#[inline]
fn mat_vec(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn mat_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (row, a_row) in a.iter().enumerate() {
        for col in 0..3 {
            out[row][col] = a_row[0] * b[0][col] + a_row[1] * b[1][col] + a_row[2] * b[2][col];
        }
    }
    out
}

fn transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (row, m_row) in m.iter().enumerate() {
        for col in 0..3 {
            out[col][row] = m_row[col];
        }
    }
    out
}
