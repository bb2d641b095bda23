use nalgebra::{Matrix3, Vector3};

const MAX_SWEEPS: usize = 50;
const OFF_DIAGONAL_THRESHOLD: f64 = 1e-12;

/// Eigen-decomposition of a symmetric 3×3 matrix by cyclic Jacobi rotations.
///
/// Each sweep zeroes the largest off-diagonal element; iteration stops once
/// every off-diagonal magnitude falls below `1e-12` or after 50 sweeps.
/// Returns the eigenvalues and the matrix whose columns are the corresponding
/// eigenvectors. The input must be symmetric; only the upper triangle is
/// trusted for pivot selection.
pub fn jacobi_eigen_symmetric(mut a: Matrix3<f64>) -> (Vector3<f64>, Matrix3<f64>) {
    let mut vectors = Matrix3::identity();

    for _ in 0..MAX_SWEEPS {
        let (mut p, mut q) = (0, 1);
        let mut max_offdiag = a[(p, q)].abs();
        for i in 0..3 {
            for j in (i + 1)..3 {
                let val = a[(i, j)].abs();
                if val > max_offdiag {
                    max_offdiag = val;
                    p = i;
                    q = j;
                }
            }
        }
        if max_offdiag < OFF_DIAGONAL_THRESHOLD {
            break;
        }

        let phi = 0.5 * (2.0 * a[(p, q)]).atan2(a[(q, q)] - a[(p, p)]);
        let c = phi.cos();
        let s = phi.sin();

        let app = c * c * a[(p, p)] - 2.0 * s * c * a[(p, q)] + s * s * a[(q, q)];
        let aqq = s * s * a[(p, p)] + 2.0 * s * c * a[(p, q)] + c * c * a[(q, q)];
        a[(p, p)] = app;
        a[(q, q)] = aqq;
        a[(p, q)] = 0.0;
        a[(q, p)] = 0.0;

        for k in 0..3 {
            if k == p || k == q {
                continue;
            }
            let akp = c * a[(k, p)] - s * a[(k, q)];
            let akq = s * a[(k, p)] + c * a[(k, q)];
            a[(k, p)] = akp;
            a[(p, k)] = akp;
            a[(k, q)] = akq;
            a[(q, k)] = akq;
        }

        for k in 0..3 {
            let vkp = c * vectors[(k, p)] - s * vectors[(k, q)];
            let vkq = s * vectors[(k, p)] + c * vectors[(k, q)];
            vectors[(k, p)] = vkp;
            vectors[(k, q)] = vkq;
        }
    }

    (Vector3::new(a[(0, 0)], a[(1, 1)], a[(2, 2)]), vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonal_matrix_is_its_own_decomposition() {
        let m = Matrix3::from_diagonal(&Vector3::new(3.0, 1.0, 2.0));
        let (values, vectors) = jacobi_eigen_symmetric(m);
        assert_relative_eq!(values, Vector3::new(3.0, 1.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(vectors, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn reconstructs_symmetric_matrix() {
        let m = Matrix3::new(2.0, 1.0, 0.5, 1.0, 3.0, 0.25, 0.5, 0.25, 1.5);
        let (values, vectors) = jacobi_eigen_symmetric(m);
        let reconstructed = vectors * Matrix3::from_diagonal(&values) * vectors.transpose();
        assert_relative_eq!(reconstructed, m, epsilon = 1e-9);
    }

    #[test]
    fn eigenvectors_are_orthonormal() {
        let m = Matrix3::new(4.0, -1.0, 0.2, -1.0, 2.0, 0.7, 0.2, 0.7, 5.0);
        let (_, vectors) = jacobi_eigen_symmetric(m);
        let gram = vectors.transpose() * vectors;
        assert_relative_eq!(gram, Matrix3::identity(), epsilon = 1e-9);
    }

    #[test]
    fn rank_deficient_matrix_yields_zero_eigenvalue() {
        // Covariance of collinear points: rank 1.
        let d = Vector3::new(1.0, 2.0, -1.0);
        let m = d * d.transpose();
        let (values, _) = jacobi_eigen_symmetric(m);
        let mut sorted = [values.x, values.y, values.z];
        sorted.sort_by(f64::total_cmp);
        assert_relative_eq!(sorted[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(sorted[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(sorted[2], d.norm_squared(), epsilon = 1e-9);
    }
}
