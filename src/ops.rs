//! Reflections over dense real state vectors.
//!
//! Every function here leaves its inputs untouched and returns a fresh
//! vector of the same length. Both Grover operators are instances of
//! [`reflect_about`], so they preserve the Euclidean norm.

use ndarray::Array1;

/// Inner product of two equal-length vectors.
pub fn dot(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dot of vectors with different lengths");
    a.dot(b)
}

/// Euclidean length of `v`.
pub fn norm(v: &Array1<f64>) -> f64 {
    dot(v, v).sqrt()
}

/// Reflect `v` across the hyperplane orthogonal to the unit vector `axis`.
///
/// Computes `v - 2 (v . axis) axis`.
pub fn reflect_about(v: &Array1<f64>, axis: &Array1<f64>) -> Array1<f64> {
    let projection = 2.0 * dot(v, axis);
    v - &(axis * projection)
}

/// Phase-flip the component of `state` along the one-hot `marked` vector.
pub fn oracle(state: &Array1<f64>, marked: &Array1<f64>) -> Array1<f64> {
    reflect_about(state, marked)
}

/// Inversion about the mean: `2 u (u . state) - state`.
pub fn diffusion(state: &Array1<f64>, uniform: &Array1<f64>) -> Array1<f64> {
    -reflect_about(state, uniform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn isclose(a: &Array1<f64>, b: &Array1<f64>) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < TOL)
    }

    fn uniform(n: usize) -> Array1<f64> {
        Array1::from_elem(n, 1.0 / (n as f64).sqrt())
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&array![1.0, 2.0, 3.0], &array![4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&array![1.0, 0.0], &array![0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_reflect_flips_axis_component() {
        // Reflecting about x negates x and keeps y
        let v = array![0.6, 0.8];
        let r = reflect_about(&v, &array![1.0, 0.0]);
        assert!(isclose(&r, &array![-0.6, 0.8]));
    }

    #[test]
    fn test_reflect_does_not_mutate_inputs() {
        let v = array![0.6, 0.8];
        let axis = array![0.0, 1.0];
        let _ = reflect_about(&v, &axis);
        assert_eq!(v, array![0.6, 0.8]);
        assert_eq!(axis, array![0.0, 1.0]);
    }

    #[test]
    fn test_oracle_negates_marked_amplitude() {
        let state = uniform(4);
        let marked = array![0.0, 0.0, 1.0, 0.0];
        let out = oracle(&state, &marked);
        assert!(isclose(&out, &array![0.5, 0.5, -0.5, 0.5]));
    }

    #[test]
    fn test_diffusion_inverts_about_mean() {
        // Mean of [0.5, 0.5, -0.5, 0.5] is 0.25: 2*0.25 - a
        let state = array![0.5, 0.5, -0.5, 0.5];
        let out = diffusion(&state, &uniform(4));
        assert!(isclose(&out, &array![0.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_diffusion_fixes_uniform_state() {
        let u = uniform(8);
        assert!(isclose(&diffusion(&u, &u), &u));
    }

    #[test]
    fn test_oracle_self_inverse() {
        let state = array![0.1, 0.7, -0.3, 0.2, 0.5, -0.1, 0.2, 0.2];
        let state = &state / norm(&state);
        let mut marked = Array1::zeros(8);
        marked[5] = 1.0;
        let twice = oracle(&oracle(&state, &marked), &marked);
        assert!(isclose(&twice, &state));
    }

    #[test]
    fn test_diffusion_self_inverse() {
        let state = array![0.1, 0.7, -0.3, 0.2, 0.5, -0.1, 0.2, 0.2];
        let state = &state / norm(&state);
        let u = uniform(8);
        let twice = diffusion(&diffusion(&state, &u), &u);
        assert!(isclose(&twice, &state));
    }

    fn unit_pair(len: usize) -> impl Strategy<Value = (Array1<f64>, Array1<f64>)> {
        let component = -1.0f64..1.0;
        (
            prop::collection::vec(component.clone(), len),
            prop::collection::vec(component, len),
        )
            .prop_filter_map("non-degenerate vectors", |(v, a)| {
                let (v, a) = (Array1::from_vec(v), Array1::from_vec(a));
                let (nv, na) = (norm(&v), norm(&a));
                (nv > 1e-3 && na > 1e-3).then(|| (&v / nv, &a / na))
            })
    }

    proptest! {
        #[test]
        fn prop_reflection_preserves_norm((v, axis) in (1usize..64).prop_flat_map(unit_pair)) {
            let r = reflect_about(&v, &axis);
            prop_assert!((norm(&r) - 1.0).abs() < TOL);
        }

        #[test]
        fn prop_reflection_is_involution((v, axis) in (1usize..64).prop_flat_map(unit_pair)) {
            let back = reflect_about(&reflect_about(&v, &axis), &axis);
            prop_assert!(isclose(&back, &v));
        }
    }
}
