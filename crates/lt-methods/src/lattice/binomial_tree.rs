//! Forward construction of multiplicative binomial state lattices.
//!
//! The same primitive builds the underlying-asset lattice (root = spot,
//! `u = exp(σ√Δt)`, `d = 1/u`) and the short-rate lattice (root = `r0`,
//! arbitrary `u`, `d`).

use lt_core::{ensure, Real, Result, Size};
use tracing::debug;

use super::Lattice;

/// Build the lattice `S(i, j) = root · u^(i − j) · d^j` for `0 ≤ j ≤ i ≤ N`.
///
/// Filled layer by layer from the recombination property: the top node of
/// layer `i` is an up-move from the top node of layer `i − 1`, every other
/// node is a down-move from its upper-left neighbour. O(N²) multiplications.
///
/// # Errors
/// [`lt_core::Error::InvalidConfiguration`] if `steps == 0`, `up ≤ 0`,
/// `down ≤ 0` or any input is not finite.
pub fn build_price_lattice(up: Real, down: Real, steps: Size, root: Real) -> Result<Lattice> {
    ensure!(steps > 0, "number of steps must be at least 1");
    ensure!(
        up.is_finite() && up > 0.0,
        "up multiplier must be positive and finite, got {up}"
    );
    ensure!(
        down.is_finite() && down > 0.0,
        "down multiplier must be positive and finite, got {down}"
    );
    ensure!(root.is_finite(), "root value must be finite, got {root}");

    let mut nodes: Vec<Real> = Vec::with_capacity(Lattice::node_count(steps));
    nodes.push(root);
    let mut prev = 0;
    for i in 1..=steps {
        let top = nodes[prev] * up;
        nodes.push(top);
        for j in 1..=i {
            let v = nodes[prev + j - 1] * down;
            nodes.push(v);
        }
        prev += i;
    }

    debug!(steps, root, up, down, "built price lattice");
    Ok(Lattice::from_nodes(steps, nodes))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lt_core::Error;
    use proptest::prelude::*;

    #[test]
    fn two_step_lattice_by_hand() {
        let l = build_price_lattice(1.1, 0.9, 2, 100.0).unwrap();
        assert_eq!(l.depth(), 2);
        assert_relative_eq!(l.value(0, 0), 100.0);
        assert_relative_eq!(l.value(1, 0), 110.0, max_relative = 1e-14);
        assert_relative_eq!(l.value(1, 1), 90.0, max_relative = 1e-14);
        assert_relative_eq!(l.value(2, 0), 121.0, max_relative = 1e-14);
        assert_relative_eq!(l.value(2, 1), 99.0, max_relative = 1e-14);
        assert_relative_eq!(l.value(2, 2), 81.0, max_relative = 1e-14);
    }

    #[test]
    fn short_rate_lattice_matches_closed_form() {
        let l = build_price_lattice(1.1, 0.9, 10, 0.05).unwrap();
        assert_relative_eq!(l.value(10, 0), 0.05 * 1.1_f64.powi(10), max_relative = 1e-13);
        assert_relative_eq!(l.value(10, 10), 0.05 * 0.9_f64.powi(10), max_relative = 1e-13);
        assert_relative_eq!(
            l.value(7, 3),
            0.05 * 1.1_f64.powi(4) * 0.9_f64.powi(3),
            max_relative = 1e-13
        );
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        for (u, d, n) in [(1.1, 0.9, 0), (0.0, 0.9, 5), (1.1, -0.9, 5), (Real::NAN, 0.9, 5)] {
            assert!(
                matches!(build_price_lattice(u, d, n, 1.0), Err(Error::InvalidConfiguration(_))),
                "u={u}, d={d}, n={n} should be rejected"
            );
        }
    }

    proptest! {
        #[test]
        fn recombines_to_closed_form(
            up in 1.0001f64..1.5,
            down in 0.5f64..0.9999,
            steps in 1usize..40,
            root in 0.01f64..500.0,
        ) {
            let l = build_price_lattice(up, down, steps, root).unwrap();
            for (i, j, v) in l.iter() {
                let expected = root * up.powi((i - j) as i32) * down.powi(j as i32);
                prop_assert!((v - expected).abs() <= 1e-10 * expected.abs().max(1.0),
                    "node ({}, {}): {} vs {}", i, j, v, expected);
            }
        }
    }
}
