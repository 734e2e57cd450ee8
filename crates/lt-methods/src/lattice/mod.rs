//! Recombining lattices.
//!
//! # Overview
//!
//! * [`Lattice`] — immutable triangular array of node values indexed by
//!   `(step, state)`, stored in a single arena
//! * [`build_price_lattice`] — forward propagation of up/down multipliers
//!   from a root value (asset prices, short rates)
//! * [`backward_induction`] — the traversal every pricer is built on
//!
//! Node `(i, j)` is the state reached after `i` moves of which `j` are
//! down-moves. Its two successors are `(i + 1, j)` (up) and
//! `(i + 1, j + 1)` (down).

pub mod binomial_tree;

pub use binomial_tree::build_price_lattice;

use lt_core::{ensure, Error, Real, Result, Size};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::Serialize;

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// A recombining triangular lattice of depth `N`.
///
/// Holds `(N + 1)(N + 2) / 2` values; layer `i` has `i + 1` nodes and
/// starts at arena offset `i (i + 1) / 2`. A lattice never changes once
/// built, so it can be shared freely between threads.
///
/// With the `serde` feature a lattice serializes for diagnostics; it is
/// only ever rebuilt through the constructors, never deserialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Lattice {
    depth: Size,
    nodes: Vec<Real>,
}

#[inline]
fn offset(step: Size) -> usize {
    step * (step + 1) / 2
}

impl Lattice {
    /// Number of nodes in a lattice of the given depth.
    pub fn node_count(depth: Size) -> usize {
        offset(depth + 1)
    }

    /// Build a lattice by evaluating `f(i, j)` at every node.
    pub fn from_fn(depth: Size, mut f: impl FnMut(Size, Size) -> Real) -> Self {
        let mut nodes = Vec::with_capacity(Self::node_count(depth));
        for i in 0..=depth {
            for j in 0..=i {
                nodes.push(f(i, j));
            }
        }
        Self { depth, nodes }
    }

    /// Fallible variant of [`Lattice::from_fn`]; stops at the first error.
    pub fn try_from_fn(
        depth: Size,
        mut f: impl FnMut(Size, Size) -> Result<Real>,
    ) -> Result<Self> {
        let mut nodes = Vec::with_capacity(Self::node_count(depth));
        for i in 0..=depth {
            for j in 0..=i {
                nodes.push(f(i, j)?);
            }
        }
        Ok(Self { depth, nodes })
    }

    /// Rebuild a lattice from its layers, as produced by a forward pass.
    pub(crate) fn from_nodes(depth: Size, nodes: Vec<Real>) -> Self {
        debug_assert_eq!(nodes.len(), Self::node_count(depth));
        Self { depth, nodes }
    }

    /// Depth `N` (number of time steps).
    pub fn depth(&self) -> Size {
        self.depth
    }

    /// Value at node `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i > depth` or `j > i`.
    pub fn value(&self, i: Size, j: Size) -> Real {
        assert!(
            i <= self.depth && j <= i,
            "node ({i}, {j}) outside lattice of depth {}",
            self.depth
        );
        self.nodes[offset(i) + j]
    }

    /// Value at node `(i, j)`, or `None` outside the triangle.
    pub fn get(&self, i: Size, j: Size) -> Option<Real> {
        (i <= self.depth && j <= i).then(|| self.nodes[offset(i) + j])
    }

    /// All node values at step `i`, ordered by state index.
    pub fn layer(&self, i: Size) -> &[Real] {
        &self.nodes[offset(i)..offset(i + 1)]
    }

    /// Value at the root node `(0, 0)`.
    pub fn root(&self) -> Real {
        self.nodes[0]
    }

    /// The top `depth` steps of this lattice.
    ///
    /// Layers are stored contiguously, so this is a prefix copy.
    pub fn sub_lattice(&self, depth: Size) -> Result<Self> {
        ensure!(
            depth <= self.depth,
            "sub-lattice depth {depth} exceeds lattice depth {}",
            self.depth
        );
        Ok(Self {
            depth,
            nodes: self.nodes[..Self::node_count(depth)].to_vec(),
        })
    }

    /// Iterate over `(i, j, value)` for every node, step by step.
    pub fn iter(&self) -> impl Iterator<Item = (Size, Size, Real)> + '_ {
        (0..=self.depth).flat_map(move |i| {
            self.layer(i)
                .iter()
                .enumerate()
                .map(move |(j, &v)| (i, j, v))
        })
    }
}

impl Index<(Size, Size)> for Lattice {
    type Output = Real;

    fn index(&self, (i, j): (Size, Size)) -> &Real {
        assert!(
            i <= self.depth && j <= i,
            "node ({i}, {j}) outside lattice of depth {}",
            self.depth
        );
        &self.nodes[offset(i) + j]
    }
}

// ─── Backward induction ───────────────────────────────────────────────────────

fn finite(step: Size, state: Size, value: Real) -> Result<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::domain(step, state, format!("non-finite node value {value}")))
    }
}

/// Populate a valuation lattice from its terminal layer back to the root.
///
/// * `terminal(j)` — value at node `(depth, j)`
/// * `step(i, j, up, down)` — value at node `(i, j)` given the values of
///   its successors `(i + 1, j)` and `(i + 1, j + 1)`
///
/// Every node must be finite; the first non-finite value fails with
/// [`Error::NumericalDomain`] at that node. Closures may also fail on their
/// own (negative discount factors, hazard rates outside `[0, 1]`).
pub fn backward_induction<T, S>(depth: Size, mut terminal: T, mut step: S) -> Result<Lattice>
where
    T: FnMut(Size) -> Result<Real>,
    S: FnMut(Size, Size, Real, Real) -> Result<Real>,
{
    ensure!(depth > 0, "lattice depth must be at least 1, got {depth}");

    let mut nodes = vec![0.0; Lattice::node_count(depth)];
    let base = offset(depth);
    for j in 0..=depth {
        nodes[base + j] = finite(depth, j, terminal(j)?)?;
    }

    for i in (0..depth).rev() {
        let (head, tail) = nodes.split_at_mut(offset(i + 1));
        let next = &tail[..i + 2];
        let current = &mut head[offset(i)..];
        for j in 0..=i {
            current[j] = finite(i, j, step(i, j, next[j], next[j + 1])?)?;
        }
    }

    Ok(Lattice { depth, nodes })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
