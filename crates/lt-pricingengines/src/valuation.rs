//! Valuation lattices and the early-exercise side channel.
//!
//! Every engine returns a [`LatticeValuation`]: the full valuation lattice
//! (node `(0, 0)` is the time-zero price) together with the nodes at which
//! early exercise was optimal.

use lt_core::{ensure, DiscountFactor, Error, Probability, Real, Result, Size};
use lt_instruments::{OptionType, VanillaOption};
use lt_methods::{backward_induction, Lattice};
use tracing::trace;

// ─── Exercise events ──────────────────────────────────────────────────────────

/// A node at which immediate exercise weakly dominates continuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseEvent {
    /// Time step.
    pub step: Size,
    /// State index (number of down-moves).
    pub state: Size,
    /// Underlying value at the node.
    pub underlying: Real,
    /// Discounted expected value of holding on.
    pub continuation: Real,
    /// Value of exercising now.
    pub exercise: Real,
}

// ─── LatticeValuation ─────────────────────────────────────────────────────────

/// A populated valuation lattice plus its exercise events.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeValuation {
    values: Lattice,
    option_type: Option<OptionType>,
    exercise: Vec<ExerciseEvent>,
}

impl LatticeValuation {
    /// Valuation of an American option; events are kept ordered by
    /// `(step, state)`.
    pub fn american(
        values: Lattice,
        option_type: OptionType,
        mut exercise: Vec<ExerciseEvent>,
    ) -> Self {
        exercise.sort_by_key(|e| (e.step, e.state));
        Self {
            values,
            option_type: Some(option_type),
            exercise,
        }
    }

    /// A valuation without early exercise.
    pub fn european(values: Lattice) -> Self {
        Self {
            values,
            option_type: None,
            exercise: Vec::new(),
        }
    }

    /// Time-zero value, node `(0, 0)`.
    pub fn npv(&self) -> Real {
        self.values.root()
    }

    /// The full valuation lattice.
    pub fn values(&self) -> &Lattice {
        &self.values
    }

    /// Take ownership of the valuation lattice.
    pub fn into_values(self) -> Lattice {
        self.values
    }

    /// All nodes where exercise was optimal, ordered by step then state.
    pub fn exercise_events(&self) -> &[ExerciseEvent] {
        &self.exercise
    }

    /// Whether exercise was optimal at node `(step, state)`.
    pub fn is_exercised(&self, step: Size, state: Size) -> bool {
        self.exercise
            .binary_search_by_key(&(step, state), |e| (e.step, e.state))
            .is_ok()
    }

    /// States at which exercise was optimal at `step`.
    pub fn exercise_states(&self, step: Size) -> Vec<Size> {
        self.exercise
            .iter()
            .filter(|e| e.step == step)
            .map(|e| e.state)
            .collect()
    }

    /// First step at which exercise is optimal in some state.
    pub fn earliest_exercise(&self) -> Option<Size> {
        self.exercise.first().map(|e| e.step)
    }

    /// For every step with an exercise node, the exercised state that
    /// borders the continuation region.
    ///
    /// That is the exercised node with the critical underlying value: the
    /// lowest underlying for a call, the highest for a put. Which side of
    /// the layer this falls on depends on the underlying, not on the state
    /// index: an asset call exercises in the low states, a put on a bond
    /// priced off short rates exercises in the low states too.
    pub fn exercise_boundary(&self) -> Vec<(Size, Size)> {
        let Some(option_type) = self.option_type else {
            return Vec::new();
        };
        let mut boundary: Vec<&ExerciseEvent> = Vec::new();
        for e in &self.exercise {
            match boundary.last_mut() {
                Some(last) if last.step == e.step => {
                    let closer = match option_type {
                        OptionType::Call => e.underlying < last.underlying,
                        OptionType::Put => e.underlying > last.underlying,
                    };
                    if closer {
                        *last = e;
                    }
                }
                _ => boundary.push(e),
            }
        }
        boundary.iter().map(|e| (e.step, e.state)).collect()
    }
}

// ─── Shared backward-induction kernels ────────────────────────────────────────

/// One-period simple discount factor `1 / (1 + r)` at node `(step, state)`
/// of a short-rate lattice.
pub(crate) fn simple_discount(rates: &Lattice, step: Size, state: Size) -> Result<DiscountFactor> {
    let rate = rates.value(step, state);
    let growth = 1.0 + rate;
    if !(growth.is_finite() && growth > 0.0) {
        return Err(Error::domain(
            step,
            state,
            format!("short rate {rate} gives a non-positive discount factor"),
        ));
    }
    Ok(1.0 / growth)
}

/// Check that a short-rate lattice covers `steps` steps of a claim.
pub(crate) fn ensure_covers(rates: &Lattice, steps: Size, what: &str) -> Result<()> {
    ensure!(
        steps <= rates.depth(),
        "{what} of {steps} steps exceeds short-rate lattice depth {}",
        rates.depth()
    );
    Ok(())
}

/// Roll an option on `underlying` back to the root.
///
/// `discount(i, j)` is the one-step discount factor at node `(i, j)`. For
/// American exercise every node before expiry takes the larger of
/// continuation and immediate exercise, and each node where exercise weakly
/// dominates is recorded.
pub(crate) fn rollback_option<D>(
    underlying: &Lattice,
    option: &VanillaOption,
    q: Probability,
    mut discount: D,
) -> Result<LatticeValuation>
where
    D: FnMut(Size, Size) -> Result<DiscountFactor>,
{
    let expiry = option.expiry_within(underlying.depth())?;
    let payoff = option.payoff;
    let american = option.exercise.is_american();
    let mut events = Vec::new();

    let values = backward_induction(
        expiry,
        |j| Ok(payoff.value(underlying.value(expiry, j))),
        |i, j, up, down| {
            let continuation = (q * up + (1.0 - q) * down) * discount(i, j)?;
            if !american {
                return Ok(continuation);
            }
            let s = underlying.value(i, j);
            let exercise = payoff.exercise_value(s);
            if exercise >= continuation {
                trace!(step = i, state = j, continuation, exercise, "early exercise optimal");
                events.push(ExerciseEvent {
                    step: i,
                    state: j,
                    underlying: s,
                    continuation,
                    exercise,
                });
                Ok(exercise)
            } else {
                Ok(continuation)
            }
        },
    )?;

    if american {
        Ok(LatticeValuation::american(values, payoff.option_type, events))
    } else {
        Ok(LatticeValuation::european(values))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
