//! Skid buffer for valid-ready channels.
//!
//! The buffer accepts one more item than its consumer can take in the same cycle. The ingress
//! ready is the negation of a register (the temp slot is empty), so the producer sees no
//! combinational path from the consumer. The egress does not depend on the consumer's ready,
//! which lets the consumer compute its ready from the offered value.

use crate::{Ready, Valid};

/// Skid buffer's state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct State<V> {
    /// Temp register of skid buffer.
    pub temp: Valid<V>,
}

impl<V> State<V> {
    /// Returns whether the temp register holds an item.
    pub fn is_occupied(&self) -> bool { self.temp.valid }
}

/// Returns the item offered downstream: the temp register if occupied, else the ingress item.
pub fn egress<V: Clone>(i_fwd: &Valid<V>, state: &State<V>) -> Valid<V> {
    if state.temp.valid {
        state.temp.clone()
    } else {
        i_fwd.clone()
    }
}

/// Skid buffer's logic.
pub fn logic<V: Clone>(i_fwd: &Valid<V>, o_bwd: &Ready, state: &State<V>) -> (Valid<V>, Ready, State<V>) {
    let o_fwd = egress(i_fwd, state);
    let i_bwd = Ready::new(!state.temp.valid);

    // Computes control path predicates.
    let store_int_to_temp = i_fwd.fire(i_bwd) && !o_bwd.ready;
    let store_temp_to_output = state.temp.valid && o_bwd.ready;

    let temp_next = if store_int_to_temp {
        i_fwd.clone()
    } else if store_temp_to_output {
        Valid::new(false, state.temp.inner.clone())
    } else {
        state.temp.clone()
    };

    (o_fwd, i_bwd, State { temp: temp_next })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks the buffer once, returning the egress, the ingress ready and the next state.
    fn tick(i_fwd: Valid<u32>, ready: bool, state: &State<u32>) -> (Valid<u32>, Ready, State<u32>) {
        logic(&i_fwd, &Ready::new(ready), state)
    }

    #[test]
    fn passes_through_when_ready() {
        let (o_fwd, i_bwd, state) = tick(Valid::valid(1), true, &State::default());
        assert_eq!(o_fwd, Valid::valid(1));
        assert!(i_bwd.ready);
        assert!(!state.is_occupied());
    }

    #[test]
    fn captures_on_stall_and_drains() {
        let (_, _, state) = tick(Valid::valid(1), false, &State::default());
        assert!(state.is_occupied());
        assert_eq!(egress(&Valid::valid(2), &state), Valid::valid(1));

        // A new ingress item is ignored while the slot is occupied.
        let (o_fwd, i_bwd, state) = tick(Valid::valid(2), false, &state);
        assert_eq!(o_fwd, Valid::valid(1));
        assert!(!i_bwd.ready);

        let (o_fwd, i_bwd, state) = tick(Valid::valid(2), true, &state);
        assert_eq!(o_fwd, Valid::valid(1));
        assert!(!i_bwd.ready);
        assert!(!state.is_occupied());

        let (o_fwd, i_bwd, _) = tick(Valid::valid(2), true, &state);
        assert_eq!(o_fwd, Valid::valid(2));
        assert!(i_bwd.ready);
    }

    #[test]
    fn idle_input_keeps_slot_empty() {
        let (o_fwd, _, state) = tick(Valid::invalid(), false, &State::default());
        assert!(!o_fwd.valid);
        assert!(!state.is_occupied());
    }
}
