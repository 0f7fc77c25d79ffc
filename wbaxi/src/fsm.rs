//! Finite state machine (Mealy machine).
//!
//! A module is described by one function that, given the current-cycle forward input, the
//! current-cycle backward input and the registered state, produces the current-cycle outputs and
//! the next-cycle state. [`Instance`] samples the state, evaluates the function once, and commits
//! the next state only if evaluation succeeded, so no component ever observes a value written in
//! the same cycle.

use std::fmt;

/// Interface between two modules.
///
/// Forward signals flow from the producer to the consumer; backward signals flow the other way
/// (ready, stall, responses).
pub trait Interface {
    /// Forward signals.
    type Fwd: fmt::Debug + Clone;

    /// Backward signals.
    type Bwd: fmt::Debug + Clone;
}

/// Forward signals of the interface `I`.
pub type Fwd<I> = <I as Interface>::Fwd;

/// Backward signals of the interface `I`.
pub type Bwd<I> = <I as Interface>::Bwd;

/// Finite state machine (Mealy machine) between an ingress interface `I` and an egress
/// interface `O`.
pub trait Fsm {
    /// Ingress interface.
    type I: Interface;

    /// Egress interface.
    type O: Interface;

    /// Registers.
    type S: fmt::Debug + Clone;

    /// Error returned when the inputs of a cycle cannot be accepted.
    type Error;

    /// Initial value of the registers.
    fn init(&self) -> Self::S;

    /// Computes the egress forward signals, the ingress backward signals and the next state.
    fn logic(
        &self, i_fwd: &Fwd<Self::I>, o_bwd: &Bwd<Self::O>, state: &Self::S,
    ) -> Result<(Fwd<Self::O>, Bwd<Self::I>, Self::S), Self::Error>;
}

/// A clocked instance of an FSM.
pub struct Instance<F: Fsm> {
    module: F,
    state: F::S,
    cycle: u64,
}

impl<F: Fsm> Instance<F> {
    /// Creates a new instance in its reset state.
    pub fn new(module: F) -> Self {
        let state = module.init();
        Self { module, state, cycle: 0 }
    }

    /// Advances one clock cycle.
    ///
    /// On error the registers keep their current value and the cycle counter does not advance.
    pub fn tick(&mut self, i_fwd: &Fwd<F::I>, o_bwd: &Bwd<F::O>) -> Result<(Fwd<F::O>, Bwd<F::I>), F::Error> {
        let (o_fwd, i_bwd, state_next) = self.module.logic(i_fwd, o_bwd, &self.state)?;
        self.state = state_next;
        self.cycle += 1;
        tracing::trace!(cycle = self.cycle, "committed");
        Ok((o_fwd, i_bwd))
    }

    /// Returns the registers.
    pub fn state(&self) -> &F::S { &self.state }

    /// Returns the number of committed cycles since reset.
    pub fn cycle(&self) -> u64 { self.cycle }

    /// Returns to the reset state.
    pub fn reset(&mut self) {
        self.state = self.module.init();
        self.cycle = 0;
    }
}

impl<F: Fsm + fmt::Debug> fmt::Debug for Instance<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("module", &self.module)
            .field("cycle", &self.cycle)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Accumulator;

    #[derive(Debug)]
    struct Stream;

    impl Interface for Stream {
        type Bwd = ();
        type Fwd = u32;
    }

    impl Fsm for Accumulator {
        type Error = &'static str;
        type I = Stream;
        type O = Stream;
        type S = u32;

        fn init(&self) -> u32 { 0 }

        fn logic(&self, i_fwd: &u32, _o_bwd: &(), state: &u32) -> Result<(u32, (), u32), Self::Error> {
            let next = state.checked_add(*i_fwd).ok_or("overflow")?;
            Ok((*state, (), next))
        }
    }

    #[test]
    fn outputs_come_from_the_sampled_state() {
        let mut inst = Instance::new(Accumulator);
        assert_eq!(inst.tick(&3, &()).unwrap().0, 0);
        assert_eq!(inst.tick(&4, &()).unwrap().0, 3);
        assert_eq!(*inst.state(), 7);
        assert_eq!(inst.cycle(), 2);
    }

    #[test]
    fn failed_cycle_commits_nothing() {
        let mut inst = Instance::new(Accumulator);
        inst.tick(&u32::MAX, &()).unwrap();
        assert!(inst.tick(&1, &()).is_err());
        assert_eq!(*inst.state(), u32::MAX);
        assert_eq!(inst.cycle(), 1);

        inst.reset();
        assert_eq!(*inst.state(), 0);
        assert_eq!(inst.cycle(), 0);
    }
}
