//! Stateful driver around [`GateReducer`].

use crate::mvi::Reducer;

use super::intent::GateIntent;
use super::policy::GatePolicy;
use super::reducer::GateReducer;
use super::state::GateState;

/// Result of feeding one byte to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Keep reading: the byte was buffered or a wrong line was rejected.
    Continue,
    /// The secret was entered.
    Grant,
    /// The attempt budget is exhausted.
    Deny,
}

/// Owns the gate state and applies one byte at a time.
///
/// Driven from a single task; the reader's channel is the only way bytes
/// reach it, so the buffer and counter need no lock.
#[derive(Debug)]
pub struct GateController {
    reducer: GateReducer,
    state: GateState,
}

impl GateController {
    /// Build a controller around an injected initial state.
    pub fn new(policy: GatePolicy, state: GateState) -> Self {
        Self {
            reducer: GateReducer::new(policy),
            state,
        }
    }

    pub fn on_character(&mut self, byte: u8) -> GateOutcome {
        let state = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(state, GateIntent::Byte(byte));
        self.outcome()
    }

    /// Outcome implied by the current state.
    pub fn outcome(&self) -> GateOutcome {
        match self.state {
            GateState::Granted => GateOutcome::Grant,
            GateState::Denied => GateOutcome::Deny,
            GateState::Accumulating { .. } => GateOutcome::Continue,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn attempts_left(&self) -> Option<u32> {
        self.state.attempts_left()
    }

    pub fn buffered_len(&self) -> usize {
        self.state.buffered_len()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn policy(&self) -> &GatePolicy {
        self.reducer.policy()
    }
}
