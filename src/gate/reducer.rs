//! Reducer for the passphrase gate.

use crate::mvi::Reducer;

use super::intent::GateIntent;
use super::policy::{AttemptPolicy, GatePolicy};
use super::state::GateState;
use super::TERMINATOR;

/// Reducer for gate state transitions.
///
/// Pure function of its policy. Reporting outcomes, printing prompts and
/// exiting the process are handled by the caller around the dispatch call.
#[derive(Debug, Clone)]
pub struct GateReducer {
    policy: GatePolicy,
}

impl GateReducer {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    fn judge(&self, mut buffer: Vec<u8>, attempts_left: u32, overflowed: bool) -> GateState {
        if !overflowed && self.policy.matches(&buffer) {
            return GateState::Granted;
        }

        let remaining = match self.policy.attempt_policy() {
            AttemptPolicy::Compatible => {
                if attempts_left == 0 {
                    return GateState::Denied;
                }
                attempts_left - 1
            }
            AttemptPolicy::Exact => {
                if attempts_left <= 1 {
                    return GateState::Denied;
                }
                attempts_left - 1
            }
        };

        // Reuse the allocation; only the contents are reset.
        buffer.clear();
        GateState::Accumulating {
            buffer,
            attempts_left: remaining,
            overflowed: false,
        }
    }
}

impl Reducer for GateReducer {
    type State = GateState;
    type Intent = GateIntent;

    fn reduce(&self, state: Self::State, intent: Self::Intent) -> Self::State {
        match state {
            GateState::Accumulating {
                mut buffer,
                attempts_left,
                mut overflowed,
            } => match intent {
                GateIntent::Byte(TERMINATOR) => self.judge(buffer, attempts_left, overflowed),
                GateIntent::Byte(byte) => {
                    if self.policy.has_room(buffer.len()) {
                        buffer.push(byte);
                    } else {
                        overflowed = true;
                    }
                    GateState::Accumulating {
                        buffer,
                        attempts_left,
                        overflowed,
                    }
                }
            },
            terminal => terminal,
        }
    }
}
