//! State for the passphrase gate.

use std::fmt;

use crate::gate::DEFAULT_ATTEMPTS;
use crate::mvi::State;

/// Gate state machine.
///
/// `Granted` and `Denied` are terminal: once reached, no input changes
/// the state again.
#[derive(Clone, PartialEq, Eq)]
pub enum GateState {
    /// Collecting the current line.
    Accumulating {
        /// Bytes of the line in progress, terminator excluded.
        buffer: Vec<u8>,
        /// Remaining failed attempts before denial.
        attempts_left: u32,
        /// The line exceeded the length cap; it can no longer match.
        overflowed: bool,
    },

    /// The secret was entered.
    Granted,

    /// The attempt budget was exhausted.
    Denied,
}

impl GateState {
    /// Fresh state with an empty buffer and `attempts` remaining.
    pub fn new(attempts: u32) -> Self {
        Self::Accumulating {
            buffer: Vec::new(),
            attempts_left: attempts,
            overflowed: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Granted | Self::Denied)
    }

    /// Remaining attempts, or `None` once the gate has decided.
    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            Self::Accumulating { attempts_left, .. } => Some(*attempts_left),
            _ => None,
        }
    }

    /// Length of the line in progress (zero in terminal states).
    pub fn buffered_len(&self) -> usize {
        match self {
            Self::Accumulating { buffer, .. } => buffer.len(),
            _ => 0,
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS)
    }
}

impl State for GateState {}

// Buffer contents may be a partially typed secret; never print them.
impl fmt::Debug for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accumulating {
                buffer,
                attempts_left,
                overflowed,
            } => f
                .debug_struct("Accumulating")
                .field("buffered", &buffer.len())
                .field("attempts_left", attempts_left)
                .field("overflowed", overflowed)
                .finish(),
            Self::Granted => f.write_str("Granted"),
            Self::Denied => f.write_str("Denied"),
        }
    }
}
