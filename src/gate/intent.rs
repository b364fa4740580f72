//! Intents for the passphrase gate.

use crate::mvi::Intent;

/// Intents that can be dispatched to the gate reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateIntent {
    /// One byte arrived from the input source.
    Byte(u8),
}

impl Intent for GateIntent {}
