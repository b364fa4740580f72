//! Passphrase gate feature module.
//!
//! Interprets a byte stream as newline-delimited attempts against a fixed
//! secret, with a retry budget.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Gate state enum (Accumulating → Granted | Denied)
//! - `intent.rs` - Input events (a byte arrived)
//! - `policy.rs` - Immutable parameters (secret, attempt policy, line cap)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `controller.rs` - Owns the state and maps transitions to outcomes

mod controller;
mod intent;
mod policy;
mod reducer;
mod state;

pub use controller::{GateController, GateOutcome};
pub use intent::GateIntent;
pub use policy::{AttemptPolicy, GatePolicy};
pub use reducer::GateReducer;
pub use state::GateState;

/// Byte that ends one attempt.
pub const TERMINATOR: u8 = b'\n';

/// Attempts granted when nothing else is configured.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Line length cap when nothing else is configured.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;
