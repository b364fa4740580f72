//! Model-View-Intent (MVI) primitives.
//!
//! State machines in this crate are expressed as pure reducers so every
//! transition can be tested without threads or terminals.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Outcome
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
