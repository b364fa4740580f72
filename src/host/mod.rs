//! Host side of the gate: runs a session on the event loop, reports
//! progress to observers, manages the terminal mode, and launches the
//! command a grant unlocks.

mod launcher;
mod observer;
mod session;
mod terminal_guard;

pub use launcher::{LaunchError, LaunchStatus, Launcher};
pub use observer::{ConsolePrompt, GateObserver, TracingObserver};
pub use session::{GateSession, SessionError, SessionResult};
pub use terminal_guard::{enter_raw_mode, TerminalGuard};
