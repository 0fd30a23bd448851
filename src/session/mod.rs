//! Session driver: scoring state, the round state machine and the
//! per-round countdown.

pub mod driver;
pub mod state;
pub mod timer;

pub use driver::{GamePhase, Round, RoundOutcome, RoundReport, Session};
pub use state::{SessionState, LEVEL_STEP, STRIKE_LIMIT};
pub use timer::Countdown;
