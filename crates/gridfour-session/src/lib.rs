//! Per-channel game sessions for Gridfour.
//!
//! A [`GameSession`] is the live state of one game instance bound to one
//! channel: the roster, the board, whose turn it is, and the session's
//! lifecycle [`Phase`]. The [`SessionStore`] maps each channel to at most
//! one session.
//!
//! Sessions are deliberately I/O-free: every operation mutates state and
//! reports what happened; rendering, persistence, and the solver-backed
//! opponent live in the orchestration layer above.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{
    GameSession, LeaveOutcome, Phase, Placed, Player, RoundEnd,
};
pub use store::SessionStore;
