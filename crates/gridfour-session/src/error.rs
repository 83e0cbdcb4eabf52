//! Error types for the session layer.

use gridfour_protocol::{ChannelId, UserId};

use crate::Phase;

/// Errors that can occur during session operations.
///
/// The event router treats most of these as protocol errors (stale client
/// view) and silently discards the triggering event; they are real errors
/// only for programmatic callers.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The channel already has an active session.
    #[error("channel {0} already has an active session")]
    AlreadyExists(ChannelId),

    /// No session exists for the channel.
    #[error("no session in channel {0}")]
    NotFound(ChannelId),

    /// Both seats are taken.
    #[error("both seats in channel {0} are taken")]
    RosterFull(ChannelId),

    /// The user already holds a seat in this session.
    #[error("user {0} is already seated")]
    AlreadySeated(UserId),

    /// The user holds no seat in this session.
    #[error("user {0} is not seated")]
    NotSeated(UserId),

    /// The requested column is outside the board.
    #[error("column {0} is out of range")]
    IllegalColumn(usize),

    /// The operation is not valid in the session's current phase.
    #[error("operation requires phase {expected}, session is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    /// The operation requires exactly two seated players.
    #[error("operation requires exactly two seated players")]
    RosterIncomplete,
}
