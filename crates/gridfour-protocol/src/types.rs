//! Identity newtypes and boundary payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A chat channel's platform-issued id.
///
/// Newtype over `u64` so a channel id can never be confused with a user or
/// surface id. `#[serde(transparent)]` keeps the wire shape a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A participant's platform-issued user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// Handle to a rendered surface (one message the presentation boundary
/// maintains on the engine's behalf).
///
/// The engine only stores these to know *which* surface to update or
/// remove; the surface's lifetime belongs to the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Channel kind
// ---------------------------------------------------------------------------

/// Where an inbound event originated.
///
/// A session established from a [`Direct`](ChannelKind::Direct) channel has
/// only one human available, so the engine seats its solver-backed opponent
/// as the second player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// A shared text channel with multiple potential participants.
    Group,
    /// A one-on-one channel between a single user and the bot.
    Direct,
}

// ---------------------------------------------------------------------------
// View payload
// ---------------------------------------------------------------------------

/// An opaque structured payload for one rendered surface.
///
/// Exact markup is a presentation concern; the engine only fills in a title
/// and a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewContent {
    pub title: String,
    pub body: String,
}

impl ViewContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Match records
// ---------------------------------------------------------------------------

/// Who won a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "seat")]
pub enum MatchWinner {
    /// The player in the given seat (0 = first-mover, 1 = second-mover).
    Seat(u8),
    /// Board filled with no run of four.
    Draw,
}

impl MatchWinner {
    /// The winning seat index, or `None` for a draw.
    pub fn seat(&self) -> Option<u8> {
        match self {
            Self::Seat(s) => Some(*s),
            Self::Draw => None,
        }
    }
}

/// One finished match, as written to the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The channel the session lived in.
    pub channel: ChannelId,
    /// Unix epoch milliseconds at round completion.
    pub timestamp_ms: u64,
    /// Seated players in seat order at round end.
    pub players: [UserId; 2],
    /// Column indices in play order, 1-indexed digits.
    pub history: String,
    /// Whether seat 1 was the solver-backed opponent.
    pub vs_ai: bool,
    pub winner: MatchWinner,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The ids are `#[serde(transparent)]`: a ChannelId(42) must serialize
    // as `42`, not `{"0":42}`, since collaborators store plain numbers.
    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&ChannelId(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&SurfaceId(3)).unwrap(), "3");
    }

    #[test]
    fn test_ids_deserialize_from_plain_numbers() {
        let id: UserId = serde_json::from_str("99").unwrap();
        assert_eq!(id, UserId(99));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ChannelId(1).to_string(), "C-1");
        assert_eq!(UserId(2).to_string(), "U-2");
        assert_eq!(SurfaceId(3).to_string(), "S-3");
    }

    #[test]
    fn test_match_winner_seat_accessor() {
        assert_eq!(MatchWinner::Seat(0).seat(), Some(0));
        assert_eq!(MatchWinner::Seat(1).seat(), Some(1));
        assert_eq!(MatchWinner::Draw.seat(), None);
    }

    #[test]
    fn test_match_winner_json_shape() {
        let json = serde_json::to_value(MatchWinner::Seat(1)).unwrap();
        assert_eq!(json["result"], "Seat");
        assert_eq!(json["seat"], 1);

        let json = serde_json::to_value(MatchWinner::Draw).unwrap();
        assert_eq!(json["result"], "Draw");
    }

    #[test]
    fn test_match_record_round_trip() {
        let record = MatchRecord {
            channel: ChannelId(5),
            timestamp_ms: 1_700_000_000_000,
            players: [UserId(1), UserId(2)],
            history: "4453".into(),
            vs_ai: false,
            winner: MatchWinner::Seat(0),
        };
        let bytes = serde_json::to_vec(&record).unwrap();
        let decoded: MatchRecord = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(record, decoded);
    }
}
