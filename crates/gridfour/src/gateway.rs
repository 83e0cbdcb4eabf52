//! The engine's two outward-facing boundaries: presentation and
//! persistence.
//!
//! The engine never talks to a chat platform or a database directly. It
//! renders [`ViewContent`] payloads through a [`Presenter`] and appends
//! finished matches to a [`MatchStore`]; the embedder supplies both. Tests
//! inject in-memory fakes and assert on the recorded calls.

use gridfour_protocol::{
    ChannelId, ChoiceToken, MatchRecord, SurfaceId, UserId, ViewContent,
};

/// Errors from the presentation boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The platform connection is down or the request was refused.
    #[error("presentation boundary unavailable: {0}")]
    Unavailable(String),

    /// The surface no longer exists on the platform side.
    #[error("unknown surface {0}")]
    UnknownSurface(SurfaceId),
}

/// Errors from the match-record persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("match store write failed: {0}")]
    WriteFailed(String),

    #[error("match store read failed: {0}")]
    ReadFailed(String),
}

/// The presentation boundary.
///
/// A *surface* is one platform message the boundary maintains on the
/// engine's behalf. The engine holds only the [`SurfaceId`]; creating,
/// editing, and deleting the underlying message is the implementor's job.
pub trait Presenter: Send + Sync {
    /// Renders a new surface in `channel` and returns its handle.
    async fn send_view(
        &mut self,
        channel: ChannelId,
        content: ViewContent,
    ) -> Result<SurfaceId, GatewayError>;

    /// Replaces the content of an existing surface in place.
    async fn update_view(
        &mut self,
        surface: SurfaceId,
        content: ViewContent,
    ) -> Result<(), GatewayError>;

    /// Removes a surface.
    async fn delete_view(&mut self, surface: SurfaceId) -> Result<(), GatewayError>;

    /// Offers the given reaction tokens on a surface, in order.
    async fn attach_choices(
        &mut self,
        surface: SurfaceId,
        tokens: &[ChoiceToken],
    ) -> Result<(), GatewayError>;

    /// Posts a plain advisory text and returns its surface handle, so the
    /// caller can schedule it for removal.
    async fn send_notice(
        &mut self,
        channel: ChannelId,
        text: &str,
    ) -> Result<SurfaceId, GatewayError>;
}

/// The match-record persistence boundary. Append-only.
pub trait MatchStore: Send + Sync {
    async fn append(&mut self, record: MatchRecord) -> Result<(), StoreError>;

    async fn load_all(&self) -> Result<Vec<MatchRecord>, StoreError>;
}

/// Aggregate win/loss figures over the full record history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    /// All finished matches.
    pub total: usize,
    /// Matches where one seat was the solver-backed opponent.
    pub vs_ai: usize,
    /// AI-seated matches the AI won.
    pub ai_wins: usize,
}

impl MatchStats {
    /// Folds the record history into aggregate figures.
    ///
    /// `bot` is the user id the engine seats its solver-backed opponent
    /// under; a win counts for the AI when the winning seat holds that id.
    pub fn from_records(records: &[MatchRecord], bot: UserId) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            if record.vs_ai {
                stats.vs_ai += 1;
                // Records come from an external store; a corrupt seat
                // index must not take the statistics down with it.
                let ai_won = record
                    .winner
                    .seat()
                    .and_then(|seat| record.players.get(seat as usize))
                    .is_some_and(|winner| *winner == bot);
                if ai_won {
                    stats.ai_wins += 1;
                }
            }
        }
        stats
    }

    pub fn human_matches(&self) -> usize {
        self.total - self.vs_ai
    }

    /// AI win percentage over AI-seated matches, `None` when there were
    /// none.
    pub fn ai_win_rate(&self) -> Option<f64> {
        if self.vs_ai == 0 {
            None
        } else {
            Some(self.ai_wins as f64 * 100.0 / self.vs_ai as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use gridfour_protocol::MatchWinner;

    use super::*;

    const BOT: UserId = UserId(99);

    fn record(vs_ai: bool, winner: MatchWinner) -> MatchRecord {
        MatchRecord {
            channel: ChannelId(1),
            timestamp_ms: 0,
            players: [UserId(1), BOT],
            history: "44".into(),
            vs_ai,
            winner,
        }
    }

    #[test]
    fn test_stats_over_empty_history() {
        let stats = MatchStats::from_records(&[], BOT);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.ai_win_rate(), None);
    }

    #[test]
    fn test_stats_counts_ai_wins_by_identity_not_seat() {
        let records = [
            record(true, MatchWinner::Seat(1)), // bot seat wins
            record(true, MatchWinner::Seat(0)), // human seat wins
            record(true, MatchWinner::Draw),
            record(false, MatchWinner::Seat(0)),
        ];
        let stats = MatchStats::from_records(&records, BOT);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.vs_ai, 3);
        assert_eq!(stats.ai_wins, 1);
        assert_eq!(stats.human_matches(), 1);
    }

    #[test]
    fn test_corrupt_seat_index_counts_as_no_ai_win() {
        // The store is a boundary; a record with a seat outside 0..2 must
        // degrade to "not an AI win" rather than panic.
        let records = [
            record(true, MatchWinner::Seat(7)),
            record(true, MatchWinner::Seat(1)),
        ];
        let stats = MatchStats::from_records(&records, BOT);
        assert_eq!(stats.vs_ai, 2);
        assert_eq!(stats.ai_wins, 1);
    }

    #[test]
    fn test_ai_win_rate_is_percentage() {
        let records = [
            record(true, MatchWinner::Seat(1)),
            record(true, MatchWinner::Seat(0)),
        ];
        let stats = MatchStats::from_records(&records, BOT);
        assert_eq!(stats.ai_win_rate(), Some(50.0));
    }
}
