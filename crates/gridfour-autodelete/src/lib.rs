//! Delayed removal of transient advisory surfaces.
//!
//! Advisory notices ("a session already exists here", farewell messages)
//! should disappear on their own after a fixed delay rather than pile up
//! in the channel. [`DeleteQueue`] tracks when each notice is due; the
//! embedder awaits [`DeleteQueue::expired`] in its event loop and performs
//! the actual `delete_view` call when a surface comes due.
//!
//! # Integration
//!
//! The queue is designed to sit in a `tokio::select!` loop next to the
//! inbound event stream. While the queue is empty, `expired` pends
//! forever, so the select's other branches run undisturbed:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(event) = events.recv() => router.dispatch(event).await,
//!         surface = master.notices_mut().expired() => {
//!             master.delete_notice(surface).await?;
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use gridfour_protocol::SurfaceId;
use tokio::time::{self, Instant};

/// How long an advisory notice stays visible by default.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(30);

/// A queue of surfaces scheduled for deletion.
///
/// Not a background task: the embedder drives it by awaiting
/// [`expired`](Self::expired). Entries are few (one per recent advisory),
/// so due-date lookup is a linear scan.
#[derive(Debug, Default)]
pub struct DeleteQueue {
    pending: Vec<(Instant, SurfaceId)>,
}

impl DeleteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `surface` for deletion after `delay`.
    pub fn push(&mut self, surface: SurfaceId, delay: Duration) {
        let due = Instant::now() + delay;
        self.pending.push((due, surface));
        tracing::debug!(%surface, delay_secs = delay.as_secs(), "notice scheduled for deletion");
    }

    /// Unschedules a surface (e.g., it was deleted for another reason).
    ///
    /// Returns `true` if an entry was removed.
    pub fn cancel(&mut self, surface: SurfaceId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, s)| *s != surface);
        before != self.pending.len()
    }

    /// Waits until the next scheduled surface comes due and returns it.
    ///
    /// Pends forever while the queue is empty, so it is safe to park in a
    /// `select!` branch.
    pub async fn expired(&mut self) -> SurfaceId {
        let Some(idx) = self.next_due() else {
            // Nothing scheduled: never resolve, let select! run its
            // other branches.
            std::future::pending::<()>().await;
            unreachable!()
        };
        let (due, _) = self.pending[idx];
        time::sleep_until(due).await;
        // Re-pick the minimum in case entries were mutated while parked.
        let idx = self.next_due().unwrap_or(idx);
        let (_, surface) = self.pending.swap_remove(idx);
        tracing::debug!(%surface, "notice expired");
        surface
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn next_due(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, _))| *due)
            .map(|(idx, _)| idx)
    }
}
