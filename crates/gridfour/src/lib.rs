//! # Gridfour
//!
//! A reaction-driven Connect Four engine for chat platforms.
//!
//! The engine owns game state and rules; the embedder owns the platform.
//! Inbound messages and reactions flow into an [`EventRouter`], which
//! validates them and drives a [`GameMaster`] holding one session per
//! channel. Outbound effects go through two traits the embedder
//! implements: [`Presenter`] (render, edit, and delete surfaces) and
//! [`MatchStore`] (append finished matches). The opponent for direct
//! channels comes from a [`MoveSolver`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gridfour::{EventRouter, GameMaster, GamesolverClient, UserId};
//!
//! // Implement Presenter and MatchStore for your platform, then:
//! // let master = GameMaster::new(presenter, store, GamesolverClient::new(), UserId(BOT_ID));
//! // let mut router = EventRouter::new(master);
//! // loop {
//! //     tokio::select! {
//! //         Some(event) = events.recv() => { /* router.on_command / on_choice */ }
//! //         surface = router.master_mut().notices_mut().expired() => {
//! //             router.master_mut().delete_notice(surface).await?;
//! //         }
//! //     }
//! // }
//! ```

#![allow(async_fn_in_trait)]

mod error;
pub mod gateway;
mod master;
mod router;
pub mod view;

pub use error::GridfourError;
pub use gateway::{GatewayError, MatchStats, MatchStore, Presenter, StoreError};
pub use master::GameMaster;
pub use router::EventRouter;

pub use gridfour_autodelete::{DeleteQueue, DEFAULT_NOTICE_TTL};
pub use gridfour_board::{Board, Outcome, Piece};
pub use gridfour_protocol::{
    ChannelId, ChannelKind, ChoiceToken, Command, MatchRecord, MatchWinner,
    SurfaceId, UserId, ViewContent, COLUMN_COUNT,
};
pub use gridfour_session::{
    GameSession, LeaveOutcome, Phase, Placed, Player, RoundEnd, SessionError,
    SessionStore,
};
pub use gridfour_solver::{
    pick_column, GamesolverClient, MoveSolver, SolverError,
};

/// Installs a `tracing` subscriber reading `RUST_LOG`, defaulting to
/// `info`. Call once at startup; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
