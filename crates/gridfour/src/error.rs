//! Unified error type for the Gridfour engine.

use gridfour_session::SessionError;
use gridfour_solver::SolverError;

use crate::gateway::{GatewayError, StoreError};

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `gridfour` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GridfourError {
    /// A session-level error (phase, roster, placement).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A solver-boundary error (upstream unreachable, bad scores).
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// A presentation-boundary error (send, update, delete).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A match-record persistence error.
    #[error(transparent)]
    Store(#[from] StoreError),
}
