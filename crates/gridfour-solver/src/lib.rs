//! The solver-backed opponent.
//!
//! Given the move history of the current round (1-indexed column digits in
//! play order), [`MoveSolver::best_column`] returns the optimal column for
//! the side to move. The production implementation,
//! [`GamesolverClient`], delegates to an external position-solving
//! endpoint; the engine is generic over the trait so tests can inject
//! scripted solvers.
//!
//! # Score semantics
//!
//! The endpoint returns one signed score per column from the perspective
//! of the side to move, with one catch: the sentinel `100` marks a column
//! that hands the *other* side a certain win. Taken at face value it would
//! be the maximum of the vector, so the mover would steer straight into a
//! loss. [`pick_column`] sign-corrects the sentinel to `-100` before the
//! argmax, breaking ties toward the lowest column index.

#![allow(async_fn_in_trait)]

use serde::Deserialize;

/// Score the endpoint reports for a column that loses outright.
const LOSS_SENTINEL: i32 = 100;

/// Default solving endpoint.
const DEFAULT_BASE_URL: &str = "https://connect4.gamesolver.org";

/// The endpoint rejects requests without a browser-looking agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// Errors from the solver boundary.
///
/// These must propagate to whatever requested the move; silently playing
/// a default column would corrupt the match record.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The solving endpoint is unreachable or answered with an error
    /// status.
    #[error("solver upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The endpoint answered, but the score vector is unusable.
    #[error("malformed solver scores: {0}")]
    MalformedScores(String),
}

// Carries the message, not the reqwest error itself, so callers and test
// doubles are not coupled to the HTTP crate.
impl From<reqwest::Error> for SolverError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

/// A stateless adapter that picks the opponent's next column.
pub trait MoveSolver: Send + Sync {
    /// Returns the column (0-indexed) to play for the position reached by
    /// `history`.
    async fn best_column(&self, history: &str) -> Result<usize, SolverError>;
}

/// Selects the argmax column from a raw score vector.
///
/// Sentinel scores are sign-corrected first (see module docs); ties break
/// to the first occurrence of the maximum.
pub fn pick_column(scores: &[i32]) -> Result<usize, SolverError> {
    if scores.is_empty() {
        return Err(SolverError::MalformedScores(
            "empty score vector".into(),
        ));
    }
    let corrected = scores.iter().map(|&s| {
        if s == LOSS_SENTINEL { -LOSS_SENTINEL } else { s }
    });
    let (best, _) = corrected
        .enumerate()
        .fold(None::<(usize, i32)>, |acc, (col, score)| match acc {
            Some((_, top)) if top >= score => acc,
            _ => Some((col, score)),
        })
        .expect("non-empty scores");
    Ok(best)
}

/// Wire shape of the endpoint's answer. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct SolveResponse {
    score: Vec<i32>,
}

/// HTTP client for the external solving oracle.
#[derive(Debug, Clone)]
pub struct GamesolverClient {
    base_url: String,
    client: reqwest::Client,
}

impl GamesolverClient {
    /// Client against the public solving endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom endpoint (tests, self-hosted solver).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_scores(
        &self,
        history: &str,
    ) -> Result<Vec<i32>, SolverError> {
        let url = format!("{}/solve?pos={}", self.base_url, history);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?;
        let body: SolveResponse = response.json().await?;
        Ok(body.score)
    }
}

impl Default for GamesolverClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSolver for GamesolverClient {
    async fn best_column(&self, history: &str) -> Result<usize, SolverError> {
        let scores = self.fetch_scores(history).await?;
        tracing::debug!(position = %history, ?scores, "solver scores fetched");
        let column = pick_column(&scores)?;
        tracing::debug!(position = %history, column, "solver column selected");
        Ok(column)
    }
}
