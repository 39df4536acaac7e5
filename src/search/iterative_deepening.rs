//! Iterative deepening of the max^n searcher against a wall-clock budget.
//!
//! Each depth runs on its own worker thread with a private copy of the
//! position. The driver waits for either the worker's result or the
//! deadline; on timeout it raises the stop signal, joins the worker and
//! keeps the deepest completed result. A cancelled depth is discarded.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::player_state::PlayerState;
use crate::moves::move_descriptions::MoveKey;
use crate::search::board_scoring::BoardScorer;
use crate::search::maxn::{MaxnSearcher, SearchOutcome};
use crate::search::threading::StopSignal;
use crate::search::transposition_table::KeyPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u32,
    /// First depth attempted.
    pub min_depth: u32,
    pub movetime_ms: u64,
    pub key_policy: KeyPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            min_depth: 2,
            movetime_ms: 1000,
            key_policy: KeyPolicy::PositionAndDepth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepeningResult {
    pub best_move: MoveKey,
    /// Result of the deepest completed depth.
    pub outcome: SearchOutcome,
    /// Nodes across every attempt, cancelled ones included.
    pub total_nodes: u64,
    pub timed_out: bool,
}

pub fn iterative_deepening_search<S>(
    board: &Board,
    players: &PlayerState,
    scorer: &S,
    config: &SearchConfig,
) -> ChessResult<DeepeningResult>
where
    S: BoardScorer + Clone + 'static,
{
    let started = Instant::now();
    let deadline = started + Duration::from_millis(config.movetime_ms);
    let first_depth = config.min_depth.min(config.max_depth).max(1);

    let mut best: Option<SearchOutcome> = None;
    let mut total_nodes = 0u64;
    let mut timed_out = false;

    for depth in first_depth..=config.max_depth.max(1) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            timed_out = true;
            break;
        }

        let stop = StopSignal::new();
        let mut searcher = MaxnSearcher::new(board.clone(), players.clone(), scorer.clone(), config.key_policy)
            .with_stop_signal(stop.clone());
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("maxn-depth-{depth}"))
            .spawn(move || {
                // The receiver is gone only if the driver already gave up.
                let _ = tx.send(searcher.search_root(depth));
            })
            .map_err(|err| ChessError::Internal(format!("failed to spawn search thread: {err}")))?;

        let received = rx.recv_timeout(remaining);
        if matches!(received, Err(RecvTimeoutError::Timeout)) {
            stop.request_stop();
        }
        let joined = handle.join();
        total_nodes += stop.nodes_visited();

        match received {
            Ok(Ok(outcome)) => {
                debug!(
                    depth,
                    nodes = outcome.nodes,
                    best_move = %outcome.best_move,
                    exhaustive = outcome.exhaustive,
                    tt_hits = outcome.tt_stats.hits,
                    "depth completed"
                );
                let exhaustive = outcome.exhaustive;
                best = Some(outcome);
                if exhaustive {
                    debug!(depth, "tree exhausted, stopping early");
                    break;
                }
            }
            Ok(Err(err)) => {
                warn!(depth, error = %err, "search attempt failed");
                return Err(err);
            }
            Err(RecvTimeoutError::Timeout) => {
                info!(depth, elapsed_ms = started.elapsed().as_millis() as u64, "deadline reached, attempt cancelled");
                timed_out = true;
                break;
            }
            Err(RecvTimeoutError::Disconnected) => {
                let reason = if joined.is_err() { "panicked" } else { "exited without a result" };
                return Err(ChessError::Internal(format!("search thread for depth {depth} {reason}")));
            }
        }
    }

    let outcome = best.ok_or(ChessError::NoMoveFound)?;
    info!(
        depth = outcome.depth,
        best_move = %outcome.best_move,
        total_nodes,
        timed_out,
        "search finished"
    );
    Ok(DeepeningResult {
        best_move: outcome.best_move,
        outcome,
        total_nodes,
        timed_out,
    })
}
