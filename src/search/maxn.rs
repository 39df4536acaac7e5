//! max^n search with a transposition memo.
//!
//! Every node returns a full score vector; the player to move picks the
//! child that is best at their own index, first found on ties. The
//! searcher owns working copies of the board and player state and plays
//! moves on them in place, with one reusable frame of scratch buffers per
//! ply so the tree walk does not allocate once the buffers have grown.

use std::fmt::Write;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Scores, MAX_PLAYERS};
use crate::game_state::player_state::PlayerState;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_command::Move;
use crate::move_generation::transition::{Transition, Verdict};
use crate::moves::move_descriptions::{MoveKey, PseudoMove};
use crate::search::board_scoring::BoardScorer;
use crate::search::threading::StopSignal;
use crate::search::transposition_table::{key_hash, KeyPolicy, TTStats, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: MoveKey,
    pub scores: Scores,
    pub depth: u32,
    pub nodes: u64,
    /// No line reached the depth limit, so deeper searches cannot differ.
    pub exhaustive: bool,
    pub tt_stats: TTStats,
}

#[derive(Debug, Default)]
struct SearchFrame {
    moves: Vec<PseudoMove>,
}

pub struct MaxnSearcher<S: BoardScorer> {
    board: Board,
    players: PlayerState,
    scorer: S,
    policy: KeyPolicy,
    tt: TranspositionTable,
    frames: Vec<SearchFrame>,
    key: String,
    stop: Option<StopSignal>,
    nodes: u64,
    horizon_hit: bool,
}

impl<S: BoardScorer> MaxnSearcher<S> {
    /// The board must have fresh move indices.
    pub fn new(board: Board, players: PlayerState, scorer: S, policy: KeyPolicy) -> Self {
        Self {
            board,
            players,
            scorer,
            policy,
            tt: TranspositionTable::with_capacity(1 << 12),
            frames: Vec::new(),
            key: String::new(),
            stop: None,
            nodes: 0,
            horizon_hit: false,
        }
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Searches `depth` plies and returns the best move for the player to
    /// move. The working position is restored before returning, even when
    /// the search is cancelled.
    pub fn search_root(&mut self, depth: u32) -> ChessResult<SearchOutcome> {
        if self.players.is_game_over() {
            return Err(ChessError::NoMoveFound);
        }
        let depth = depth.max(1);
        // Terminal transitions can add up to one ply per player beyond depth.
        let frame_count = depth as usize + MAX_PLAYERS + 1;
        if self.frames.len() < frame_count {
            self.frames.resize_with(frame_count, SearchFrame::default);
        }
        self.nodes = 0;
        self.horizon_hit = false;

        let result = self.expand(depth, 0);
        if let Some(stop) = &self.stop {
            stop.add_nodes(self.nodes);
        }
        let (scores, best) = result?;
        let best = best.ok_or(ChessError::NoMoveFound)?;
        Ok(SearchOutcome {
            best_move: best.key(),
            scores,
            depth,
            nodes: self.nodes,
            exhaustive: !self.horizon_hit,
            tt_stats: self.tt.stats(),
        })
    }

    #[inline]
    fn poll(&self) -> ChessResult<()> {
        match &self.stop {
            Some(stop) if stop.should_stop() => Err(ChessError::SearchCancelled),
            _ => Ok(()),
        }
    }

    fn frame(&mut self, ply: usize) -> &mut SearchFrame {
        if ply >= self.frames.len() {
            self.frames.resize_with(ply + 1, SearchFrame::default);
        }
        &mut self.frames[ply]
    }

    /// Rebuilds the canonical key in the shared buffer and hashes it.
    fn position_key(&mut self, depth: u32) -> u64 {
        self.key.clear();
        self.board.write_canonical_key(&mut self.key);
        self.players.write_canonical_key(&mut self.key);
        if self.policy == KeyPolicy::PositionAndDepth {
            let _ = write!(self.key, "#{depth}");
        }
        key_hash(&self.key)
    }

    fn search(&mut self, depth: u32, ply: usize) -> ChessResult<Scores> {
        self.poll()?;
        self.nodes += 1;

        let key = self.position_key(depth);
        if let Some(scores) = self.tt.probe(key) {
            return Ok(scores);
        }

        let scores = if self.players.is_game_over() {
            self.scorer.score(&self.board, &self.players)
        } else if depth == 0 {
            self.horizon_hit = true;
            self.scorer.score(&self.board, &self.players)
        } else {
            self.expand(depth, ply)?.0
        };

        self.tt.store(key, scores);
        Ok(scores)
    }

    fn expand(&mut self, depth: u32, ply: usize) -> ChessResult<(Scores, Option<PseudoMove>)> {
        let mover = self.players.current();
        let mut moves = std::mem::take(&mut self.frame(ply).moves);
        moves.clear();
        if self.board.has_king(mover) {
            moves.extend(self.board.moves_for(mover).iter().filter(|m| !m.is_ally_defense()));
        }
        let result = self.expand_moves(&moves, mover, depth, ply);
        self.frames[ply].moves = moves;
        result
    }

    fn expand_moves(
        &mut self,
        moves: &[PseudoMove],
        mover: Color,
        depth: u32,
        ply: usize,
    ) -> ChessResult<(Scores, Option<PseudoMove>)> {
        let mut best: Option<(Scores, PseudoMove)> = None;
        let mut stale = false;

        for candidate in moves {
            let mv = Move::from_pseudo(&self.board, candidate, None)?;
            mv.execute(&mut self.board)?;
            self.board.recompute_moves();
            if is_in_check(&self.board, mover) {
                mv.undo(&mut self.board)?;
                stale = true;
                continue;
            }

            // A plain advance never eliminates, so the indices stay valid.
            let mut transition = Transition::advance(&self.players);
            transition.execute(&mut self.players, &mut self.board);
            let child = self.search(depth - 1, ply + 1);
            transition.undo(&mut self.players, &mut self.board);
            mv.undo(&mut self.board)?;
            self.board.recompute_moves();
            stale = false;

            let child = child?;
            if best.map_or(true, |(scores, _)| child[mover] > scores[mover]) {
                best = Some((child, *candidate));
            }
        }
        if stale {
            self.board.recompute_moves();
        }

        if let Some((scores, mv)) = best {
            return Ok((scores, Some(mv)));
        }

        let verdict = if !self.board.has_king(mover) || is_in_check(&self.board, mover) {
            Verdict::CHECKMATE
        } else {
            Verdict::STALEMATE
        };
        let mut terminal = Transition::new(&self.players, verdict);
        terminal.execute(&mut self.players, &mut self.board);
        self.board.recompute_moves();
        let scores = self.search(depth, ply + 1);
        terminal.undo(&mut self.players, &mut self.board);
        self.board.recompute_moves();
        Ok((scores?, None))
    }
}
