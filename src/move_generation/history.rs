//! Linear undo/redo over played plies.
//!
//! Each entry is one ply: the move, the transition that passed the turn,
//! and any terminal transitions settled right after it (a player left
//! without legal moves is mated or stalemated before anyone else moves).
//! Executing a new ply discards the redo tail.

use arrayvec::ArrayVec;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::MAX_PLAYERS;
use crate::game_state::player_state::PlayerState;
use crate::move_generation::move_command::Move;
use crate::move_generation::transition::{Transition, Verdict};

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub transition: Transition,
    pub followups: ArrayVec<Transition, MAX_PLAYERS>,
    /// Verdict for the player to move once the whole entry is applied.
    pub status: Verdict,
}

impl HistoryEntry {
    fn apply(&mut self, board: &mut Board, players: &mut PlayerState) -> ChessResult<()> {
        self.mv.execute(board)?;
        self.transition.execute(players, board);
        for followup in &mut self.followups {
            followup.execute(players, board);
        }
        board.recompute_moves();
        Ok(())
    }

    fn revert(&self, board: &mut Board, players: &mut PlayerState) -> ChessResult<()> {
        for followup in self.followups.iter().rev() {
            followup.undo(players, board);
        }
        self.transition.undo(players, board);
        self.mv.undo(board)?;
        board.recompute_moves();
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays `mv` then `transition`, truncates the redo tail and appends.
    /// A failing move has written nothing, so the position is unchanged.
    pub fn execute(
        &mut self,
        board: &mut Board,
        players: &mut PlayerState,
        mv: Move,
        transition: Transition,
    ) -> ChessResult<()> {
        let mut entry = HistoryEntry {
            mv,
            transition,
            followups: ArrayVec::new(),
            status: Verdict::default(),
        };
        entry.apply(board, players)?;
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor += 1;
        Ok(())
    }

    /// Applies a terminal transition and records it on the latest entry so
    /// it is undone and redone together with that ply.
    pub fn settle(&mut self, board: &mut Board, players: &mut PlayerState, mut transition: Transition) -> ChessResult<()> {
        let entry = self
            .cursor
            .checked_sub(1)
            .and_then(|idx| self.entries.get_mut(idx))
            .ok_or(ChessError::NoHistory)?;
        if entry.followups.is_full() {
            return Err(ChessError::Internal("too many terminal transitions in one ply".into()));
        }
        transition.execute(players, board);
        entry.followups.push(transition);
        board.recompute_moves();
        Ok(())
    }

    /// Stores the verdict for the position after the latest entry.
    pub fn annotate(&mut self, status: Verdict) {
        if let Some(entry) = self.cursor.checked_sub(1).and_then(|idx| self.entries.get_mut(idx)) {
            entry.status = status;
        }
    }

    /// Verdict recorded with the entry the cursor sits after, if any.
    pub fn tip_status(&self) -> Option<Verdict> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
            .map(|entry| entry.status)
    }

    pub fn undo(&mut self, board: &mut Board, players: &mut PlayerState) -> ChessResult<()> {
        if self.cursor == 0 {
            return Err(ChessError::NoHistory);
        }
        self.entries[self.cursor - 1].revert(board, players)?;
        self.cursor -= 1;
        Ok(())
    }

    pub fn redo(&mut self, board: &mut Board, players: &mut PlayerState) -> ChessResult<()> {
        let entry = self.entries.get_mut(self.cursor).ok_or(ChessError::NoFuture)?;
        entry.apply(board, players)?;
        self.cursor += 1;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }
}
