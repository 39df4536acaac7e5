//! Crate root module declarations for the max^n chess engine.
//!
//! Exposes the board model, move generation, the reversible move and
//! turn commands, search and the engine seats so binaries, benches and
//! tests can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_session;
    pub mod player_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod piece_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod history;
    pub mod legal_move_checks;
    pub mod move_command;
    pub mod perft;
    pub mod transition;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod maxn;
    pub mod threading;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_maxn;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod board_text;
    pub mod match_harness;
}
