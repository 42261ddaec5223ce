//! BACKGAMMON Core - Rules engine
//!
//! This crate provides the core game logic for BACKGAMMON:
//! - Board state (26-slot signed point vector, turn, doubling cube)
//! - Single-move legality with the impossible/illegal distinction
//! - Turn actions (move sequences and cube decisions) and full legal-turn
//!   enumeration
//! - Hit-probability analytics over the 36 dice outcomes

pub mod actions;
pub mod board;
pub mod dice;
pub mod hit_prob;
pub mod moves;

// Re-exports for convenient access
pub use actions::{
    assert_legal_action, build_legal_actions, do_action, is_legal_action, undo_action, Action,
    ActionError,
};
pub use board::{Board, GameResult, Side, WinType, BLACK_BAR, START_POINTS, WHITE_BAR};
pub use dice::Dice;
pub use hit_prob::{hit_prob, HitProbError};
pub use moves::{
    assert_legal_move, build_legal_move, build_legal_moves, is_legal_move, Move, MoveError,
};
