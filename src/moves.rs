//! Single checker moves and their legality.

use crate::board::{Board, Side, BLACK_BAR, WHITE_BAR};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single checker move: source slot, destination slot and whether it hits
/// a lone enemy checker on the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub src: usize,
    pub dst: usize,
    pub hit: bool,
}

impl Move {
    pub const fn new(src: usize, dst: usize) -> Self {
        Self { src, dst, hit: false }
    }

    pub const fn hitting(src: usize, dst: usize) -> Self {
        Self { src, dst, hit: true }
    }

    /// Travel distance in pips.
    pub fn pips(&self) -> usize {
        self.src.abs_diff(self.dst)
    }

    /// Whether the destination is a bear-off exit.
    pub fn bearing_off(&self) -> bool {
        self.dst == BLACK_BAR || self.dst == WHITE_BAR
    }
}

impl fmt::Display for Move {
    /// Standard notation in white's numbering: `13/7`, `24/18*`, `bar/20`,
    /// `6/off`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mut src, mut dst) = (self.src, self.dst);
        if self.src < self.dst {
            src = 25 - src;
            dst = 25 - dst;
        }
        if self.src == BLACK_BAR || self.src == WHITE_BAR {
            write!(f, "bar")?;
        } else {
            write!(f, "{src}")?;
        }
        if self.dst == BLACK_BAR || self.dst == WHITE_BAR {
            write!(f, "/off")?;
        } else {
            write!(f, "/{dst}")?;
        }
        if self.hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a move was rejected.
///
/// Two tiers: *impossible* moves are structurally nonsensical and indicate a
/// caller bug, while *illegal* moves are well-formed but break a game rule
/// and are the generator's normal pruning signal. Use
/// [`MoveError::is_impossible`] to tell them apart.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move source {0} is not on the board")]
    SourceOffBoard(usize),
    #[error("move destination {0} is not on the board")]
    DestinationOffBoard(usize),
    #[error("no checker to move on point {0}")]
    EmptySource(usize),
    #[error("hit flag does not match the destination occupancy")]
    HitMismatch,
    #[error("a bearing-off move cannot hit")]
    HitWhileBearingOff,
    #[error("destination point {0} is blocked")]
    DestinationBlocked(usize),
    #[error("move spans {0} pips, expected 1 to 6")]
    PipsOutOfRange(usize),
    #[error("checker on point {src} belongs to {color}, but it is {turn}'s turn")]
    WrongTurn { src: usize, color: Side, turn: Side },
    #[error("{0} must enter from the bar first")]
    BarNotCleared(Side),
    #[error("{0} cannot bear off before all checkers reach the home board")]
    BearingOffNotAllowed(Side),
    #[error("{0} still needs to bear off exactly from point {1}")]
    MustBearOffExact(Side, usize),
}

impl MoveError {
    /// Structurally invalid rather than merely against the rules.
    pub fn is_impossible(&self) -> bool {
        matches!(
            self,
            MoveError::SourceOffBoard(_)
                | MoveError::DestinationOffBoard(_)
                | MoveError::EmptySource(_)
                | MoveError::HitMismatch
                | MoveError::HitWhileBearingOff
        )
    }
}

// ============================================================================
// LEGALITY
// ============================================================================

/// Validate a move, including its hit flag. Passing a `turn` additionally
/// requires the moved checker to belong to that side.
pub fn assert_legal_move(mv: Move, board: &Board, turn: Option<Side>) -> Result<(), MoveError> {
    if mv.src > 25 {
        return Err(MoveError::SourceOffBoard(mv.src));
    }
    if mv.dst > 25 {
        return Err(MoveError::DestinationOffBoard(mv.dst));
    }

    let color = board
        .color_at(mv.src)
        .ok_or(MoveError::EmptySource(mv.src))?;
    let sign = color.sign();

    if !mv.bearing_off() {
        let occupancy = board.points[mv.dst];
        if occupancy * sign < -1 {
            return Err(MoveError::DestinationBlocked(mv.dst));
        }
        if mv.hit != (occupancy == -sign) {
            return Err(MoveError::HitMismatch);
        }
    } else if mv.hit {
        return Err(MoveError::HitWhileBearingOff);
    }

    if !(1..=6).contains(&mv.pips()) {
        return Err(MoveError::PipsOutOfRange(mv.pips()));
    }

    if let Some(turn) = turn {
        if color != turn {
            return Err(MoveError::WrongTurn { src: mv.src, color, turn });
        }
    }

    if board.points[color.bar()] * sign > 0 && mv.src != color.bar() {
        return Err(MoveError::BarNotCleared(color));
    }

    if mv.bearing_off() && !board.bearing_off_allowed(color) {
        return Err(MoveError::BearingOffNotAllowed(color));
    }

    Ok(())
}

/// Boolean wrapper around [`assert_legal_move`]; rejects both tiers alike.
pub fn is_legal_move(mv: Move, board: &Board, turn: Option<Side>) -> bool {
    assert_legal_move(mv, board, turn).is_ok()
}

/// Build the unique legal move of the checker on `src` by a die of `pips`.
///
/// Destinations overshooting the board clamp to the bear-off exit, but only
/// when no checker of that color sits farther from home; otherwise the die
/// must be played exactly.
pub fn build_legal_move(
    board: &Board,
    src: usize,
    pips: usize,
    turn: Option<Side>,
) -> Result<Move, MoveError> {
    if src > 25 {
        return Err(MoveError::SourceOffBoard(src));
    }
    let color = board.color_at(src).ok_or(MoveError::EmptySource(src))?;

    let mut dst = src as i32 - i32::from(color.sign()) * pips as i32;
    if !(0..=25).contains(&dst) {
        if board.checkers_before(src, color) {
            return Err(MoveError::MustBearOffExact(color, src));
        }
        dst = dst.clamp(0, 25);
    }
    let dst = dst as usize;

    let hit = dst > 0 && dst < 25 && board.points[dst] == -color.sign();
    let mv = Move { src, dst, hit };
    assert_legal_move(mv, board, turn)?;
    Ok(mv)
}

/// All legal moves of one side for a single die value.
pub fn build_legal_moves(board: &Board, pips: usize, turn: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for src in 0..26 {
        if board.color_at(src) != Some(turn) {
            continue;
        }
        if let Ok(mv) = build_legal_move(board, src, pips, Some(turn)) {
            moves.push(mv);
        }
    }
    moves
}

// ============================================================================
// TESTS
// ============================================================================
