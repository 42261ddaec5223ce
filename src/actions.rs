//! Turns: ordered move sequences or doubling-cube decisions, plus the
//! recursive legal-turn enumeration.

use crate::board::{Board, Side};
use crate::dice::Dice;
use crate::moves::{assert_legal_move, build_legal_move, Move, MoveError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use thiserror::Error;

// ============================================================================
// ACTION
// ============================================================================

/// One full turn: either an ordered sequence of checker moves or a doubling
/// cube decision. The variants rule out states like "a double carrying
/// moves" by construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Action {
    /// 0-4 moves in the order they are played; empty means the side dances.
    Play(Vec<Move>),
    /// Offer the cube.
    Double,
    /// Accept an offered double.
    Take,
    /// Decline an offered double and forfeit the game.
    Drop,
}

impl Action {
    /// No legal move was available this turn.
    pub fn dances(&self) -> bool {
        matches!(self, Action::Play(moves) if moves.is_empty())
    }

    pub fn moves(&self) -> Option<&[Move]> {
        match self {
            Action::Play(moves) => Some(moves),
            _ => None,
        }
    }

    /// Net per-checker displacements. Chains played by one checker contract
    /// into a single move, so orderings reaching the same position compare
    /// equal. Turns longer than two moves get a second contraction pass.
    fn canonical_moves(&self) -> Vec<Move> {
        let moves = match self {
            Action::Play(moves) => moves,
            _ => return Vec::new(),
        };
        if moves.is_empty() {
            return Vec::new();
        }
        let color = if moves[0].src > moves[0].dst {
            Side::White
        } else {
            Side::Black
        };
        let mut contracted = contract(moves.clone(), color);
        if moves.len() > 2 {
            contracted = contract(contracted, color);
        }
        contracted.sort_unstable();
        contracted
    }
}

/// Single contraction pass: pop the move farthest from home and splice in
/// any move continuing from its landing point. A hitting first leg never
/// contracts, since the evicted blot distinguishes the positions.
fn contract(mut moves: Vec<Move>, color: Side) -> Vec<Move> {
    match color {
        Side::White => moves.sort_unstable(),
        Side::Black => moves.sort_unstable_by(|a, b| b.cmp(a)),
    }
    let mut out = Vec::with_capacity(moves.len());
    while let Some(first) = moves.pop() {
        if first.hit {
            out.push(first);
            continue;
        }
        if let Some(i) = moves.iter().position(|m| m.src == first.dst) {
            let second = moves.remove(i);
            out.push(Move {
                src: first.src,
                dst: second.dst,
                hit: second.hit,
            });
        } else {
            out.push(first);
        }
    }
    out
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Play(_), Action::Play(_)) => {
                self.canonical_moves() == other.canonical_moves()
            }
            (Action::Double, Action::Double)
            | (Action::Take, Action::Take)
            | (Action::Drop, Action::Drop) => true,
            _ => false,
        }
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        if let Action::Play(_) = self {
            self.canonical_moves().hash(state);
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Double => write!(f, "Doubles"),
            Action::Take => write!(f, "Takes"),
            Action::Drop => write!(f, "Drops"),
            Action::Play(moves) if moves.is_empty() => write!(f, "Dances"),
            Action::Play(moves) => {
                for (i, mv) in moves.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{mv}")?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a whole turn was rejected, or why the generator could not run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no side to move")]
    NoSideToMove,
    #[error("only {0} may double now")]
    DoubleOutOfTurn(Side),
    #[error("only {0} may respond to the double")]
    ResponseOutOfTurn(Side),
    #[error(transparent)]
    Move(#[from] MoveError),
}

// ============================================================================
// APPLY / VALIDATE
// ============================================================================

/// Apply a full action, including the turn switch. Accepting a double bumps
/// the cube and hands it to the taker.
pub fn do_action(board: &mut Board, action: &Action) {
    match action {
        Action::Play(moves) => {
            for &mv in moves {
                board.do_move(mv);
            }
        }
        Action::Double | Action::Drop => {}
        Action::Take => {
            board.stake_pow += 1;
            board.doubling_turn = board.turn;
        }
    }
    board.switch_turn();
}

/// Exact inverse of [`do_action`].
pub fn undo_action(board: &mut Board, action: &Action) {
    board.switch_turn();
    match action {
        Action::Play(moves) => {
            for &mv in moves.iter().rev() {
                board.undo_move(mv);
            }
        }
        Action::Double | Action::Drop => {}
        Action::Take => {
            board.stake_pow -= 1;
            board.doubling_turn = if board.stake_pow == 0 {
                None
            } else {
                board.turn.map(Side::opponent)
            };
        }
    }
}

/// Validate a full turn: each move against the board as its predecessors
/// left it, or the cube decision against cube ownership.
pub fn assert_legal_action(action: &Action, board: &Board) -> Result<(), ActionError> {
    match action {
        Action::Play(moves) => {
            let mut scratch = board.clone();
            for (i, &mv) in moves.iter().enumerate() {
                assert_legal_move(mv, &scratch, scratch.turn)?;
                if i + 1 != moves.len() {
                    scratch.do_move(mv);
                }
            }
            Ok(())
        }
        Action::Double => match board.doubling_turn {
            Some(owner) if board.turn != Some(owner) => {
                Err(ActionError::DoubleOutOfTurn(owner))
            }
            _ => Ok(()),
        },
        Action::Take | Action::Drop => match board.doubling_turn {
            Some(owner) if board.turn == Some(owner) => {
                Err(ActionError::ResponseOutOfTurn(owner.opponent()))
            }
            _ => Ok(()),
        },
    }
}

/// Boolean wrapper around [`assert_legal_action`].
pub fn is_legal_action(action: &Action, board: &Board) -> bool {
    assert_legal_action(action, board).is_ok()
}

// ============================================================================
// LEGAL ACTION GENERATOR
// ============================================================================

/// Enumerate every distinct legal turn for a dice roll.
///
/// Doubles grant four moves of the die value; the search accepts fewer only
/// when no longer sequence exists (a player must play as many dice as
/// possible). Unequal dice are tried in both orders, falling back to each
/// die singly when no two-move sequence exists. Results are de-duplicated by
/// resulting position, so two orderings reaching the same board appear once.
/// Cube decisions are never enumerated here.
///
/// Errors with [`ActionError::NoSideToMove`] before the opening roll.
pub fn build_legal_actions(board: &Board, dice: Dice) -> Result<Vec<Action>, ActionError> {
    let turn = board.turn.ok_or(ActionError::NoSideToMove)?;
    let mut scratch = board.clone();

    let d1 = dice.0 as usize;
    let d2 = dice.1 as usize;

    let mut sequences;
    if dice.is_double() {
        let four = [d1; 4];
        sequences = Vec::new();
        for count in (1..=4).rev() {
            sequences = move_sequences(&mut scratch, turn, &four[..count], None)?;
            if !sequences.is_empty() {
                break;
            }
        }
    } else {
        sequences = move_sequences(&mut scratch, turn, &[d1, d2], None)?;
        sequences.extend(move_sequences(&mut scratch, turn, &[d2, d1], None)?);
        if sequences.is_empty() {
            sequences = move_sequences(&mut scratch, turn, &[d1], None)?;
            sequences.extend(move_sequences(&mut scratch, turn, &[d2], None)?);
        }
    }

    if sequences.is_empty() {
        return Ok(vec![Action::Play(Vec::new())]);
    }

    // Keep one representative per distinct resulting position.
    let mut seen = FxHashSet::default();
    let mut actions = Vec::with_capacity(sequences.len());
    for seq in sequences {
        for &mv in &seq {
            scratch.do_move(mv);
        }
        let key = scratch.points;
        for &mv in seq.iter().rev() {
            scratch.undo_move(mv);
        }
        if seen.insert(key) {
            actions.push(Action::Play(seq));
        }
    }
    Ok(actions)
}

/// Recursive search over one shared board with strict apply/undo
/// backtracking. Only full-length sequences are returned; shorter ones fall
/// out of the caller's dice-count fallback. `src_limit` skips sources an
/// earlier branch already covered in travel order, pruning permutations of
/// the same move set.
fn move_sequences(
    board: &mut Board,
    turn: Side,
    dice: &[usize],
    src_limit: Option<usize>,
) -> Result<Vec<Vec<Move>>, MoveError> {
    let mut sequences = Vec::new();
    let (&die, rest) = match dice.split_first() {
        Some(split) => split,
        None => return Ok(sequences),
    };

    for src in 0..26 {
        if board.color_at(src) != Some(turn) {
            continue;
        }
        match (turn, src_limit) {
            (Side::White, Some(limit)) if src > limit => continue,
            (Side::Black, Some(limit)) if src < limit => continue,
            _ => {}
        }

        let mv = match build_legal_move(board, src, die, None) {
            Ok(mv) => mv,
            // Impossible here means the search itself is broken.
            Err(err) if err.is_impossible() => return Err(err),
            Err(_) => continue,
        };

        if rest.is_empty() {
            sequences.push(vec![mv]);
            continue;
        }

        board.do_move(mv);
        let tails = move_sequences(board, turn, rest, Some(src));
        // Restore before any failure can propagate.
        board.undo_move(mv);
        for tail in tails? {
            let mut seq = Vec::with_capacity(1 + tail.len());
            seq.push(mv);
            seq.extend(tail);
            sequences.push(seq);
        }
    }

    Ok(sequences)
}

// ============================================================================
// TESTS
// ============================================================================
