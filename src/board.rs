//! Board state: 26-slot signed position vector, side to move and doubling
//! cube, with single-move apply/undo and derived queries.

use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar slot for black checkers; also white's bear-off exit.
pub const BLACK_BAR: usize = 0;

/// Bar slot for white checkers; also black's bear-off exit.
pub const WHITE_BAR: usize = 25;

/// Standard opening layout. White is positive and travels toward index 0,
/// black is negative and travels toward index 25.
pub const START_POINTS: [i8; 26] = [
    0, -2, 0, 0, 0, 0, 5, 0, 3, 0, 0, 0, -5, 5, 0, 0, 0, -3, 0, -5, 0, 0, 0, 0, 2, 0,
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Checker color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Sign of this side's checkers in the points vector.
    pub fn sign(self) -> i8 {
        match self {
            Side::Black => -1,
            Side::White => 1,
        }
    }

    /// This side's bar slot.
    pub fn bar(self) -> usize {
        match self {
            Side::Black => BLACK_BAR,
            Side::White => WHITE_BAR,
        }
    }

    pub(crate) fn from_sign(value: i8) -> Option<Side> {
        match value {
            v if v > 0 => Some(Side::White),
            v if v < 0 => Some(Side::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

/// How a finished game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WinType {
    Normal,
    Gammon,
    Backgammon,
}

impl WinType {
    /// Stake multiplier: 1 / 2 / 3.
    pub fn multiplier(self) -> u32 {
        match self {
            WinType::Normal => 1,
            WinType::Gammon => 2,
            WinType::Backgammon => 3,
        }
    }
}

/// Outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<Side>,
    /// Doubling cube value at the end of the game.
    pub cube: u32,
    pub win_type: WinType,
}

impl GameResult {
    /// Points won: cube value times the win-type multiplier.
    pub fn stake(&self) -> u32 {
        self.cube * self.win_type.multiplier()
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state (clone for what-if isolation).
///
/// `points[0]` and `points[25]` are the two bar slots; 1-24 are the playable
/// points. Sign encodes color, magnitude the checker count. No slot ever
/// mixes colors on boards reachable by legal play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub points: [i8; 26],
    /// Side to move; `None` before the opening roll.
    pub turn: Option<Side>,
    /// Doubling cube value is `2^stake_pow`.
    pub stake_pow: u8,
    /// Cube owner; `None` while the cube is centered.
    pub doubling_turn: Option<Side>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening position, before the first roll.
    pub fn new() -> Self {
        Self {
            points: START_POINTS,
            turn: None,
            stake_pow: 0,
            doubling_turn: None,
        }
    }

    /// Board from an explicit position with a centered cube.
    pub fn with_position(points: [i8; 26], turn: Option<Side>) -> Self {
        Self {
            points,
            turn,
            stake_pow: 0,
            doubling_turn: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Color occupying a slot, if any.
    pub fn color_at(&self, point: usize) -> Option<Side> {
        Side::from_sign(self.points[point])
    }

    /// Current doubling cube value.
    pub fn stake(&self) -> u32 {
        1 << self.stake_pow
    }

    /// Whether the side to move may offer the cube.
    pub fn can_double(&self) -> bool {
        self.doubling_turn.is_none() || self.doubling_turn == self.turn
    }

    pub fn switch_turn(&mut self) {
        self.turn = self.turn.map(Side::opponent);
    }

    pub fn switch_doubling_turn(&mut self) {
        self.doubling_turn = self.doubling_turn.map(Side::opponent);
    }

    /// Mirror the position: colors, travel directions and cube ownership swap.
    pub fn flip(&mut self) {
        self.points.reverse();
        for slot in &mut self.points {
            *slot = -*slot;
        }
        self.turn = self.turn.map(Side::opponent);
        self.doubling_turn = self.doubling_turn.map(Side::opponent);
    }

    pub fn flipped(&self) -> Self {
        let mut board = self.clone();
        board.flip();
        board
    }

    // ========================================================================
    // DERIVED QUERIES
    // ========================================================================

    /// Remaining travel distance for a side, in pips.
    pub fn pip_count(&self, side: Side) -> u32 {
        let mut pips = 0u32;
        for (point, &count) in self.points.iter().enumerate() {
            if Side::from_sign(count) == Some(side) {
                let dist = match side {
                    Side::White => point,
                    Side::Black => 25 - point,
                };
                pips += u32::from(count.unsigned_abs()) * dist as u32;
            }
        }
        pips
    }

    /// Checkers of a side still on the board (bar included).
    pub fn checkers_count(&self, side: Side) -> u32 {
        self.points
            .iter()
            .filter(|&&count| Side::from_sign(count) == Some(side))
            .map(|&count| u32::from(count.unsigned_abs()))
            .sum()
    }

    /// Checkers of a side already borne off.
    pub fn borne_off(&self, side: Side) -> u32 {
        15u32.saturating_sub(self.checkers_count(side))
    }

    /// Whether any checker of `side` sits farther from home than `point`.
    pub fn checkers_before(&self, point: usize, side: Side) -> bool {
        match side {
            Side::White => self.points[point + 1..].iter().any(|&count| count > 0),
            Side::Black => self.points[..point].iter().any(|&count| count < 0),
        }
    }

    /// Bearing off requires every checker of the side in its home board.
    pub fn bearing_off_allowed(&self, side: Side) -> bool {
        match side {
            Side::White => !self.checkers_before(6, Side::White),
            Side::Black => !self.checkers_before(19, Side::Black),
        }
    }

    pub fn game_over(&self) -> bool {
        self.pip_count(Side::Black) == 0 || self.pip_count(Side::White) == 0
    }

    pub fn winner(&self) -> Option<Side> {
        let black = self.pip_count(Side::Black);
        let white = self.pip_count(Side::White);
        if black == 0 && white > 0 {
            Some(Side::Black)
        } else if white == 0 && black > 0 {
            Some(Side::White)
        } else {
            None
        }
    }

    /// How the game was won against `loser`: gammon when the loser bore off
    /// nothing, backgammon when a loser checker additionally remains in the
    /// winner's home board or on the bar.
    pub fn win_type(&self, loser: Option<Side>) -> WinType {
        let loser = match loser {
            Some(side) => side,
            None => return WinType::Normal,
        };
        if self.checkers_count(loser) < 15 {
            return WinType::Normal;
        }
        let trapped = match loser {
            Side::Black => self.checkers_before(7, Side::Black),
            Side::White => self.checkers_before(18, Side::White),
        };
        if trapped {
            WinType::Backgammon
        } else {
            WinType::Gammon
        }
    }

    pub fn result(&self) -> GameResult {
        let winner = self.winner();
        GameResult {
            winner,
            cube: self.stake(),
            win_type: self.win_type(winner.map(Side::opponent)),
        }
    }

    // ========================================================================
    // APPLY / UNDO
    // ========================================================================

    /// Apply a single move. A hit first evicts the lone enemy checker to its
    /// bar; bearing off removes the mover from the board entirely. Turn
    /// switching is the caller's responsibility.
    pub fn do_move(&mut self, mv: Move) {
        let color = self.color_at(mv.src).expect("no checker on move source");
        let sign = color.sign();

        if mv.hit {
            self.points[mv.dst] += sign;
            self.points[color.opponent().bar()] -= sign;
        }

        self.points[mv.src] -= sign;
        if !mv.bearing_off() {
            self.points[mv.dst] += sign;
        }
    }

    /// Exact inverse of [`Board::do_move`]. The color is inferred from `dst`;
    /// bear-off destinations name the exiting side directly since the checker
    /// is no longer on the board.
    pub fn undo_move(&mut self, mv: Move) {
        let color = match mv.dst {
            BLACK_BAR => Side::White,
            WHITE_BAR => Side::Black,
            _ => self
                .color_at(mv.dst)
                .expect("no checker on move destination"),
        };
        let sign = color.sign();

        self.points[mv.src] += sign;
        if !mv.bearing_off() {
            self.points[mv.dst] -= sign;
        }

        if mv.hit {
            self.points[mv.dst] -= sign;
            self.points[color.opponent().bar()] += sign;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
