//! Hit probability: for a point and a hitting side, the fraction of the 36
//! dice outcomes that allow landing a checker there next turn.

use crate::board::{Board, Side, BLACK_BAR, WHITE_BAR};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HitProbError {
    #[error("{0} is not a valid point to hit")]
    PointOffBoard(usize),
    #[error("no checkers on point {0}, hitting side is undefined")]
    HitterUndefined(usize),
}

/// Probability that `point` can be hit on the next roll.
///
/// `by` names the hitting side; `None` infers it as the opponent of the
/// checkers sitting on the point (an error if the point is empty). With
/// `only_legal`, a hitter with checkers on the bar may hit from the bar
/// only, matching the must-enter-first rule. The bar slots themselves can
/// never be hit.
///
/// Counts outcomes: a direct shot with one die covers all 6 companions, a
/// combined shot needs at least one unblocked intermediate point, and
/// doubles walk up to four steps as long as each landing point is open.
pub fn hit_prob(
    board: &Board,
    point: usize,
    by: Option<Side>,
    only_legal: bool,
) -> Result<f64, HitProbError> {
    if point > 25 {
        return Err(HitProbError::PointOffBoard(point));
    }
    if point == BLACK_BAR || point == WHITE_BAR {
        return Ok(0.0);
    }
    let by = match by {
        Some(side) => side,
        None => board
            .color_at(point)
            .map(Side::opponent)
            .ok_or(HitProbError::HitterUndefined(point))?,
    };
    let sign = i32::from(by.sign());

    let not_blocked = |dist: i32| -> bool {
        let landing = point as i32 + sign * dist;
        (0..=25).contains(&landing) && sign * i32::from(board.points[landing as usize]) >= -1
    };

    let hitters: Vec<usize> = if only_legal && by == Side::Black && board.points[BLACK_BAR] < 0 {
        vec![BLACK_BAR]
    } else if only_legal && by == Side::White && board.points[WHITE_BAR] > 0 {
        vec![WHITE_BAR]
    } else {
        (0..26).filter(|&i| board.color_at(i) == Some(by)).collect()
    };
    let dists: Vec<i32> = hitters
        .iter()
        .map(|&src| sign * (src as i32 - point as i32))
        .collect();

    let mut options = 0u32;
    for d1 in 1..=6 {
        if dists.contains(&d1) {
            // Direct shot: hits regardless of the companion die.
            options += 6;
            continue;
        }
        for d2 in 1..=6 {
            if dists.contains(&d2) {
                options += 1;
            } else if d1 == d2 {
                // Doubles walk in steps of the die value, at most 4 steps.
                let mut mid = d1;
                let mut d = 2 * d1;
                while d < 5 * d1 {
                    if !not_blocked(mid) {
                        break;
                    }
                    if dists.contains(&d) {
                        options += 1;
                        break;
                    }
                    mid += d1;
                    d += d1;
                }
            } else if dists.contains(&(d1 + d2)) && (not_blocked(d1) || not_blocked(d2)) {
                options += 1;
            }
        }
    }

    Ok(f64::from(options) / 36.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(board: &Board, point: usize, by: Option<Side>, only_legal: bool) -> i32 {
        let p = hit_prob(board, point, by, only_legal).unwrap();
        (p * 36.0).round() as i32
    }

    #[test]
    fn test_hit_prob_open_board() {
        // Outcome counts at each distance 1..=24 with no blockers.
        let expected = [
            11, 12, 14, 15, 15, 17, //
            6, 6, 5, 3, 2, 3, //
            0, 0, 1, 1, 0, 1, //
            0, 1, 0, 0, 0, 1,
        ];
        let mut points = [0i8; 26];
        points[1] = -1;
        for (i, &want) in expected.iter().enumerate() {
            let mut points = points;
            points[2 + i] = 1;
            let board = Board::with_position(points, None);
            assert_eq!(outcomes(&board, 1, None, false), want, "distance {}", i + 1);
        }
    }

    #[test]
    fn test_hit_prob_bad_point() {
        let board = Board::new();
        for point in [26, 27, 42, 123] {
            for by in [Some(Side::Black), Some(Side::White)] {
                for only_legal in [false, true] {
                    assert_eq!(
                        hit_prob(&board, point, by, only_legal),
                        Err(HitProbError::PointOffBoard(point))
                    );
                }
            }
        }
    }

    #[test]
    fn test_hit_prob_undefined_hitter() {
        let board = Board::new();
        for point in [2, 7, 15, 22, 23] {
            assert_eq!(board.color_at(point), None);
            for only_legal in [false, true] {
                assert_eq!(
                    hit_prob(&board, point, None, only_legal),
                    Err(HitProbError::HitterUndefined(point))
                );
            }
        }
    }

    #[test]
    fn test_hit_prob_bar_is_safe() {
        let board = Board::with_position(crate::board::START_POINTS, None);
        for bar in [BLACK_BAR, WHITE_BAR] {
            assert_eq!(hit_prob(&board, bar, Some(Side::White), false), Ok(0.0));
            assert_eq!(hit_prob(&board, bar, Some(Side::Black), true), Ok(0.0));
        }
    }

    #[test]
    fn test_hit_prob_blockers() {
        let mut points = [0i8; 26];
        points[17] = 1;
        points[13] = -3;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 17, None, false), 15);

        // A lone checker in between does not block.
        points[15] = 1;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 17, None, false), 15);

        // Neither do two of the hitter's own, and they hit too.
        points[15] = -2;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 17, None, false), 23);

        // Two defenders do block.
        points[15] = 2;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 17, None, false), 13);
    }

    #[test]
    fn test_hit_prob_multiple_sources() {
        let mut points = [0i8; 26];
        points[13] = -1;
        points[19] = 1;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 13, None, false), 17);

        points[22] = 1;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 13, None, false), 19);

        // A block beyond the direct shots changes nothing.
        points[20] = -2;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 13, None, false), 19);

        // A block on a combined-shot intermediate does.
        points[15] = -2;
        let board = Board::with_position(points, None);
        assert_eq!(outcomes(&board, 13, None, false), 18);
    }

    #[test]
    fn test_hit_prob_full_board() {
        let board = Board::with_position(
            [
                -2, -1, -1, -1, 2, -3, 0, 0, 2, 3, 0, 0, 0, -1, 1, 1, 0, 0, -2, -2, 1, 1, -1, 2,
                -1, 0,
            ],
            None,
        );
        let white = [
            0, 21, 26, 33, 25, 26, 25, 25, 29, 29, 26, 26, 26, 27, 27, 26, 24, 29, 29, 27, 20, 12,
            11, 0, 0, 0,
        ];
        let black = [
            0, 11, 20, 27, 32, 32, 35, 35, 34, 28, 22, 21, 14, 9, 16, 16, 17, 17, 17, 25, 23, 23,
            25, 31, 30, 0,
        ];
        // Black has a checker on the bar, so only_legal collapses its
        // sources to the bar alone; white has none, so its counts hold.
        let black_legal = [
            0, 11, 12, 14, 15, 15, 16, 6, 4, 5, 3, 2, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0,
        ];
        let inferred = [
            0, 21, 26, 33, 32, 26, 0, 0, 34, 28, 0, 0, 0, 27, 16, 16, 0, 0, 29, 27, 23, 23, 11,
            31, 0, 0,
        ];
        let inferred_legal = [
            0, 21, 26, 33, 15, 26, 0, 0, 4, 5, 0, 0, 0, 27, 0, 1, 0, 0, 29, 27, 1, 0, 11, 0, 0, 0,
        ];

        for point in 0..26 {
            assert_eq!(
                outcomes(&board, point, Some(Side::White), false),
                white[point],
                "white, point {point}"
            );
            assert_eq!(
                outcomes(&board, point, Some(Side::White), true),
                white[point],
                "white legal, point {point}"
            );
            assert_eq!(
                outcomes(&board, point, Some(Side::Black), false),
                black[point],
                "black, point {point}"
            );
            assert_eq!(
                outcomes(&board, point, Some(Side::Black), true),
                black_legal[point],
                "black legal, point {point}"
            );
            if board.points[point] != 0 {
                assert_eq!(outcomes(&board, point, None, false), inferred[point]);
                assert_eq!(outcomes(&board, point, None, true), inferred_legal[point]);
            }
        }
    }
}
