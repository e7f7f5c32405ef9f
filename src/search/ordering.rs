//! Move ordering for the alpha-beta search
//!
//! Good moves first means earlier cutoffs. Candidates are scored by, in
//! decreasing weight: completing a line, blocking an opponent threat,
//! creating threats, interrupting opponent lines, and the cell's position.

use std::cmp::Reverse;

use crate::board::{Board, Player};
use crate::eval::{lines_contested, positional_bonus, threats_blocked, threats_created};
use crate::rules::completes_line;

/// Priority for the transposition table's remembered move
const TT_MOVE: i64 = 10_000_000;
/// Priority for a move that wins on the spot
const WIN: i64 = 1_000_000;
/// Per opponent threat blocked
const BLOCK: i64 = 100_000;
/// Per threat created
const THREAT: i64 = 1_000;
/// Per live opponent line interrupted
const CONTEST: i64 = 50;

/// Ordering priority of placing `player` at the empty cell `pos`.
pub fn score_move(board: &mut Board, pos: usize, player: Player) -> i64 {
    let mut score = positional_bonus(board.lines().class(pos));

    board.place(pos, player);
    let wins = completes_line(board, pos, player);
    board.remove(pos);
    if wins {
        score += WIN;
    }

    score += threats_blocked(board, pos, player) as i64 * BLOCK;
    score += threats_created(board, pos, player) as i64 * THREAT;
    score += lines_contested(board, pos, player) as i64 * CONTEST;
    score
}

/// Sort `moves` by descending priority for `player`.
///
/// `tt_move`, when present among the candidates, goes first. The sort is
/// stable, so equal priorities keep ascending index order.
pub fn order_moves(
    board: &mut Board,
    moves: &mut Vec<usize>,
    player: Player,
    tt_move: Option<usize>,
) {
    let mut scored: Vec<(i64, usize)> = moves
        .iter()
        .map(|&pos| {
            let s = if tt_move == Some(pos) {
                TT_MOVE
            } else {
                score_move(board, pos, player)
            };
            (s, pos)
        })
        .collect();
    scored.sort_by_key(|&(s, _)| Reverse(s));
    moves.clear();
    moves.extend(scored.into_iter().map(|(_, pos)| pos));
}
