//! Fixed-depth alpha-beta search.
//!
//! Scores are from the perspective of the side to move (negamax form): the horizon
//! is scored by disc difference, and finished games by [`WIN_SCORE`].

use log::debug;
use tessera_othello::{Color, GameSignal, Move, Position};

/// Score of a won game. Larger than any disc difference.
pub const WIN_SCORE: i32 = 1000;

const INFINITY: i32 = WIN_SCORE + 1;

/// Choose a move for the side to move by searching `depth` plies (at least one).
/// Ties go to the lowest square index. Returns [`Move::Pass`] when there is no placement.
pub fn best_move(position: &Position, depth: u32) -> Move {
    search(position, depth).0
}

/// The score of the best line found by [`best_move`].
pub fn evaluate(position: &Position, depth: u32) -> i32 {
    search(position, depth).1
}

/// [`best_move`] together with its score.
pub fn search(position: &Position, depth: u32) -> (Move, i32) {
    let depth = depth.max(1);
    let mut pos = *position;

    let moves = pos.legal_moves();
    if moves.len() == 0 {
        return (Move::Pass, window(&mut pos, depth, -INFINITY, INFINITY));
    }

    let undo = pos.snapshot();
    let mut best = (Move::Pass, -INFINITY);
    for loc in moves {
        pos.apply(Move::Place(loc));
        let score = -window(&mut pos, depth - 1, -INFINITY, -best.1);
        pos.restore(undo);

        debug!("{} scores {}", loc, score);
        if score > best.1 {
            best = (Move::Place(loc), score);
        }
    }

    best
}

fn material(pos: &Position) -> i32 {
    pos.material(pos.turn()) as i32
}

/// A finished game is scored only by who won.
fn final_score(pos: &Position, player: Color) -> i32 {
    pos.material(player).signum() as i32 * WIN_SCORE
}

fn window(pos: &mut Position, depth: u32, mut alpha: i32, beta: i32) -> i32 {
    let moves = pos.legal_moves();
    if moves.len() == 0 {
        if pos.is_game_over() {
            return final_score(pos, pos.turn());
        }

        // I pass, which ends the game if my opponent just passed too
        let undo = pos.snapshot();
        let score = match pos.apply(Move::Pass) {
            GameSignal::Terminal => -final_score(pos, pos.turn()),
            GameSignal::Continue if depth == 0 => -material(pos),
            GameSignal::Continue => -window(pos, depth - 1, -beta, -alpha),
        };
        pos.restore(undo);
        return score;
    }

    if depth == 0 {
        return material(pos);
    }

    let undo = pos.snapshot();
    for loc in moves {
        pos.apply(Move::Place(loc));
        let score = -window(pos, depth - 1, -beta, -alpha);
        pos.restore(undo);

        // Fail high: this branch has a line so good for me my opponent won't allow it
        if score >= beta {
            return beta;
        }

        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::IteratorRandom;
    use rand::SeedableRng;
    use tessera_othello::bitboard::Bitboard;
    use tessera_othello::Location;

    fn squares(indices: &[u8]) -> Bitboard {
        indices
            .iter()
            .fold(Bitboard::EMPTY, |acc, &i| acc | Bitboard::square(i))
    }

    /// Plain negamax without pruning.
    fn minimax(pos: &Position, depth: u32) -> i32 {
        let moves = pos.legal_moves();
        if moves.len() == 0 {
            if pos.is_game_over() {
                return final_score(pos, pos.turn());
            }
            let mut child = *pos;
            return match child.apply(Move::Pass) {
                GameSignal::Terminal => -final_score(&child, child.turn()),
                GameSignal::Continue if depth == 0 => -material(&child),
                GameSignal::Continue => -minimax(&child, depth - 1),
            };
        }
        if depth == 0 {
            return material(pos);
        }

        moves
            .map(|loc| {
                let mut child = *pos;
                child.apply(Move::Place(loc));
                -minimax(&child, depth - 1)
            })
            .max()
            .unwrap()
    }

    #[test]
    fn opening_tie_goes_to_lowest_square() {
        let pos = Position::new();
        assert_eq!(best_move(&pos, 1), Move::Place(Location::from_index(19)));
        assert_eq!(evaluate(&pos, 1), 3);
    }

    #[test]
    fn prefers_larger_capture() {
        // C8 flips one disc, D6 flips two.
        let pos = Position::from_parts(squares(&[0, 16]), squares(&[1, 17, 18]), Color::Black, false)
            .unwrap();
        assert_eq!(best_move(&pos, 1), Move::Place(Location::from_index(19)));
        assert_eq!(evaluate(&pos, 1), 4);
    }

    #[test]
    fn recognizes_wipeout() {
        let pos = Position::from_parts(squares(&[0]), squares(&[1]), Color::Black, false).unwrap();
        assert_eq!(best_move(&pos, 3), Move::Place(Location::from_index(2)));
        assert_eq!(evaluate(&pos, 3), WIN_SCORE);
    }

    #[test]
    fn passes_when_stuck() {
        let pos = Position::from_parts(squares(&[1]), squares(&[0]), Color::Black, false).unwrap();
        assert_eq!(best_move(&pos, 3), Move::Pass);
        assert_eq!(evaluate(&pos, 3), -WIN_SCORE);
    }

    #[test]
    fn finished_game_scores_by_winner() {
        let pos = Position::from_parts(squares(&[0, 1]), squares(&[63]), Color::White, true).unwrap();
        assert_eq!(best_move(&pos, 4), Move::Pass);
        assert_eq!(evaluate(&pos, 4), -WIN_SCORE);
    }

    #[test]
    fn pass_after_pass_scores_final_discs() {
        // Black cannot place and white passed last: black's pass ends the game.
        let pos: Position = "WB6/8/8/8/8/8/8/8 1 1".parse().unwrap();
        assert!(!pos.is_game_over());
        for depth in 1..4 {
            assert_eq!(search(&pos, depth), (Move::Pass, 0));
        }

        let pos: Position = "WBB5/8/8/8/8/8/8/8 1 1".parse().unwrap();
        assert_eq!(search(&pos, 3), (Move::Pass, WIN_SCORE));

        let pos: Position = "WBW5/8/8/8/8/8/8/8 1 1".parse().unwrap();
        assert_eq!(search(&pos, 3), (Move::Pass, -WIN_SCORE));
    }

    #[test]
    fn pass_without_prior_pass_continues() {
        // Same discs, but white has not passed: white answers on C8 and wins.
        let pos: Position = "WB6/8/8/8/8/8/8/8 1 0".parse().unwrap();
        assert_eq!(search(&pos, 2), (Move::Pass, -WIN_SCORE));
        assert_eq!(search(&pos, 1), (Move::Pass, 0));
    }

    #[test]
    fn pruning_agrees_with_minimax() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..30 {
            let mut pos = Position::new();
            let plies = (0..40).choose(&mut rng).unwrap();
            for _ in 0..plies {
                match pos.legal_moves().choose(&mut rng) {
                    Some(loc) => {
                        pos.apply(Move::Place(loc));
                    }
                    None if pos.is_game_over() => break,
                    None => {
                        pos.apply(Move::Pass);
                    }
                }
            }

            for depth in 1..4 {
                assert_eq!(evaluate(&pos, depth), minimax(&pos, depth));

                let mv = best_move(&pos, depth);
                if let Move::Place(loc) = mv {
                    let first_best = pos
                        .legal_moves()
                        .find(|&candidate| {
                            let mut child = pos;
                            child.apply(Move::Place(candidate));
                            -minimax(&child, depth - 1) == minimax(&pos, depth)
                        })
                        .unwrap();
                    assert_eq!(loc, first_best);
                }
            }
        }
    }
}
