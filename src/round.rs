//! The rules of the game: the three moves and how a pair of them resolves.

use rand::{distributions::Standard, prelude::Distribution, seq::SliceRandom, Rng};

/// One of the three playable moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every move, in display order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats: rock > scissors > paper > rock.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// The lowercase name, as shown on screen.
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

// allow uniformly random move choice through `rng.gen()`
impl Distribution<Move> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Move {
        *Move::ALL.choose(rng).unwrap()
    }
}

/// How one round went, from the player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Resolve a round. Total over all nine pairs of moves: equal moves draw, and otherwise exactly one side's move
    /// beats the other's.
    pub fn of(player: Move, computer: Move) -> Outcome {
        if player == computer {
            Outcome::Draw
        } else if player.beats() == computer {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}
