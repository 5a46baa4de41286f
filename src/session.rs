//! The state of one sitting at the table: current round, score, and recent history.
//!
//! Everything here is pure state transitions; the [`Table`][crate::table::Table] decides *when* they happen, and the
//! [`Opponent`][crate::opponent::Opponent] supplies the other move. That keeps every rule in this file testable
//! without a screen or a clock.

use crate::{
    constants::gameplay::HISTORY_LEN,
    round::{Move, Outcome},
};

/// Which part of the play-reveal cycle the session is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight; waiting for the player to pick.
    #[default]
    Idle,
    /// The player has picked and the opponent is "thinking". Move selection is ignored until the reveal.
    Thinking,
    /// The round has been resolved and is on display. Picking again starts the next round.
    Resolved,
}

/// The running tally of decided rounds. Draws move neither number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

/// One resolved round, as shown in the history list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The round number the entry came from.
    pub round: u64,
    pub player: Move,
    pub computer: Move,
    pub outcome: Outcome,
}

/// All the state of a play session, from startup or the last reset.
#[derive(Debug, Default)]
pub struct Session {
    /// Monotonically increasing round counter. Deliberately *not* cleared by [`Self::reset`], so a reveal from a
    /// round that was wiped mid-think can never match a round started after the reset.
    round: u64,
    phase: Phase,
    player: Option<Move>,
    computer: Option<Move>,
    outcome: Option<Outcome>,
    score: Score,
    history: Vec<HistoryEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player's move for the round being thought about or on display.
    pub fn player(&self) -> Option<Move> {
        self.player
    }

    /// The computer's revealed move, once there is one.
    pub fn computer(&self) -> Option<Move> {
        self.computer
    }

    /// The outcome of the round on display, once there is one.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Resolved rounds, newest first, at most [`HISTORY_LEN`] of them.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Start a new round with the player's move, returning its round number.
    ///
    /// Returns `None` -- and changes nothing -- while the previous round is still being thought about, so mashing
    /// the move keys mid-think can't double-submit.
    pub fn begin(&mut self, mv: Move) -> Option<u64> {
        if self.phase == Phase::Thinking {
            return None;
        }
        self.round += 1;
        self.phase = Phase::Thinking;
        self.player = Some(mv);
        self.computer = None;
        self.outcome = None;
        Some(self.round)
    }

    /// Resolve the in-flight round with the computer's revealed move: sets the outcome, bumps the winner's score,
    /// and prepends a history entry.
    ///
    /// Returns whether the reveal applied. A reveal for any round other than the one currently being thought about
    /// is stale (its round was wiped by a reset) and is ignored.
    pub fn resolve(&mut self, round: u64, mv: Move) -> bool {
        if self.phase != Phase::Thinking || round != self.round {
            return false;
        }
        let player = self
            .player
            .expect("a session mid-think always has a player move");
        let outcome = Outcome::of(player, mv);
        self.phase = Phase::Resolved;
        self.computer = Some(mv);
        self.outcome = Some(outcome);
        match outcome {
            Outcome::Win => self.score.player += 1,
            Outcome::Loss => self.score.computer += 1,
            Outcome::Draw => (),
        }
        self.history.insert(
            0,
            HistoryEntry {
                round,
                player,
                computer: mv,
                outcome,
            },
        );
        self.history.truncate(HISTORY_LEN);
        true
    }

    /// Wipe the session back to how it started: no moves, no outcome, zero score, empty history, idle. Valid in any
    /// phase, including mid-think.
    pub fn reset(&mut self) {
        *self = Self {
            round: self.round,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod session_test {
    use super::*;

    /// Play a full round, resolving with the given computer move.
    fn play(s: &mut Session, player: Move, computer: Move) {
        let round = s.begin(player).expect("round should start");
        assert!(s.resolve(round, computer));
    }

    #[test]
    fn begin_starts_thinking() {
        let mut s = Session::new();
        assert_eq!(s.begin(Move::Rock), Some(1));
        assert_eq!(s.phase(), Phase::Thinking);
        assert_eq!(s.player(), Some(Move::Rock));
        assert_eq!(s.computer(), None);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn begin_mid_think_is_ignored() {
        let mut s = Session::new();
        assert_eq!(s.begin(Move::Rock), Some(1));
        assert_eq!(s.begin(Move::Paper), None);
        // the original selection is untouched
        assert_eq!(s.player(), Some(Move::Rock));
    }

    #[test]
    fn resolve_scores_the_winner() {
        let mut s = Session::new();
        play(&mut s, Move::Rock, Move::Scissors);
        assert_eq!(s.score(), Score { player: 1, computer: 0 });
        play(&mut s, Move::Rock, Move::Paper);
        play(&mut s, Move::Scissors, Move::Rock);
        assert_eq!(s.score(), Score { player: 1, computer: 2 });
    }

    #[test]
    fn draws_move_no_score() {
        let mut s = Session::new();
        play(&mut s, Move::Paper, Move::Paper);
        assert_eq!(s.outcome(), Some(Outcome::Draw));
        assert_eq!(s.score(), Score::default());
    }

    #[test]
    fn score_tallies_many_rounds() {
        let mut s = Session::new();
        // 3 wins, 2 losses, 2 draws
        let rounds = [
            (Move::Rock, Move::Scissors),
            (Move::Paper, Move::Rock),
            (Move::Scissors, Move::Paper),
            (Move::Rock, Move::Paper),
            (Move::Paper, Move::Scissors),
            (Move::Rock, Move::Rock),
            (Move::Scissors, Move::Scissors),
        ];
        for (p, c) in rounds {
            play(&mut s, p, c);
        }
        assert_eq!(s.score(), Score { player: 3, computer: 2 });
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let mut s = Session::new();
        for _ in 0..HISTORY_LEN + 2 {
            play(&mut s, Move::Rock, Move::Scissors);
        }
        assert_eq!(s.history().len(), HISTORY_LEN);
        // rounds 3..=7 remain, newest first
        let rounds: Vec<u64> = s.history().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn history_records_the_round() {
        let mut s = Session::new();
        play(&mut s, Move::Paper, Move::Rock);
        let entry = s.history()[0];
        assert_eq!(entry.round, 1);
        assert_eq!(entry.player, Move::Paper);
        assert_eq!(entry.computer, Move::Rock);
        assert_eq!(entry.outcome, Outcome::Win);
    }

    #[test]
    fn stale_reveal_is_ignored() {
        let mut s = Session::new();
        let old = s.begin(Move::Rock).unwrap();
        s.reset();
        let new = s.begin(Move::Paper).unwrap();
        assert_ne!(old, new);
        assert!(!s.resolve(old, Move::Scissors));
        assert_eq!(s.phase(), Phase::Thinking);
        // the new round still resolves fine
        assert!(s.resolve(new, Move::Scissors));
        assert_eq!(s.outcome(), Some(Outcome::Loss));
    }

    #[test]
    fn reveal_without_a_round_is_ignored() {
        let mut s = Session::new();
        assert!(!s.resolve(1, Move::Rock));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.history().is_empty());
    }

    #[test]
    fn double_reveal_is_ignored() {
        let mut s = Session::new();
        let round = s.begin(Move::Rock).unwrap();
        assert!(s.resolve(round, Move::Scissors));
        assert!(!s.resolve(round, Move::Paper));
        assert_eq!(s.score(), Score { player: 1, computer: 0 });
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn reset_wipes_everything_from_any_phase() {
        let mut s = Session::new();
        play(&mut s, Move::Rock, Move::Scissors);
        // resolved -> reset
        s.reset();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.score(), Score::default());
        assert!(s.history().is_empty());
        assert_eq!(s.player(), None);
        assert_eq!(s.computer(), None);
        assert_eq!(s.outcome(), None);

        // thinking -> reset
        s.begin(Move::Paper);
        s.reset();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.player(), None);
    }
}
