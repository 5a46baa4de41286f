//! The computer player.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    agent::{Agent, ControlFlow},
    constants::gameplay::THINK_DELAY,
    event::Event,
    game::Replies,
};

/// A one-shot agent for a single round: it "thinks" for [`THINK_DELAY`], reveals a uniformly random move, and dies.
///
/// The table spawns one of these per round it begins. There's no cancellation; if the round gets wiped by a reset
/// while this is mid-think, the reveal goes out anyway and the session drops it as stale.
pub struct Opponent {
    rng: SmallRng,
    round: u64,
}

impl Opponent {
    /// The opponent for the given round, with its decision-making seeded from entropy.
    pub fn new(round: u64) -> Self {
        Self::with_rng(round, SmallRng::from_entropy())
    }

    fn with_rng(round: u64, rng: SmallRng) -> Self {
        Self { rng, round }
    }
}

impl Agent<Event> for Opponent {
    fn start(&mut self, _replies: &mut Replies<Event>) -> ControlFlow {
        ControlFlow::sleep_for(THINK_DELAY)
    }

    fn react(&mut self, _event: &Event, replies: &mut Replies<Event>) -> ControlFlow {
        // only reached once the thinking sleep has run out; each draw is independent of every other round's
        replies.queue(Event::Reveal {
            round: self.round,
            choice: self.rng.gen(),
        });
        ControlFlow::Kill
    }
}

#[cfg(test)]
mod opponent_test {
    use std::time::Duration;

    use mock_instant::MockClock;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::round::Move;

    fn reveal_of(op: &mut Opponent) -> (u64, Move) {
        let mut replies = Replies::default();
        assert_eq!(op.react(&Event::Tick, &mut replies), ControlFlow::Kill);
        match replies.messages() {
            [Event::Reveal { round, choice }] => (*round, *choice),
            other => panic!("expected a single reveal, got {:?}", other),
        }
    }

    #[test]
    fn thinks_for_the_configured_delay() {
        let mut op = Opponent::new(1);
        let cf = op.start(&mut Replies::default());
        MockClock::advance(THINK_DELAY + Duration::from_millis(10));
        assert!(cf.is_ready());
    }

    #[test]
    fn reveals_its_round_then_dies() {
        let mut op = Opponent::new(42);
        let _ = op.start(&mut Replies::default());
        let (round, _) = reveal_of(&mut op);
        assert_eq!(round, 42);
    }

    #[test]
    fn same_seed_same_move() {
        let mut a = Opponent::with_rng(1, SmallRng::seed_from_u64(77));
        let mut b = Opponent::with_rng(1, SmallRng::seed_from_u64(77));
        assert_eq!(reveal_of(&mut a).1, reveal_of(&mut b).1);
    }
}
