//! The messages that cross the bus between the table and its agents.

use crate::{game::Message, round::Move};

/// A single thing which has happened, which an [`Agent`][crate::Agent] may or may not want to respond to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// See [`Message::tick`].
    Tick,

    /// The opponent has finished thinking and reveals its move for the numbered round.
    Reveal { round: u64, choice: Move },
}

impl Message for Event {
    fn tick() -> Self {
        Self::Tick
    }
}
