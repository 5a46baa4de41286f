//! The `Agent` trait and its `ControlFlow`.

use std::time::Duration;

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

use crate::game::{Message, Replies};

/// What should happen to an [`Agent`] after it finishes [react][Agent::react]ing to a round of messages.
///
/// Note that this only defines when [`Agent::react`] *should* start being called again. The associated agent will
/// never be woken early, but it may sleep through rounds entirely if nothing else keeps the message bus busy. Treat
/// this like an optimization; if you report `ControlFlow` accurately, you can save the engine a bit of time when it
/// processes messages.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ControlFlow {
    /// Continue as normal and update next time.
    Continue,
    /// Stop updating this agent and (eventually) destroy it.
    Kill,
    /// Sleep, waking up at the given time
    Time(Instant),
}

impl ControlFlow {
    /// Create a new [`ControlFlow::Time`], waiting until the given time.
    pub fn sleep_until(time: Instant) -> Self {
        Self::Time(time)
    }

    /// Create a new [`ControlFlow::Time`], waiting for a given duration.
    pub fn sleep_for(amt: Duration) -> Self {
        Self::Time(Instant::now() + amt)
    }

    /// Check whether an agent which returned this control flow is ready to start reacting again.
    pub fn is_ready(&self) -> bool {
        match self {
            ControlFlow::Continue => true,
            ControlFlow::Kill => false,
            ControlFlow::Time(when) => &Instant::now() > when,
        }
    }
}

/// An agent in the system, which can react to messages.
///
/// Messages are processed in 'rounds'. There's a list of 'current' messages, which are fed into every agent at the
/// same time. Then all of the replies are collected, and those are the 'current' messages for the next round.
///
/// As that implies, messages are inherently ephemeral -- none persist more than one round.
pub trait Agent<M: Message>: Send + Sync {
    /// Called once on start, to queue any starting messages/ControlFlow as necessary. This will always be called
    /// before `react`.
    ///
    /// By default, does nothing and returns [`ControlFlow::Continue`] to allow [`Self::react`] to be called, under
    /// the assumption that your interesting code sits there.
    #[cfg_attr(coverage, no_coverage)]
    fn start(&mut self, _replies: &mut Replies<M>) -> ControlFlow {
        ControlFlow::Continue
    }

    /// React to the messages of a round, indicating when the agent should be called next and optionally queueing
    /// some more messages.
    ///
    /// By default, does nothing and returns [`ControlFlow::Kill`], under the assumption that you'd have implemented
    /// `react` if you wanted your agent to stay alive and do things.
    #[cfg_attr(coverage, no_coverage)]
    fn react(&mut self, _event: &M, _replies: &mut Replies<M>) -> ControlFlow {
        ControlFlow::Kill
    }
}

#[cfg(test)]
mod cf_test {
    use std::time::Duration;

    use mock_instant::MockClock;

    use super::{ControlFlow, Instant};

    #[test]
    fn continue_ready() {
        assert!(ControlFlow::Continue.is_ready())
    }

    #[test]
    fn kill_unready() {
        assert!(!ControlFlow::Kill.is_ready());
    }

    #[test]
    fn sleep_until_readies_after_time() {
        let cf = ControlFlow::sleep_until(Instant::now() + Duration::from_millis(100));
        MockClock::advance(Duration::from_millis(120));
        assert!(cf.is_ready());
    }

    #[test]
    fn sleep_for_readies_after_time() {
        let cf = ControlFlow::sleep_for(Duration::from_millis(100));
        MockClock::advance(Duration::from_millis(120));
        assert!(cf.is_ready());
    }
}
