//! Contains the "main loop" of the engine: one thread interleaving agent rounds, game input, and rendering.

use std::{mem, thread, time::Duration};

use crate::{
    agent::{Agent, ControlFlow},
    game::{Game, Message, Replies, Response},
    io::{
        input::Action,
        screen::Screen,
        sys::{IoRunner, IoSystem},
    },
    timing::Timer,
};

pub(crate) struct AgentRunner<M: Message> {
    agents: Vec<(ControlFlow, Box<dyn Agent<M>>)>,
    replies: Replies<M>,
}

impl<M: Message> AgentRunner<M> {
    pub(crate) fn new() -> Self {
        Self {
            agents: Default::default(),
            replies: Default::default(),
        }
    }

    /// Perform one round of message processing.
    ///
    /// `messages` and `agents` are both input and output:
    ///
    /// - `messages` and `agents` passed in are the messages/agents for this runner to run
    /// - `messages` and `agents` coming out are the replies that this round produced
    ///
    /// Notably the vecs *will be cleared* and old messages *will not be available*!
    pub(crate) fn step(&mut self, messages: &mut Vec<M>, agents: &mut Vec<Box<dyn Agent<M>>>) {
        self.agents.extend(
            agents
                .drain(..)
                .map(|mut a| (a.start(&mut self.replies), a)),
        );

        if messages.is_empty() {
            messages.push(M::tick());
        }

        for (cf, agent) in self.agents.iter_mut() {
            if !cf.is_ready() {
                continue;
            }
            for msg in messages.iter() {
                *cf = agent.react(msg, &mut self.replies);
                if !cf.is_ready() {
                    break;
                }
            }
        }

        // filter out agents that will never wake up
        self.agents.retain(|(cf, _ag)| *cf != ControlFlow::Kill);

        // we're done with the old messages now
        messages.clear();
        // pragmatically this just outputs self.replies.messages and clears it, but this reuses allocations
        mem::swap(&mut self.replies.messages, messages);
        // ditto but for agents (no clear needed because we drained earlier)
        mem::swap(&mut self.replies.agents, agents);
    }
}

struct GameRunner<G: Game, IO: IoSystem> {
    game: G,
    iosys: IO,
    screen: Screen,
    tainted: bool,
    render_timer: Timer,
}

impl<G: Game, IO: IoSystem> GameRunner<G, IO> {
    fn new(game: G, iosys: IO) -> Self {
        let screen = Screen::new(iosys.size());
        Self {
            game,
            iosys,
            screen,
            tainted: true,
            // Render at most ~60fps
            render_timer: Timer::new(1.0 / 60.0),
        }
    }

    /// Feed a round of messages to the associated `Game`.
    ///
    /// Returns whether a stop was requested.
    fn feed(&mut self, messages: &[G::Message]) -> bool {
        if messages.is_empty() {
            return self.feed(&[G::Message::tick()]);
        }

        for msg in messages {
            match self.game.event(msg) {
                Response::Nothing => (),
                Response::Redraw => self.tainted = true,
                Response::Quit => return true,
            }
        }
        false
    }

    /// Do a step of IO with the associated `IoSystem` and `Game`.
    ///
    /// Returns whether a stop was requested.
    fn io(
        &mut self,
        messages: &mut Vec<G::Message>,
        agents: &mut Vec<Box<dyn Agent<G::Message>>>,
    ) -> bool {
        let mut replies = Replies {
            agents: mem::take(agents),
            messages: mem::take(messages),
        };
        let mut quit = false;
        while let Ok(Some(action)) = self.iosys.poll_input() {
            match action {
                Action::Closed => {
                    quit = true;
                    break;
                }
                Action::Redraw => self.tainted = true,
                other => match self.game.input(other, &mut replies) {
                    Response::Nothing => (),
                    Response::Redraw => self.tainted = true,
                    Response::Quit => {
                        quit = true;
                        break;
                    }
                },
            }
        }
        *agents = replies.agents;
        *messages = replies.messages;
        quit
    }

    /// Render to the screen, if the contents are tainted and it's been long enough since the last frame.
    fn render(&mut self) {
        let new_size = self.iosys.size();
        if self.tainted || new_size != self.screen.size() {
            if !self.render_timer.tick_ready() {
                // avoid wasting too much time rendering
                return;
            }
            self.screen.resize(new_size);
            self.game.render(&mut self.screen);
            self.iosys.draw(&self.screen).unwrap();
            self.tainted = false;
        }
    }
}

/// Handles starting up and running a `Game`.
#[must_use]
pub struct Runner<G: Game + 'static> {
    messages: Vec<G::Message>,
    agents: Vec<Box<dyn Agent<G::Message>>>,
    game: G,
    input_tick: f32,
}

impl<G: Game + 'static> Runner<G> {
    /// Prepare a game to be run.
    pub fn new(game: G) -> Self {
        Self {
            game,
            messages: vec![],
            agents: vec![],
            input_tick: 0.1,
        }
    }

    /// Set an agent to be running at game startup, to process the first round of messages.
    pub fn spawn(mut self, agent: impl Agent<G::Message> + 'static) -> Self {
        self.agents.push(Box::new(agent));
        self
    }

    /// Add a message to be handled in the first round, by the first crop of [`Self::spawn`]ed agents.
    pub fn queue(mut self, msg: G::Message) -> Self {
        self.messages.push(msg);
        self
    }

    /// Set the desired time between rounds of messages.
    ///
    /// If processing a round takes longer than this, the game is considered to be "lagging". If it takes less time,
    /// then the runner will sit around, just processing input until the round is done.
    pub fn input_tick(mut self, tick: f32) -> Self {
        self.input_tick = tick;
        self
    }

    /// Start the game running on the current thread.
    ///
    /// This function only exits when [`Game::event`] or [`Game::input`] returns [`Response::Quit`], or the display
    /// is closed. It returns the [`Game`], primarily for testing purposes.
    pub fn run(self, iosys: impl IoSystem + 'static, mut iorun: impl IoRunner) -> G {
        let Self {
            game,
            mut messages,
            mut agents,
            input_tick,
        } = self;

        let mut ar = AgentRunner::new();
        let mut gr = GameRunner::new(game, iosys);
        let mut input_timer = Timer::new(input_tick);

        'mainloop: loop {
            loop {
                gr.render();
                if iorun.step() {
                    break 'mainloop;
                }
                if gr.io(&mut messages, &mut agents) {
                    break 'mainloop;
                }
                if input_timer.tick_ready() {
                    break;
                }
                thread::sleep(input_timer.remaining().min(Duration::from_millis(2)));
            }
            gr.render();
            if gr.feed(&messages) {
                break 'mainloop;
            }
            ar.step(&mut messages, &mut agents);
        }
        gr.iosys.stop();
        iorun.run();
        gr.game
    }

    /// Use `io::sys::load!` to pick an IO backend, load it, and [`Self::run`].
    ///
    /// This **must** be run on the main thread. Ideally, you'd run it from `main` directly.
    ///
    /// If loading every enabled backend fails, this panics.
    #[cfg(feature = "__sys")]
    pub fn load_run(self) -> G {
        crate::io::sys::load!(self.run).unwrap()
    }
}

#[cfg(test)]
mod ar_test {
    use super::*;

    /// Echoes every non-tick message it sees back onto the bus, prefixed, then counts down to its death.
    struct Echo(usize);

    impl Agent<String> for Echo {
        fn react(&mut self, msg: &String, replies: &mut Replies<String>) -> ControlFlow {
            if !msg.is_empty() {
                replies.queue(format!("echo {}", msg));
            }
            match self.0 {
                0 => ControlFlow::Kill,
                n => {
                    self.0 = n - 1;
                    ControlFlow::Continue
                }
            }
        }
    }

    impl Message for String {
        fn tick() -> Self {
            String::new()
        }
    }

    #[test]
    fn replies_become_next_round() {
        let mut ar = AgentRunner::new();
        let mut messages = vec!["hi".to_string()];
        let mut agents: Vec<Box<dyn Agent<String>>> = vec![Box::new(Echo(5))];
        ar.step(&mut messages, &mut agents);
        assert_eq!(messages, vec!["echo hi".to_string()]);
        assert!(agents.is_empty());
    }

    #[test]
    fn empty_round_gets_a_tick() {
        let mut ar = AgentRunner::new();
        let mut messages = vec![];
        let mut agents: Vec<Box<dyn Agent<String>>> = vec![Box::new(Echo(5))];
        ar.step(&mut messages, &mut agents);
        // the tick is empty, so Echo stays quiet
        assert!(messages.is_empty());
    }

    #[test]
    fn killed_agents_get_reaped() {
        let mut ar = AgentRunner::new();
        let mut messages = vec![];
        let mut agents: Vec<Box<dyn Agent<String>>> = vec![Box::new(Echo(1))];
        ar.step(&mut messages, &mut agents);
        assert_eq!(ar.agents.len(), 1);
        ar.step(&mut messages, &mut agents);
        assert!(ar.agents.is_empty());
    }
}
