//! The one screen of the game, and the "main function" wiring it to the engine.

use crate::{
    constants::graphics::{HEADER_HEIGHT, HISTORY_TOP},
    event::Event,
    game::{Game, Replies, Response},
    io::{
        clifmt::Text,
        input::{Action, Key},
        screen::Screen,
    },
    opponent::Opponent,
    round::{Move, Outcome},
    session::{Phase, Session},
    text, text1,
};

/// The rock-paper-scissors table: score, the two move slots, the verdict, and recent history.
///
/// All the rules live in the [`Session`]; this just maps keys to transitions and state to rows of text.
#[derive(Default)]
pub struct Table {
    session: Session,
}

impl Table {
    fn moves_line(&self) -> Vec<Text> {
        let s = &self.session;
        let yours = s.player().map_or("?", Move::name);
        let theirs = match (s.phase(), s.computer()) {
            (Phase::Thinking, _) => "...",
            (_, Some(m)) => m.name(),
            (_, None) => "?",
        };
        text!(
            "you: ",
            bold "{:<12}"(yours),
            "computer: ",
            bold "{}"(theirs),
        )
    }

    fn verdict_line(&self) -> Vec<Text> {
        match self.session.outcome() {
            Some(Outcome::Win) => text!(bold green "you win!"),
            Some(Outcome::Loss) => text!(bold red "the computer wins!"),
            Some(Outcome::Draw) => text!(bold "a draw."),
            None if self.session.phase() == Phase::Thinking => {
                text!(bright_black "the computer is thinking...")
            }
            None => text!(bright_black "pick a move to start."),
        }
    }

    fn history_lines(&self) -> Vec<Text> {
        let history = self.session.history();
        let mut lines = Vec::with_capacity(history.len() * 2 + 1);
        lines.push(text1!(bright_black "last rounds\n"));
        if history.is_empty() {
            lines.push(text1!(bright_black "nothing yet.\n"));
        }
        for entry in history {
            lines.push(text1!(
                "#{:<4} {:<8} vs {:<8} "(entry.round, entry.player.name(), entry.computer.name())
            ));
            lines.push(match entry.outcome {
                Outcome::Win => text1!(green "win\n"),
                Outcome::Loss => text1!(red "loss\n"),
                Outcome::Draw => text1!(bright_black "draw\n"),
            });
        }
        lines
    }
}

impl Game for Table {
    type Message = Event;

    fn input(&mut self, input: Action, replies: &mut Replies<Event>) -> Response {
        let key = match input {
            Action::KeyPress { key } => key,
            _ => return Response::Nothing,
        };
        let mv = match key {
            Key::Char('r') | Key::Char('1') => Move::Rock,
            Key::Char('p') | Key::Char('2') => Move::Paper,
            Key::Char('s') | Key::Char('3') => Move::Scissors,
            Key::Escape => {
                self.session.reset();
                return Response::Redraw;
            }
            Key::Char('q') => return Response::Quit,
            _ => return Response::Nothing,
        };
        match self.session.begin(mv) {
            Some(round) => {
                replies.spawn(Opponent::new(round));
                Response::Redraw
            }
            // move keys while the opponent is thinking are silently ignored
            None => Response::Nothing,
        }
    }

    fn event(&mut self, event: &Event) -> Response {
        match event {
            Event::Reveal { round, choice } => {
                if self.session.resolve(*round, *choice) {
                    Response::Redraw
                } else {
                    // a reveal for a round that a reset already wiped; nothing to show
                    Response::Nothing
                }
            }
            _ => Response::Nothing,
        }
    }

    fn render(&self, onto: &mut Screen) {
        let score = self.session.score();

        onto.textbox(text!(bold "roshambo", bright_black "  --  best of nothing, forever"))
            .pos(1, 0)
            .height(1);
        onto.horizontal(1);

        onto.textbox(text!(
            "you ",
            bold green "{}"(score.player),
            " : ",
            bold red "{}"(score.computer),
            " computer",
        ))
        .pos(1, HEADER_HEIGHT)
        .height(1);

        onto.textbox(self.moves_line())
            .pos(1, HEADER_HEIGHT + 2)
            .height(1);
        onto.textbox(self.verdict_line())
            .pos(1, HEADER_HEIGHT + 3)
            .height(1);

        onto.textbox(text!(
            underline "r", "ock   ",
            underline "p", "aper   ",
            underline "s", "cissors   ",
            bright_black "|   ",
            underline "esc", " reset   ",
            underline "q", " quit",
        ))
        .pos(1, HEADER_HEIGHT + 5)
        .height(1);

        onto.horizontal(HISTORY_TOP);
        onto.textbox(self.history_lines()).pos(1, HISTORY_TOP + 1);
    }
}

/// Assemble the table and run it until the player quits.
#[cfg(feature = "__sys")]
pub fn run(_args: impl Iterator<Item = String>) {
    crate::Runner::new(Table::default()).load_run();
}

#[cfg(test)]
mod table_test {
    use std::time::Duration;

    use mock_instant::MockClock;

    use super::*;
    use crate::{
        agent::{Agent, ControlFlow},
        constants::gameplay::THINK_DELAY,
        session::Score,
    };

    /// Assert things about the outcome of the table receiving a key press
    macro_rules! assert_input {
        (
            $table:ident.input( $key:expr ) -> $resp:ident,
            spawns $spawns:literal
        ) => {{
            let mut replies = Replies::default();
            let resp = $table.input(Action::KeyPress { key: $key }, &mut replies);
            assert_eq!(resp, Response::$resp);
            assert_eq!(replies.spawn_len(), $spawns);
            assert_eq!(replies.queue_len(), 0);
        }};
    }

    const ROCK: Key = Key::Char('r');
    const PAPER: Key = Key::Char('p');
    const QUIT: Key = Key::Char('q');

    #[test]
    fn move_key_starts_a_round_and_a_thinker() {
        let mut table = Table::default();
        assert_input!(table.input(ROCK) -> Redraw, spawns 1);
        assert_eq!(table.session.phase(), Phase::Thinking);
        assert_eq!(table.session.player(), Some(Move::Rock));
    }

    #[test]
    fn number_keys_work_too() {
        let mut table = Table::default();
        assert_input!(table.input(Key::Char('2')) -> Redraw, spawns 1);
        assert_eq!(table.session.player(), Some(Move::Paper));
    }

    #[test]
    fn moves_mid_think_are_ignored() {
        let mut table = Table::default();
        assert_input!(table.input(ROCK) -> Redraw, spawns 1);
        assert_input!(table.input(PAPER) -> Nothing, spawns 0);
        assert_eq!(table.session.player(), Some(Move::Rock));
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut table = Table::default();
        assert_input!(table.input(Key::Char('x')) -> Nothing, spawns 0);
        assert_input!(table.input(Key::Enter) -> Nothing, spawns 0);
    }

    #[test]
    fn key_releases_do_nothing() {
        let mut table = Table::default();
        let mut replies = Replies::default();
        let resp = table.input(Action::KeyRelease { key: ROCK }, &mut replies);
        assert_eq!(resp, Response::Nothing);
        assert_eq!(table.session.phase(), Phase::Idle);
    }

    #[test]
    fn quit_key_quits() {
        let mut table = Table::default();
        assert_input!(table.input(QUIT) -> Quit, spawns 0);
    }

    #[test]
    fn reveal_resolves_the_round() {
        let mut table = Table::default();
        assert_input!(table.input(ROCK) -> Redraw, spawns 1);
        let resp = table.event(&Event::Reveal {
            round: 1,
            choice: Move::Scissors,
        });
        assert_eq!(resp, Response::Redraw);
        assert_eq!(table.session.phase(), Phase::Resolved);
        assert_eq!(table.session.outcome(), Some(Outcome::Win));
        assert_eq!(table.session.score(), Score { player: 1, computer: 0 });
    }

    #[test]
    fn ticks_change_nothing() {
        let mut table = Table::default();
        assert_eq!(table.event(&Event::Tick), Response::Nothing);
    }

    #[test]
    fn escape_resets_even_mid_think() {
        let mut table = Table::default();
        assert_input!(table.input(ROCK) -> Redraw, spawns 1);
        assert_input!(table.input(Key::Escape) -> Redraw, spawns 0);
        assert_eq!(table.session.phase(), Phase::Idle);
        assert_eq!(table.session.score(), Score::default());
        assert!(table.session.history().is_empty());
    }

    #[test]
    fn stale_reveal_after_reset_is_dropped() {
        let mut table = Table::default();
        assert_input!(table.input(ROCK) -> Redraw, spawns 1);
        assert_input!(table.input(Key::Escape) -> Redraw, spawns 0);
        assert_input!(table.input(PAPER) -> Redraw, spawns 1);
        // round 1's thinker finally reports in; round 2 is the live one
        let resp = table.event(&Event::Reveal {
            round: 1,
            choice: Move::Scissors,
        });
        assert_eq!(resp, Response::Nothing);
        assert_eq!(table.session.phase(), Phase::Thinking);
        assert_eq!(table.session.player(), Some(Move::Paper));
    }

    /// The whole cycle, driven the way the runner drives it: key press spawns the thinker, the thinker sleeps
    /// through the delay, wakes, reveals, and the reveal resolves the round.
    #[test]
    fn a_round_from_key_to_verdict() {
        let mut table = Table::default();
        let mut replies = Replies::default();
        let resp = table.input(Action::KeyPress { key: ROCK }, &mut replies);
        assert_eq!(resp, Response::Redraw);
        let mut thinker = match replies.agents.pop() {
            Some(a) => a,
            None => panic!("no thinker spawned"),
        };

        let cf = thinker.start(&mut Replies::default());
        assert!(matches!(cf, ControlFlow::Time(_)));
        MockClock::advance(THINK_DELAY + Duration::from_millis(50));
        assert!(cf.is_ready());

        let mut wake = Replies::default();
        assert_eq!(thinker.react(&Event::Tick, &mut wake), ControlFlow::Kill);
        let reveal = wake.messages()[0];
        assert!(matches!(reveal, Event::Reveal { round: 1, .. }));

        assert_eq!(table.event(&reveal), Response::Redraw);
        assert_eq!(table.session.phase(), Phase::Resolved);
        let tally = table.session.score();
        match table.session.outcome() {
            Some(Outcome::Draw) => assert_eq!(tally, Score::default()),
            Some(_) => assert_eq!(tally.player + tally.computer, 1),
            None => panic!("round resolved without an outcome"),
        }
    }

    #[test]
    fn render_mentions_the_state() {
        use crate::io::XY;
        let mut table = Table::default();
        let mut replies = Replies::default();
        table.input(Action::KeyPress { key: ROCK }, &mut replies);
        table.event(&Event::Reveal {
            round: 1,
            choice: Move::Scissors,
        });

        let mut screen = Screen::new(XY(60, 20));
        table.render(&mut screen);
        let rendered: String = screen
            .rows()
            .iter()
            .map(|row| row.iter().map(|c| c.ch).collect::<String>() + "\n")
            .collect();
        assert!(rendered.contains("you 1"), "score missing:\n{}", rendered);
        assert!(rendered.contains("you win!"), "verdict missing:\n{}", rendered);
        assert!(rendered.contains("rock"), "moves missing:\n{}", rendered);
        assert!(
            rendered.contains("#1"),
            "history entry missing:\n{}",
            rendered
        );
    }
}
