#![cfg_attr(coverage, feature(no_coverage))]

//! A rock-paper-scissors game for the terminal. One screen: pick a move,
//! watch the computer think it over, and keep an eye on the score and the
//! last few rounds.
//!
//! The crate is split into an engine half and a game half. The engine half
//! ([`agent`], [`game`], [`runner`], [`io`]) passes messages between agents
//! and the game, and renders to a swappable IO backend. The game half
//! ([`round`], [`session`], [`opponent`], [`table`]) is the actual
//! rock-paper-scissors: pure rules, a small state machine, a one-shot
//! "thinking" agent per round, and the screen itself.

pub mod agent;
pub mod constants;
pub mod event;
pub mod game;
pub mod io;
pub mod opponent;
pub mod round;
pub mod runner;
pub mod session;
pub mod table;
mod timing;
mod util;

pub use crate::{
    agent::{Agent, ControlFlow},
    game::{Game, Message, Replies, Response},
    runner::Runner,
};
