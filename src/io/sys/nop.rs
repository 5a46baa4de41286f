//! An IO backend that does nothing at all, for benchmarking the engine and for headless smoke-testing.

use std::{
    sync::{Arc, Condvar, Mutex},
    time::Duration,
};

use crate::io::{
    input::Action,
    screen::Screen,
    sys::{IoRunner, IoSystem},
    Result, XY,
};

pub struct NopSystem(NopRunner);

impl NopSystem {
    pub fn new() -> Result<(Self, NopRunner)> {
        let run = NopRunner::new();
        Ok((Self(run.clone()), run))
    }
}

impl IoSystem for NopSystem {
    fn draw(&mut self, _screen: &Screen) -> Result<()> {
        Ok(())
    }
    fn input(&mut self) -> Result<Action> {
        loop {
            std::thread::sleep(Duration::MAX);
        }
    }
    fn poll_input(&mut self) -> Result<Option<Action>> {
        Ok(None)
    }
    fn size(&self) -> XY {
        XY(80, 24)
    }
    fn stop(&mut self) {
        self.0.stop()
    }
}

/// An [`IoRunner`] that doesn't do anything except wait to be told to stop.
#[derive(Clone)]
pub struct NopRunner(Arc<(Mutex<bool>, Condvar)>);

impl NopRunner {
    pub fn new() -> Self {
        Self(Arc::new((Mutex::new(false), Condvar::new())))
    }

    /// Tell the [`NopRunner`] to stop.
    pub fn stop(&mut self) {
        *self.0 .0.lock().unwrap() = true;
        self.0 .1.notify_all()
    }
}

impl IoRunner for NopRunner {
    fn step(&mut self) -> bool {
        *self.0 .0.lock().unwrap()
    }

    fn run(&mut self) {
        let _unused = self
            .0
             .1
            .wait_while(self.0 .0.lock().unwrap(), |b| !*b)
            .unwrap();
    }
}
