//! The IO backend traits, and the backends themselves. Each backend is controlled by a feature named similarly and
//! exports a system/runner pair; `load!` picks the first enabled one.

use super::{input::Action, screen::Screen, Result, XY};

#[cfg(feature = "sys_cli")]
pub mod cli;
#[cfg(feature = "sys_nop")]
pub mod nop;

/// An input/output system.
///
/// The output is called a "display" to distinguish it from the [`Screen`].
///
/// This object is meant to be associated with an [`IoRunner`], which must stay on the main thread while this is
/// called from within the game loop.
pub trait IoSystem: Send {
    /// Actually render a [`Screen`] to the display.
    ///
    /// This takes a reference so allocations can be reused; don't clone the screen to get around that unless you
    /// really have to.
    fn draw(&mut self, screen: &Screen) -> Result<()>;
    /// Get the size of the display, in characters.
    fn size(&self) -> XY;

    /// Wait for the next user input, blocking the thread.
    fn input(&mut self) -> Result<Action>;
    /// If the next user input is available, return it. Basically a non-blocking [`Self::input`].
    fn poll_input(&mut self) -> Result<Option<Action>>;

    /// Tells the associated [`IoRunner`] to stop and return control of the main thread, and tell the `IoSystem` to
    /// dispose of any resources it's handling.
    ///
    /// This **must not** wait for the runner to finish tearing down, to avoid deadlocks in the single-threaded
    /// runner.
    ///
    /// This will always be the last method called on this object (unless you count `Drop::drop`) and may panic in
    /// the others if they're called after this one, especially `draw`.
    fn stop(&mut self);
}

/// The other half of an [`IoSystem`].
///
/// This is used to do any processing that has to be done on the main thread.
pub trait IoRunner {
    /// Execute one 'step', which should be quick and must be non-blocking. Returns whether an exit has been
    /// requested (i.e. by [`IoSystem::stop`]) since the last time `step` was called.
    ///
    /// Will always be called on the main thread.
    #[must_use]
    fn step(&mut self) -> bool;

    /// Run until the paired [`IoSystem`] says to [stop](IoSystem::stop).
    ///
    /// Will always be called on the main thread.
    ///
    /// The default implementation just runs `while !self.step() { }`.
    fn run(&mut self) {
        while !self.step() {}
    }
}

/// Based on the backend features enabled, initialize the preferred backend and hand its system/runner pair to the
/// given "function call, minus the parens": `load!(self.run)` calls `self.run(iosys, iorun)`.
///
/// "Returns" `Result<_>`: the callback's value, or the error the chosen backend's init hit.
macro_rules! load {
    ( $( $call:tt )* ) => {
        $crate::util::feature_switch!(
            "sys_cli" => match $crate::io::sys::cli::CliSystem::new() {
                Ok((iosys, iorun)) => Ok($( $call )* (iosys, iorun)),
                Err(e) => Err(e),
            },
            "sys_nop" => match $crate::io::sys::nop::NopSystem::new() {
                Ok((iosys, iorun)) => Ok($( $call )* (iosys, iorun)),
                Err(e) => Err(e),
            },
        )
    };
}

pub(crate) use load;
