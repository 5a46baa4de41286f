//! Various constants, for use in various places.

/// Constants with gameplay implications.
pub mod gameplay {
    use std::time::Duration;

    /// How long the opponent spends "thinking" between the player locking a move in and the reveal. Doesn't need to
    /// be exact; the message loop adds up to one input tick on top.
    pub const THINK_DELAY: Duration = Duration::from_millis(500);

    /// How many resolved rounds the history display keeps. Older rounds fall off the end.
    pub const HISTORY_LEN: usize = 5;
}

/// Constants specifically relating to how things render.
pub mod graphics {
    /// How many rows the title bar takes up, rule included. Used for relative positioning below it.
    pub const HEADER_HEIGHT: usize = 2;

    /// The row the history section (rule, then entries) starts on.
    pub const HISTORY_TOP: usize = HEADER_HEIGHT + 6;
}
