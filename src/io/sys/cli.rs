//! Implements the (crossterm-based) rendering to an ANSI terminal.

use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, DisableMouseCapture, EnableMouseCapture},
    execute,
    style::{
        Attribute, Color as CtColor, ResetColor, SetAttribute, SetAttributes, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::io::{
    clifmt::{Cell, Color, Formatted},
    input::{Action, Key, MouseButton},
    screen::Screen,
    sys::{IoRunner, IoSystem},
    Result, XY,
};

fn btn4ct(ct: ct::MouseButton) -> MouseButton {
    match ct {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

/// The main-thread half: owns the terminal state and pumps crossterm events into the [`CliSystem`]'s queue.
pub struct CliRunner {
    actions: mpsc::Sender<Action>,
    stop: Arc<AtomicBool>,
}

impl CliRunner {
    fn init_term() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            std::io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> Result<()> {
        execute!(
            std::io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn new(actions: mpsc::Sender<Action>, stop: Arc<AtomicBool>) -> Result<Self> {
        Self::init_term()?;
        std::panic::set_hook(Box::new(|i| {
            let _ = Self::clean_term();
            println!("{}", i);
            // set back up in preparation for drop
            #[cfg(panic = "unwind")]
            let _ = Self::init_term();
        }));
        Ok(Self { actions, stop })
    }
}

impl Drop for CliRunner {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

impl IoRunner for CliRunner {
    fn step(&mut self) -> bool {
        // check whether we've been told to stop
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        macro_rules! mods {
            ( $mods:ident, $action:ident ) => {
                if $mods.contains(ct::KeyModifiers::SHIFT) {
                    try_send!($action {
                        key: Key::LeftShift
                    });
                }
                if $mods.contains(ct::KeyModifiers::CONTROL) {
                    try_send!($action { key: Key::LeftCtrl });
                }
                if $mods.contains(ct::KeyModifiers::ALT) {
                    try_send!($action { key: Key::LeftAlt });
                }
            };
        }
        macro_rules! try_send {
            ( $type:ident $( ($nt:expr) )? $( { $($br:tt)* } )? ) => {
                match self.actions.send(Action::$type $(($nt))? $({$($br)*})? ) {
                    Ok(_) => (),
                    Err(_) => return true,
                }
            }
        }
        // get an event from the terminal, with zero timeout to avoid blocking in `step`
        match crossterm::event::poll(Duration::ZERO) {
            Ok(false) => return false,
            Ok(true) => (),
            Err(e) => {
                try_send!(Error(format!("polling: {}", e)));
                return true;
            }
        }
        // we have an event, so get it
        let ev = match crossterm::event::read() {
            Ok(ev) => ev,
            Err(e) => {
                try_send!(Error(format!("reading: {}", e)));
                return true;
            }
        };
        match ev {
            ct::Event::Key(ct::KeyEvent {
                code, modifiers, ..
            }) => {
                mods!(modifiers, KeyPress);
                if code == ct::KeyCode::BackTab {
                    try_send!(KeyPress {
                        key: Key::LeftShift
                    });
                    try_send!(KeyPress { key: Key::Tab });
                    try_send!(KeyRelease { key: Key::Tab });
                    try_send!(KeyRelease {
                        key: Key::LeftShift
                    });
                } else if code == ct::KeyCode::Null {
                    try_send!(Unknown("null character".into()));
                } else {
                    let key = match code {
                        ct::KeyCode::Char(c) => Key::Char(c),
                        ct::KeyCode::F(c) => Key::F(c as usize),
                        ct::KeyCode::Backspace => Key::Backspace,
                        ct::KeyCode::Enter => Key::Enter,
                        ct::KeyCode::Left => Key::Left,
                        ct::KeyCode::Right => Key::Right,
                        ct::KeyCode::Up => Key::Up,
                        ct::KeyCode::Down => Key::Down,
                        ct::KeyCode::Home => Key::Home,
                        ct::KeyCode::End => Key::End,
                        ct::KeyCode::PageUp => Key::PageUp,
                        ct::KeyCode::PageDown => Key::PageDown,
                        ct::KeyCode::Tab => Key::Tab,
                        ct::KeyCode::Delete => Key::Delete,
                        ct::KeyCode::Insert => Key::Insert,
                        ct::KeyCode::Esc => Key::Escape,
                        kc => {
                            try_send!(Unknown(format!("keycode {:?}", kc)));
                            return false;
                        }
                    };
                    try_send!(KeyPress { key });
                    try_send!(KeyRelease { key });
                }
                mods!(modifiers, KeyRelease);
            }
            ct::Event::Resize(..) => try_send!(Redraw),
            ct::Event::Mouse(ct::MouseEvent {
                row,
                column: col,
                kind,
                modifiers,
            }) => {
                mods!(modifiers, KeyPress);
                let pos = XY(col as usize, row as usize);
                match kind {
                    ct::MouseEventKind::Up(btn) => try_send!(MouseRelease {
                        button: btn4ct(btn)
                    }),
                    ct::MouseEventKind::Down(btn) => try_send!(MousePress {
                        button: btn4ct(btn)
                    }),
                    ct::MouseEventKind::Drag(_) => try_send!(MouseMove { pos }),
                    ct::MouseEventKind::Moved => try_send!(MouseMove { pos }),
                    ct::MouseEventKind::ScrollUp => try_send!(MousePress {
                        button: MouseButton::ScrollUp
                    }),
                    ct::MouseEventKind::ScrollDown => try_send!(MousePress {
                        button: MouseButton::ScrollDown
                    }),
                }
                mods!(modifiers, KeyRelease);
            }
            ct::Event::FocusGained => try_send!(Redraw),
            // bracketed paste is never enabled, and there's nothing useful to do on focus loss
            #[allow(unreachable_patterns)]
            _ => (),
        };

        false
    }
}

/// Crossterm color for our colors
fn ct4color(c: Color) -> CtColor {
    match c {
        Color::Black => CtColor::Black,
        Color::BrightBlack => CtColor::DarkGrey,
        Color::Red => CtColor::DarkRed,
        Color::BrightRed => CtColor::Red,
        Color::Green => CtColor::DarkGreen,
        Color::BrightGreen => CtColor::Green,
        Color::Yellow => CtColor::DarkYellow,
        Color::BrightYellow => CtColor::Yellow,
        Color::Blue => CtColor::DarkBlue,
        Color::BrightBlue => CtColor::Blue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::BrightMagenta => CtColor::Magenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::BrightCyan => CtColor::Cyan,
        Color::White => CtColor::Grey,
        Color::BrightWhite => CtColor::White,
        Color::Default => CtColor::Reset,
    }
}

/// Render a single row of cells into bytes that can be written to the terminal.
fn render_row(row: &[Cell], out: &mut Vec<u8>) {
    // `unwrap` is sprinkled throughout this function, and is safe because we're queueing into a `Vec`, which is an
    // infallible destination for bytes.

    let mut ch_b = [0u8; 4];

    let mut fg = row[0].get_fmt().fg;
    let mut bg = row[0].get_fmt().bg;
    let mut bold = row[0].get_fmt().bold;
    let mut underline = row[0].get_fmt().underline;
    let mut attrs = [Attribute::NormalIntensity, Attribute::NoUnderline];
    if bold {
        attrs[0] = Attribute::Bold;
    }
    if underline {
        attrs[1] = Attribute::Underlined;
    }
    crossterm::queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct4color(fg)),
        SetBackgroundColor(ct4color(bg)),
        SetAttributes(attrs.as_ref().into()),
    )
    .unwrap();
    out.extend_from_slice(row[0].ch.encode_utf8(&mut ch_b).as_bytes());

    for cell in &row[1..] {
        if cell.get_fmt().fg != fg {
            fg = cell.get_fmt().fg;
            crossterm::queue!(out, SetForegroundColor(ct4color(fg))).unwrap();
        }
        if cell.get_fmt().bg != bg {
            bg = cell.get_fmt().bg;
            crossterm::queue!(out, SetBackgroundColor(ct4color(bg))).unwrap();
        }
        if cell.get_fmt().bold != bold {
            bold = cell.get_fmt().bold;
            let attr = if bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            crossterm::queue!(out, SetAttribute(attr)).unwrap();
        }
        if cell.get_fmt().underline != underline {
            underline = cell.get_fmt().underline;
            let attr = if underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            crossterm::queue!(out, SetAttribute(attr)).unwrap();
        }
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    crossterm::queue!(out, MoveDown(1), MoveToColumn(0)).unwrap();
}

/// The game-loop half of the CLI backend; see [`CliRunner`] for the other.
pub struct CliSystem {
    queue: mpsc::Receiver<Action>,
    stop: Arc<AtomicBool>,
}

impl CliSystem {
    pub fn new() -> Result<(Self, CliRunner)> {
        let (queue_s, queue_r) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let runner = CliRunner::new(queue_s, stop.clone())?;
        Ok((
            Self {
                queue: queue_r,
                stop,
            },
            runner,
        ))
    }
}

impl IoSystem for CliSystem {
    fn size(&self) -> XY {
        let (x, y) = terminal::size().unwrap_or((80, 24));
        XY(x as usize, y as usize)
    }

    fn draw(&mut self, screen: &Screen) -> Result<()> {
        let mut out = vec![];
        crossterm::queue!(&mut out, MoveTo(0, 0)).unwrap();
        for row in screen.rows() {
            render_row(row, &mut out);
        }
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    }

    fn input(&mut self) -> Result<Action> {
        Ok(self.queue.recv().expect("unexpected queue closure"))
    }

    fn poll_input(&mut self) -> Result<Option<Action>> {
        match self.queue.try_recv() {
            Ok(res) => Ok(Some(res)),
            Err(TryRecvError::Disconnected) => panic!("unexpected queue closure"),
            Err(TryRecvError::Empty) => Ok(None),
        }
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // flush whatever input is still queued; this can't block on the runner, which only gets to act on the stop
        // flag after this returns. the terminal teardown itself happens when the runner drops.
        while self.queue.try_recv().is_ok() {}
    }
}
