//! The text formatting system shared by every IO backend, as several pieces:
//!
//! - [`Format`], which contains the common ANSI formatting options
//! - [`Text`] and [`Cell`], which apply a `Format` to a string and a `char` respectively
//! - [`text!`][crate::text] and [`text1!`][crate::text1], which construct formatted `Text`s
//!
//! `Text` and `Cell` are then used by [`Screen`][super::Screen] and the UI widgets.

/// The color of a piece of formatted text. Meant to be used through `Text` / `text!`. The numeric values are the
/// ANSI color codes for each color; that's also where the actual colors are from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    Default = 9,
    BrightBlack = 60,
    BrightRed = 61,
    BrightGreen = 62,
    BrightYellow = 63,
    BrightBlue = 64,
    BrightMagenta = 65,
    BrightCyan = 66,
    BrightWhite = 67,
}

impl Default for Color {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Format {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::Default,
        bg: Color::Default,
        bold: false,
        underline: false,
    };
}

macro_rules! fmt_fn {
    ( $(
        $name:ident
        $(( $( $arg:ident: $type:ty ),* $(,)? ))?
        =>
        $field:ident = $val:expr
    ),* $(,)? ) => { $(
        #[must_use]
        fn $name(mut self $($(, $arg: $type )*)? ) -> Self {
            self.get_fmt_mut().$field = $val;
            self
        }
    )* };
}

pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

pub trait FormattedExt: Formatted + Sized {
    #[must_use]
    fn fmt(mut self, fmt: Format) -> Self {
        *self.get_fmt_mut() = fmt;
        self
    }
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = *rhs.get_fmt();
        self
    }
    fmt_fn! {
        fg(c: Color) => fg = c,
        bg(c: Color) => bg = c,
        black => fg = Color::Black,         bright_black => fg = Color::BrightBlack,
        red => fg = Color::Red,             bright_red => fg = Color::BrightRed,
        green => fg = Color::Green,         bright_green => fg = Color::BrightGreen,
        yellow => fg = Color::Yellow,       bright_yellow => fg = Color::BrightYellow,
        blue => fg = Color::Blue,           bright_blue => fg = Color::BrightBlue,
        magenta => fg = Color::Magenta,     bright_magenta => fg = Color::BrightMagenta,
        cyan => fg = Color::Cyan,           bright_cyan => fg = Color::BrightCyan,
        white => fg = Color::White,         bright_white => fg = Color::BrightWhite,
        default => fg = Color::Default,
        underline => underline = true,
        bold => bold = true,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $( $fvis:vis $field:ident: $type:ty ),* $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $( $fvis $field: $type, )*
            _fmt: $crate::io::clifmt::Format,
        }
        impl $crate::io::clifmt::Formatted for $name {
            fn get_fmt(&self) -> &$crate::io::clifmt::Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut $crate::io::clifmt::Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of( $($field: $type),* ) -> Self {
                Self {
                    $( $field, )*
                    _fmt: $crate::io::clifmt::Format::NONE,
                }
            }
        }
    };
}

fmt_type!(
    /// A single run of formatted text. The API is designed to be used through `text!`; to discourage direct use,
    /// the internals aren't documented.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text {
        pub text: String,
    }
);

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }

    pub(super) fn with_text(&self, new_text: String) -> Text {
        let mut res = self.clone();
        res.text = new_text;
        res
    }
}

/// Construct a single formatted [`Text`], e.g. `text1!(bold green "score: {}"(total))`.
#[macro_export]
macro_rules! text1 {
    (
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ) => {
        {
            #[allow(unused_imports)]
            use $crate::io::clifmt::FormattedExt as _;
            $crate::io::clifmt::Text::of(
                format!( $text $(, $( $arg ),* )? )
            ) $( . $name () )*
        }
    };
}

/// Construct a `Vec` of formatted [`Text`]s, e.g. `text!("you ", bold "{}"(wins), " : ", bold "{}"(losses))`.
#[macro_export]
macro_rules! text {
    ( $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),+ $(,)? ) => {
        vec![
            $(
                $crate::text1!( $( $name )* $text $( ( $( $arg ),* ) )? )
            ),+
        ]
    };
}

fmt_type! {
    /// A single character that's been formatted. This is really only meant to be used in `Screen`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

impl Cell {
    pub const BLANK: Cell = Cell::of(' ');
}
