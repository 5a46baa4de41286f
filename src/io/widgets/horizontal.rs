use std::fmt;

use crate::io::{clifmt::Text, screen::Screen, XY};

/// A horizontal rule across (part of) a row of the screen.
pub struct Horizontal<'a> {
    screen: &'a mut Screen,
    row: usize,
    start: Option<usize>,
    end: Option<usize>,
    char: char,
}

impl<'a> Horizontal<'a> {
    pub fn new(screen: &'a mut Screen, row: usize) -> Self {
        Self {
            screen,
            row,
            start: None,
            end: None,
            char: '-',
        }
    }

    crate::util::setters! {
        start(x: usize) => start = Some(x),
        end(x: usize) => end = Some(x),
        char(ch: char) => char = ch,
    }
}

crate::util::abbrev_debug! {
    Horizontal<'a>;
    write row,
    if start != None,
    if end != None,
    if char != '-',
}

impl<'a> Drop for Horizontal<'a> {
    fn drop(&mut self) {
        let start_x = self.start.unwrap_or(0);
        let end_x = self.end.unwrap_or(self.screen.size().x());
        if end_x <= start_x {
            return;
        }
        let text = self.char.to_string().repeat(end_x - start_x);
        self.screen.write(XY(start_x, self.row), vec![Text::of(text)]);
    }
}

#[cfg(test)]
mod horizontal_test {
    use super::*;

    #[test]
    fn fills_the_row() {
        let mut s = Screen::new(XY(4, 2));
        s.horizontal(1);
        let row: String = s[1].iter().map(|c| c.ch).collect();
        assert_eq!(row, "----");
    }

    #[test]
    fn respects_start_and_char() {
        let mut s = Screen::new(XY(5, 1));
        s.horizontal(0).start(2).char('=');
        let row: String = s[0].iter().map(|c| c.ch).collect();
        assert_eq!(row, "  ===");
    }
}
