use std::fmt;

use crate::io::{clifmt::Text, screen::Screen, XY};

fn breakable(ch: char) -> bool {
    ch.is_whitespace()
}

/// A box of text which can be written to a `Screen`. Note these are meant to be generated on the fly, every frame,
/// possibly multiple times. They do the actual *writing* when they're dropped, converting the higher-level Textbox
/// API to calls of [`Screen::write`].
///
/// Chunks are laid out left to right; newlines inside a chunk start a fresh line, and lines longer than the width
/// wrap at whitespace (or mid-word, for words wider than the box). Lines past the height are dropped.
pub struct Textbox<'a> {
    screen: &'a mut Screen,
    chunks: Vec<Text>,
    pos: XY,
    width: Option<usize>,
    height: Option<usize>,
}

impl<'a> Textbox<'a> {
    pub fn new(screen: &'a mut Screen, text: Vec<Text>) -> Self {
        Self {
            screen,
            chunks: text,
            pos: XY(0, 0),
            width: None,
            height: None,
        }
    }

    pub fn size(mut self, x: usize, y: usize) -> Self {
        self.width = Some(x);
        self.height = Some(y);
        self
    }

    crate::util::setters! {
        pos(x: usize, y: usize) => pos = XY(x, y),
        xy(xy: XY) => pos = xy,
        width(w: usize) => width = Some(w),
        height(h: usize) => height = Some(h),
    }
}

crate::util::abbrev_debug! {
    Textbox<'a>;
    ignore chunks,
    if pos != XY(0, 0),
    if width != None,
    if height != None,
}

impl<'a> Drop for Textbox<'a> {
    fn drop(&mut self) {
        let XY(x, y) = self.pos;
        let screen_size = self.screen.size();
        if x >= screen_size.x() || y >= screen_size.y() {
            return;
        }
        let width = self.width.unwrap_or(screen_size.x() - x);
        let height = self.height.unwrap_or(screen_size.y() - y);
        if width == 0 || height == 0 {
            // nothing to draw
            return;
        }

        // break the chunks into paragraphs on newlines
        let mut paragraphs = vec![];
        let mut cur_para = vec![];
        for mut chunk in std::mem::take(&mut self.chunks) {
            while let Some((line, rest)) = chunk.text.split_once('\n') {
                cur_para.push(chunk.with_text(line.into()));
                paragraphs.push(cur_para);
                cur_para = vec![];
                chunk.text = rest.into();
            }
            cur_para.push(chunk);
        }
        paragraphs.push(cur_para);

        // word-wrap each paragraph into lines no wider than the box
        let mut lines: Vec<Vec<Text>> = vec![];
        for para in paragraphs {
            let mut line: Vec<Text> = vec![];
            let mut pos = 0;
            for mut chunk in para {
                // while the chunk still overflows the current line, split something off the front
                while pos + chunk.text.chars().count() > width {
                    let space_left = width - pos;
                    let head: String;
                    let rest: String;
                    if let Some(idx) = chunk.text[..space_left].rfind(breakable) {
                        // break at the last breakable character that fits
                        head = chunk.text[..idx].into();
                        rest = chunk.text[idx + 1..].into();
                    } else if pos > 0 {
                        // no break in time, but the line already has content; push the whole chunk down a line
                        head = String::new();
                        rest = chunk.text;
                    } else {
                        // a word wider than the whole box; split it mid-word
                        let (pre, post) = chunk.text.split_at(space_left);
                        head = pre.into();
                        rest = post.into();
                    }
                    chunk.text = rest;
                    if !head.is_empty() {
                        line.push(chunk.with_text(head));
                    }
                    lines.push(line);
                    line = vec![];
                    pos = 0;
                }
                pos += chunk.text.chars().count();
                line.push(chunk);
            }
            lines.push(line);
        }

        let mut row = y;
        for line in lines.into_iter().take(height) {
            self.screen.write(XY(x, row), line);
            row += 1;
        }
    }
}
